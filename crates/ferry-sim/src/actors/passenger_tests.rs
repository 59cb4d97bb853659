use std::sync::Arc;

use super::*;
use crate::config::{LogFormat, SimConfig};
use crate::state::SharedState;

fn config(vip_percent: u8, baggage_min: u32, baggage_max: u32) -> SimConfig {
    SimConfig {
        ferry_count: 1,
        passenger_count: 1,
        ferry_capacity: 4,
        baggage_min,
        baggage_max,
        ferry_limit_min: 20,
        ferry_limit_max: 20,
        security_stations: 1,
        security_station_capacity: 1,
        max_frustration: 2,
        ramp_capacity_regular: 2,
        ramp_capacity_vip: 1,
        boarding_time_ms: 1,
        security_time_min_ms: 1,
        security_time_max_ms: 2,
        departure_interval_ms: 50,
        travel_time_ms: 1,
        gate_delay_max_ms: 1,
        vip_percent,
        log_format: LogFormat::Text,
        log_file: None,
    }
}

#[test]
fn check_in_assigns_a_baggage_weight_within_range() {
    let state = Arc::new(SharedState::new(config(20, 5, 30)));
    for id in 0..50 {
        let ticket = check_in(&state, id);
        assert!(ticket.bag_weight >= 5 && ticket.bag_weight <= 30);
    }
}

#[test]
fn check_in_never_assigns_vip_when_vip_percent_is_zero() {
    let state = Arc::new(SharedState::new(config(0, 5, 10)));
    for id in 0..50 {
        assert!(!check_in(&state, id).vip);
    }
}

#[test]
fn check_in_always_assigns_vip_when_vip_percent_is_100() {
    let state = Arc::new(SharedState::new(config(100, 5, 10)));
    for id in 0..20 {
        assert!(check_in(&state, id).vip);
    }
}

#[tokio::test]
async fn screen_reaches_and_vacates_a_station() {
    let state = Arc::new(SharedState::new(config(0, 5, 10)));
    let mut ticket = check_in(&state, 0);

    let state_for_allocator = Arc::clone(&state);
    let allocator = tokio::spawn(async move { crate::actors::security::run(state_for_allocator).await });

    screen(&state, &mut ticket).await;
    assert_eq!(state.stats.lock().await.passengers_screened, 1);
    assert_eq!(ticket.state, crate::model::PassengerState::Waiting);

    state.port_closed.cancel();
    let _ = tokio::time::timeout(std::time::Duration::from_secs(1), allocator).await;
}

#[tokio::test]
async fn baggage_check_accepts_immediately_when_bag_is_within_the_current_ferrys_limit() {
    let state = Arc::new(SharedState::new(config(0, 5, 10)));
    *state.current_ferry.lock().await = Some(0);
    let mut ticket = check_in(&state, 0);
    ticket.bag_weight = 10;
    state.ferries.lock().await[0].baggage_limit = 20;

    tokio::time::timeout(std::time::Duration::from_secs(1), baggage_check(&state, &mut ticket)).await.unwrap();

    assert_eq!(ticket.state, crate::model::PassengerState::BagCheck);
    assert_eq!(state.stats.lock().await.passengers_rejected_baggage, 0);
}

#[tokio::test]
async fn baggage_check_rejects_then_retries_once_a_different_ferry_takes_the_dock() {
    let mut cfg = config(0, 20, 20);
    cfg.ferry_count = 2;
    let state = Arc::new(SharedState::new(cfg));
    state.ferries.lock().await[0].baggage_limit = 10;
    *state.current_ferry.lock().await = Some(0);
    let mut ticket = check_in(&state, 0);
    ticket.bag_weight = 20;

    let state_for_swap = Arc::clone(&state);
    let swap = tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(30)).await;
        state_for_swap.ferries.lock().await[1].baggage_limit = 25;
        *state_for_swap.current_ferry.lock().await = Some(1);
    });

    let check = tokio::time::timeout(std::time::Duration::from_secs(2), baggage_check(&state, &mut ticket)).await;
    assert!(check.is_ok(), "baggage_check should accept once ferry 1 takes the dock");
    let _ = swap.await;

    assert!(state.stats.lock().await.passengers_rejected_baggage >= 1);
}
