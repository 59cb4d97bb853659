use super::*;
use crate::config::LogFormat;

fn tiny_config(ferry_count: usize, passenger_count: usize) -> SimConfig {
    SimConfig {
        ferry_count,
        passenger_count,
        ferry_capacity: 3,
        baggage_min: 5,
        baggage_max: 10,
        ferry_limit_min: 20,
        ferry_limit_max: 20,
        security_stations: 2,
        security_station_capacity: 2,
        max_frustration: 2,
        ramp_capacity_regular: 3,
        ramp_capacity_vip: 2,
        boarding_time_ms: 1,
        security_time_min_ms: 1,
        security_time_max_ms: 2,
        departure_interval_ms: 30,
        travel_time_ms: 1,
        gate_delay_max_ms: 1,
        vip_percent: 20,
        log_format: LogFormat::Text,
        log_file: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_spawned_passenger_is_accounted_for() {
    let stats = run(tiny_config(2, 15)).await.unwrap();
    assert_eq!(stats.passengers_spawned, 15);
    assert!(stats.passengers_boarded + stats.passengers_rejected_baggage <= stats.passengers_spawned);
    assert!(stats.total_ferry_trips >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_single_ferry_still_completes_a_small_manifest() {
    let stats = run(tiny_config(1, 6)).await.unwrap();
    assert_eq!(stats.passengers_spawned, 6);
}

#[tokio::test]
async fn invalid_config_fails_before_any_actor_spawns() {
    let mut config = tiny_config(2, 5);
    config.security_stations = 0;
    let err = run(config).await.unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

mod invariants {
    use proptest::prelude::*;

    use super::tiny_config;
    use crate::supervisor::run;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        /// P1/P2/P4: for any ferry/passenger count in a plausible range, the
        /// run finishes with every passenger accounted for and never boards
        /// more than were spawned.
        #[test]
        fn stats_stay_internally_consistent(ferry_count in 1usize..4, passenger_count in 1usize..20) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let stats = rt.block_on(run(tiny_config(ferry_count, passenger_count))).unwrap();

            prop_assert_eq!(stats.passengers_spawned, passenger_count as u64);
            prop_assert!(stats.passengers_boarded <= stats.passengers_spawned);
            prop_assert!(stats.passengers_screened <= stats.passengers_spawned);
            prop_assert!(stats.total_ferry_trips >= 1);
        }
    }
}
