// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single passenger's lifecycle (spec §4.2): check-in, baggage check
//! against whichever ferry is currently at the dock, security screening,
//! then a ramp-admission loop that retries against whichever ferry
//! currently holds the turn token until it either boards or the port
//! closes. `ticket.state` is driven through CHECKIN → BAG_CHECK → WAITING →
//! BOARDING → BOARDED as the passenger clears each stage.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, info_span, Instrument};

use crate::actors::ferry::pool_for;
use crate::model::{Gender, PassengerState, PassengerTicket};
use crate::primitives::SecurityRequest;
use crate::state::SharedState;

pub async fn run(state: Arc<SharedState>, passenger_id: u64) {
    let ticket = check_in(&state, passenger_id);
    let span = info_span!("passenger", id = passenger_id, vip = ticket.vip, bag = ticket.bag_weight);
    async move {
        let mut ticket = ticket;
        {
            let mut stats = state.stats.lock().await;
            stats.passengers_spawned += 1;
        }

        tokio::select! {
            _ = state.port_closed.cancelled() => return,
            _ = baggage_check(&state, &mut ticket) => {}
        }

        tokio::select! {
            _ = state.port_closed.cancelled() => return,
            _ = screen(&state, &mut ticket) => {}
        }

        board(&state, &mut ticket).await;
    }
    .instrument(span)
    .await
}

fn check_in(state: &Arc<SharedState>, passenger_id: u64) -> PassengerTicket {
    let mut rng = rand::rng();
    let gender = if rng.random_bool(0.5) { Gender::Man } else { Gender::Woman };
    let vip = rng.random_range(0..100) < state.config.vip_percent;
    let bag_weight = rng.random_range(state.config.baggage_min..=state.config.baggage_max);
    PassengerTicket { id: passenger_id, gender, vip, bag_weight, state: PassengerState::CheckIn }
}

/// Spec §4.2 step 2: repeatedly read the current ferry and compare
/// `bag_weight` against its `baggage_limit`. Acceptance is evaluated
/// against whichever ferry is current at the moment of the check — this
/// passenger is not bound to the ferry that rejected it and may board a
/// different one later (spec §9's baggage-acceptance-timing open question).
async fn baggage_check(state: &Arc<SharedState>, ticket: &mut PassengerTicket) {
    ticket.state = PassengerState::BagCheck;
    loop {
        let Some(ferry_id) = *state.current_ferry.lock().await else {
            tokio::time::sleep(Duration::from_millis(10)).await;
            continue;
        };

        let limit = state.ferries.lock().await[ferry_id].baggage_limit;
        if ticket.bag_weight <= limit {
            debug!(ferry = ferry_id, bag = ticket.bag_weight, limit, "baggage accepted");
            return;
        }

        state.stats.lock().await.passengers_rejected_baggage += 1;
        debug!(ferry = ferry_id, bag = ticket.bag_weight, limit, "baggage rejected, waiting for next ferry");
        wait_for_a_different_ferry(state, ferry_id).await;
    }
}

/// Block until the dock holds a ferry other than `rejecting_ferry`, so a
/// rejected passenger retries "with the next ferry arrival" rather than
/// busy-spinning against the same fixed `baggage_limit`.
async fn wait_for_a_different_ferry(state: &Arc<SharedState>, rejecting_ferry: usize) {
    loop {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if *state.current_ferry.lock().await != Some(rejecting_ferry) {
            return;
        }
    }
}

async fn screen(state: &Arc<SharedState>, ticket: &mut PassengerTicket) {
    ticket.state = PassengerState::Waiting;
    let Ok(slot) = state.security_slots.acquire().await else { return };

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let request = SecurityRequest { passenger_id: ticket.id, gender: ticket.gender, reply: reply_tx };
    if state.security_mailbox.sender().send(request).is_err() {
        return;
    }
    let Ok(station) = reply_rx.await else { return };
    // Spec §4.2 step 3: release SECURITY_SLOTS on receipt, before the
    // screening-duration sleep — the permit bounds how many requests may be
    // in flight at the allocator, not how long a seat is occupied.
    drop(slot);
    debug!(station, "admitted to security station");

    let min_ms = state.config.security_time_min_ms;
    let max_ms = state.config.security_time_max_ms;
    let duration_ms = if max_ms > min_ms { rand::rng().random_range(min_ms..=max_ms) } else { min_ms };
    tokio::time::sleep(Duration::from_millis(duration_ms)).await;

    state.security_stations.release(station).await;
    state.stats.lock().await.passengers_screened += 1;
}

async fn board(state: &Arc<SharedState>, ticket: &mut PassengerTicket) {
    let pool = pool_for(ticket.vip);
    loop {
        tokio::select! {
            biased;
            _ = state.port_closed.cancelled() => return,
            acquired = state.ramp_slots.acquire(pool) => {
                let Ok(permit) = acquired else { return };

                let reply_rx = state.ramp_mailbox.send_request(ticket.id, pool, ticket.bag_weight);
                match reply_rx.await {
                    Ok(true) => {
                        permit.forget();
                        ticket.state = PassengerState::Boarding;
                        tokio::time::sleep(state.config.boarding_time()).await;
                        state.ramp_mailbox.send_exit(ticket.id, ticket.bag_weight, pool);
                        ticket.state = PassengerState::Boarded;
                        info!("boarded");
                        return;
                    }
                    Ok(false) => {
                        drop(permit);
                        // Ferry is full or the gate is closing; try again
                        // while this one's gate is open, or block on the
                        // next ferry's gate once its permits drain.
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        continue;
                    }
                    Err(_) => {
                        // Turn token changed hands mid-request; the permit
                        // we held was for a gate that's already closed.
                        drop(permit);
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        continue;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "passenger_tests.rs"]
mod passenger_tests;
