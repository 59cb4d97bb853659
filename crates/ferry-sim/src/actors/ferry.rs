// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ferry manager (spec §4.1): acquires the turn token, runs one
//! boarding cycle, departs, and releases the token for the next ferry.
//!
//! A boarding cycle has three phases: a randomized gate-open delay, the
//! boarding window itself (bounded by `departure_interval` or an
//! early-departure signal), and gate close / drain. Only the ferry holding
//! the turn token ever touches `ramp_slots` or reads `ramp_mailbox` (I1),
//! so no further locking is needed around them here.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::time::interval;
use tracing::{info, info_span, warn, Instrument};

use crate::primitives::{Pool, RampEvent};
use crate::state::SharedState;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub async fn run(state: Arc<SharedState>, ferry_id: usize) {
    let span = info_span!("ferry_manager", ferry = ferry_id);
    async move {
        loop {
            tokio::select! {
                _ = state.port_closed.cancelled() => {
                    info!("port closed, ferry retiring");
                    break;
                }
                guard = state.turn_token.lock() => {
                    run_cycle(&state, ferry_id).await;
                    drop(guard);
                }
            }
        }
    }
    .instrument(span)
    .await
}

async fn run_cycle(state: &Arc<SharedState>, ferry_id: usize) {
    *state.current_ferry.lock().await = Some(ferry_id);
    {
        let mut ferries = state.ferries.lock().await;
        ferries[ferry_id].reset_for_boarding();
    }

    let gate_delay = Duration::from_millis(rand::rng().random_range(0..state.config.gate_delay_max().as_millis() as u64));
    tokio::time::sleep(gate_delay).await;

    state.ramp_slots.open_gate(state.config.ramp_capacity_regular, state.config.ramp_capacity_vip);
    info!("gate open");

    let deadline = Instant::now() + state.config.departure_interval();
    let mut ticker = interval(POLL_INTERVAL);

    // `on_ramp_usage` tracks passengers this cycle has admitted to the ramp
    // but not yet received an EXIT for (spec §4.1 step 3). The gate cannot
    // close until it reaches zero, so a straggler mid-`T_BOARD` never has
    // its EXIT delivered to the *next* ferry's cycle (P7, I5/P2).
    let mut on_ramp_usage: u32 = 0;
    let mut gate_close = false;
    let mut ramp_cleanup = false;

    loop {
        ticker.tick().await;

        if !gate_close {
            if state.early_depart[ferry_id].load(Ordering::Acquire) {
                info!("early departure signaled");
                gate_close = true;
            } else if Instant::now() >= deadline {
                gate_close = true;
            }
        }

        while let Some(event) = state.ramp_mailbox.try_recv_priority() {
            handle_event(state, ferry_id, event, &mut on_ramp_usage, gate_close, ramp_cleanup).await;
        }

        if gate_close && on_ramp_usage == 0 {
            if ramp_cleanup {
                break;
            }
            // First time the gate reads empty: raise the cleanup flag and
            // drain any permits a passenger's `acquire` grabbed in the
            // instant before the gate closed, then run one more iteration
            // to verify the mailbox is still empty before departing.
            ramp_cleanup = true;
            state.ramp_slots.drain_to_zero();
        }
    }

    state.early_depart[ferry_id].store(false, Ordering::Release);

    let mut ferries = state.ferries.lock().await;
    let ferry = &mut ferries[ferry_id];
    ferry.status = crate::model::FerryStatus::Departed;
    let boarded = ferry.passenger_count;
    drop(ferries);

    {
        let mut stats = state.stats.lock().await;
        stats.total_ferry_trips += 1;
    }
    *state.current_ferry.lock().await = None;
    info!(boarded, "gate closed, departing");

    tokio::time::sleep(state.config.travel_time()).await;

    let mut ferries = state.ferries.lock().await;
    ferries[ferry_id].status = crate::model::FerryStatus::Waiting;
    drop(ferries);
    info!("returned to dock");
}

/// Handle one ramp mailbox event. Admission (`RampEvent::Request`) is a pure
/// capacity check against `ferry_capacity - passenger_count - on_ramp_usage`
/// — baggage is enforced only at the passenger's pre-security baggage-check
/// stage, never here (spec §9: the ferry accepts an admitted passenger
/// regardless of weight). `passenger_count`, `baggage_weight_total`, and
/// `stats.passengers_boarded` are credited on `RampEvent::Exit`, once the
/// passenger has actually finished boarding, not on admission.
async fn handle_event(
    state: &Arc<SharedState>,
    ferry_id: usize,
    event: RampEvent,
    on_ramp_usage: &mut u32,
    gate_close: bool,
    ramp_cleanup: bool,
) {
    match event {
        RampEvent::Exit(exit) => {
            *on_ramp_usage = on_ramp_usage.saturating_sub(1);

            let mut ferries = state.ferries.lock().await;
            let ferry = &mut ferries[ferry_id];
            ferry.passenger_count += 1;
            ferry.baggage_weight_total += exit.weight;
            drop(ferries);

            state.stats.lock().await.passengers_boarded += 1;
            info!(passenger = exit.passenger_id, "boarded");

            // Once the gate has closed no new admissions are possible, so
            // there is nothing left to return this permit to.
            if !gate_close {
                state.ramp_slots.release(exit.pool);
            }
        }
        RampEvent::Request(req) => {
            if gate_close || ramp_cleanup {
                let _ = req.reply.send(false);
                return;
            }

            let passenger_count = state.ferries.lock().await[ferry_id].passenger_count;
            let committed = passenger_count + *on_ramp_usage;
            let available = committed < state.config.ferry_capacity;

            if available {
                *on_ramp_usage += 1;
                let _ = req.reply.send(true);
            } else if req.reply.send(false).is_err() {
                warn!(passenger = req.passenger_id, "rejected passenger's reply channel already closed");
            }
        }
    }
}

/// Resolve a passenger's pool from whether they hold a VIP ticket.
pub fn pool_for(vip: bool) -> Pool {
    if vip {
        Pool::Vip
    } else {
        Pool::Regular
    }
}

#[cfg(test)]
#[path = "ferry_tests.rs"]
mod ferry_tests;
