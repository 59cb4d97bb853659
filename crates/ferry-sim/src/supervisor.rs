// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level orchestration (spec §4.4): spin up the security allocator and
//! the ferry rotation, spawn every passenger, then race normal drain (every
//! passenger exits) against an external interrupt (Ctrl-C) before closing
//! the port and letting the ferries retire.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::actors::{ferry, passenger, security};
use crate::config::SimConfig;
use crate::model::SimulationStats;
use crate::state::SharedState;

pub async fn run(config: SimConfig) -> Result<SimulationStats, crate::error::SimError> {
    config.validate()?;

    let state = Arc::new(SharedState::new(config.clone()));
    info!(
        ferries = config.ferry_count,
        passengers = config.passenger_count,
        security_stations = config.security_stations,
        "port opening"
    );

    let security_handle = tokio::spawn(security::run(Arc::clone(&state)));

    let mut ferry_handles = Vec::with_capacity(config.ferry_count);
    for ferry_id in 0..config.ferry_count {
        ferry_handles.push(tokio::spawn(ferry::run(Arc::clone(&state), ferry_id)));
    }

    let mut passengers: JoinSet<()> = JoinSet::new();
    for passenger_id in 0..config.passenger_count as u64 {
        let state = Arc::clone(&state);
        passengers.spawn(async move {
            // Stagger arrivals instead of releasing the whole manifest at
            // once, so check-in contention looks like a real terminal.
            let jitter = rand::rng().random_range(0..50);
            tokio::time::sleep(Duration::from_millis(jitter)).await;
            passenger::run(state, passenger_id).await;
        });
    }

    // spec §4.4: two termination triggers race here. Normal drain waits for
    // every passenger to exit; an external interrupt (SIGINT) short-circuits
    // it, targets an early-depart at whichever ferry currently holds the
    // turn token, and falls through to the same port-close/drain tail.
    tokio::select! {
        _ = async { while passengers.join_next().await.is_some() {} } => {
            info!("all passengers have finished, closing port");
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupt received, signaling early departure and closing port");
            if let Some(ferry_id) = *state.current_ferry.lock().await {
                state.request_early_depart(ferry_id);
            }
        }
    }

    state.port_closed.cancel();
    // Draining again is a no-op on the normal path (the JoinSet is already
    // empty); on the interrupt path it waits out whichever passengers were
    // already mid-boarding when the signal landed, per the drain contract.
    while passengers.join_next().await.is_some() {}

    for handle in ferry_handles {
        let _ = handle.await;
    }
    let _ = security_handle.await;

    let stats = state.stats.lock().await.clone();
    Ok(stats)
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod supervisor_tests;
