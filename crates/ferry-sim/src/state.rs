// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::{Mutex, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::config::SimConfig;
use crate::model::{FerryState, SimulationStats};
use crate::primitives::{RampMailbox, RampSlots, SecurityMailbox, SecurityStations};

/// Everything every actor needs a handle to, mirroring the original
/// simulation's single shared-memory segment plus its semaphore/message
/// queue set. Partitioned into separately-locked fields (rather than one
/// big mutex) so unrelated actors never contend with each other — `ferries`
/// contention is limited to the ferry currently holding the turn token and
/// the port manager's periodic summary; `stats` is touched by every actor
/// but only ever for a counter bump.
pub struct SharedState {
    pub config: SimConfig,

    /// The "turn token": held for the full duration of one ferry's boarding
    /// cycle. Mutual exclusion, not data protection — the guarded `()` has
    /// no state of its own (I1).
    pub turn_token: Mutex<()>,

    /// Which ferry currently holds the turn token, if any. Read by
    /// passengers to address their ramp request to the right mailbox
    /// consumer (there is only one `RampMailbox`, but the id is used for
    /// logging/stat attribution).
    pub current_ferry: Mutex<Option<usize>>,

    pub ferries: Mutex<Vec<FerryState>>,
    pub stats: Mutex<SimulationStats>,

    pub ramp_slots: RampSlots,
    pub ramp_mailbox: RampMailbox,
    pub security_stations: SecurityStations,
    pub security_mailbox: SecurityMailbox,

    /// `SECURITY_SLOTS`: bounds how many passengers may be in flight at the
    /// security checkpoint (queued or seated) to `stations * capacity`,
    /// mirroring the original's counting semaphore of the same name. Station
    /// occupancy alone already enforces per-station capacity; this permit
    /// additionally caps how many requests the allocator's pending queue may
    /// accumulate, matching spec §2's separate `SECURITY_SLOTS` primitive.
    pub security_slots: Semaphore,

    /// Cancelled once the last passenger has finished (or the run is torn
    /// down early); every actor selects on this to unwind.
    pub port_closed: CancellationToken,

    /// One flag per ferry; set by the supervisor's early-departure trigger
    /// to interrupt only the ferry currently boarding, without touching the
    /// others (original: per-process `SIGUSR1`, here: a polled atomic since
    /// signals have no Rust-async analogue worth reaching for).
    pub early_depart: Vec<AtomicBool>,
}

impl SharedState {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = rand::rng();
        let ferries = (0..config.ferry_count)
            .map(|id| FerryState::new(id, rng.random_range(config.ferry_limit_min..=config.ferry_limit_max)))
            .collect();
        let early_depart = (0..config.ferry_count).map(|_| AtomicBool::new(false)).collect();
        let security_stations = SecurityStations::new(config.security_stations, config.security_station_capacity);
        let security_slots = Semaphore::new(config.security_slot_count());

        Self {
            turn_token: Mutex::new(()),
            current_ferry: Mutex::new(None),
            ferries: Mutex::new(ferries),
            stats: Mutex::new(SimulationStats::default()),
            ramp_slots: RampSlots::new(),
            ramp_mailbox: RampMailbox::new(),
            security_stations,
            security_mailbox: SecurityMailbox::new(),
            security_slots,
            port_closed: CancellationToken::new(),
            early_depart,
            config,
        }
    }

    pub fn request_early_depart(&self, ferry_id: usize) {
        if let Some(flag) = self.early_depart.get(ferry_id) {
            flag.store(true, std::sync::atomic::Ordering::Release);
        }
    }
}

pub type SharedStateHandle = Arc<SharedState>;

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
