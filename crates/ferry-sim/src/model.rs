// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core data model: the value types every actor passes around.
//!
//! Mirrors `include/common/state.h` and `include/processes/*.h` in the
//! original simulation, translated from C structs/enums to Rust types.

use std::fmt;

/// Role tag attached to every log line, carried as a `tracing` span field
/// instead of passed as a `log(role, id, msg)` function argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    PortManager,
    FerryManager,
    Passenger,
    SecurityManager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PortManager => "PORT_MANAGER",
            Self::FerryManager => "FERRY_MANAGER",
            Self::Passenger => "PASSENGER",
            Self::SecurityManager => "SECURITY_MANAGER",
        };
        f.write_str(s)
    }
}

/// Passenger gender, used only to enforce station homogeneity (P3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Man,
    Woman,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Man => "M",
            Self::Woman => "W",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FerryStatus {
    Waiting,
    Boarding,
    Departed,
    Traveling,
}

/// Per-ferry state, held inside the `FERRIES_MUTEX` partition.
#[derive(Debug, Clone)]
pub struct FerryState {
    pub id: usize,
    /// Fixed at init; never changes across the ferry's trips.
    pub baggage_limit: u32,
    pub passenger_count: u32,
    pub baggage_weight_total: u32,
    pub status: FerryStatus,
}

impl FerryState {
    pub fn new(id: usize, baggage_limit: u32) -> Self {
        Self { id, baggage_limit, passenger_count: 0, baggage_weight_total: 0, status: FerryStatus::Waiting }
    }

    pub fn reset_for_boarding(&mut self) {
        self.status = FerryStatus::Boarding;
        self.passenger_count = 0;
        self.baggage_weight_total = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerState {
    CheckIn,
    BagCheck,
    Waiting,
    Boarding,
    Boarded,
}

/// Actor-local ticket; never shared across tasks.
#[derive(Debug, Clone)]
pub struct PassengerTicket {
    pub id: u64,
    pub gender: Gender,
    pub vip: bool,
    pub bag_weight: u32,
    pub state: PassengerState,
}

/// Aggregate run statistics, held inside the `STATS_MUTEX` partition.
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    pub passengers_spawned: u64,
    pub passengers_boarded: u64,
    pub passengers_rejected_baggage: u64,
    pub total_ferry_trips: u64,
    /// Present in `original_source/include/common/state.h` but dropped from
    /// the distilled spec's prose; kept as ambient instrumentation (see
    /// SPEC_FULL.md §3/§9).
    pub passengers_screened: u64,
}
