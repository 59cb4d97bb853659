// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendezvous primitives: the counting permits and priority mailboxes that
//! stand in for the original simulation's System V semaphores and message
//! queues. See SPEC_FULL.md §2 for the mapping table.

pub mod mailbox;
pub mod ramp_slots;
pub mod security_stations;

pub use mailbox::{RampEvent, RampExit, RampMailbox, RampRequest, SecurityMailbox, SecurityRequest};
pub use ramp_slots::{Pool, RampSlots};
pub use security_stations::SecurityStations;
