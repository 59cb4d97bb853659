// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ferry terminal concurrency simulation.
//!
//! Models a port with a rotating fleet of ferries, a security checkpoint,
//! and a stream of passengers, using `tokio` tasks and synchronization
//! primitives in place of the original simulation's processes, System V
//! semaphores, and message queues. See SPEC_FULL.md for the full mapping.

pub mod actors;
pub mod config;
pub mod error;
pub mod model;
pub mod primitives;
pub mod state;
pub mod supervisor;

pub use config::SimConfig;
pub use error::SimError;
pub use model::SimulationStats;

/// Run one full simulation to completion and return the aggregate stats.
pub async fn run(config: SimConfig) -> Result<SimulationStats, SimError> {
    supervisor::run(config).await
}
