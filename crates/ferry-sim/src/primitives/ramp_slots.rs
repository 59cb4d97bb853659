// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dual-pool ramp admission permits (`RAMP_SLOTS[2]` in spec §2).
//!
//! `tokio::sync::Semaphore` has no "set to value" or "drain to zero"
//! operation, so this wraps a pair of semaphores with the two helpers the
//! dock-turn coordinator needs at gate-open and gate-close (spec §4.1).

use tokio::sync::{Semaphore, TryAcquireError};

/// One counting-permit pool per ramp priority class.
pub struct RampSlots {
    regular: Semaphore,
    vip: Semaphore,
}

/// Which pool a ramp admission permit is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Regular,
    Vip,
}

impl RampSlots {
    pub fn new() -> Self {
        Self { regular: Semaphore::new(0), vip: Semaphore::new(0) }
    }

    fn pool(&self, pool: Pool) -> &Semaphore {
        match pool {
            Pool::Regular => &self.regular,
            Pool::Vip => &self.vip,
        }
    }

    /// Acquire one permit from `pool`, blocking until available or the
    /// semaphore is closed.
    pub async fn acquire(&self, pool: Pool) -> Result<tokio::sync::SemaphorePermit<'_>, tokio::sync::AcquireError> {
        self.pool(pool).acquire().await
    }

    /// Release one permit back into `pool` without going through a held
    /// `SemaphorePermit` (used by the ferry to open a fresh slot on EXIT).
    pub fn release(&self, pool: Pool) {
        self.pool(pool).add_permits(1);
    }

    /// Non-blocking decrement-to-zero of a single pool: try-acquire
    /// repeatedly, forgetting each permit, until the pool would block.
    /// Mirrors the original's `semop(..., IPC_NOWAIT)` drain loop.
    fn drain_pool_to_zero(pool: &Semaphore) {
        loop {
            match pool.try_acquire() {
                Ok(permit) => permit.forget(),
                Err(TryAcquireError::NoPermits) | Err(TryAcquireError::Closed) => break,
            }
        }
    }

    /// Drain both pools to zero. Called at boarding-loop termination.
    pub fn drain_to_zero(&self) {
        Self::drain_pool_to_zero(&self.regular);
        Self::drain_pool_to_zero(&self.vip);
    }

    /// Set-to-value for both pools at gate open (spec §4.1: "atomic
    /// set-to-value, no retry loop; this is the only writer between ferries
    /// due to I1"). Implemented as drain-then-add since the semaphore API
    /// has no direct setter; safe because I1 guarantees no other ferry
    /// touches these permits while one ferry owns the turn token.
    pub fn open_gate(&self, regular: u32, vip: u32) {
        self.drain_to_zero();
        self.regular.add_permits(regular as usize);
        self.vip.add_permits(vip as usize);
    }

    #[cfg(test)]
    pub fn available(&self, pool: Pool) -> usize {
        self.pool(pool).available_permits()
    }
}

impl Default for RampSlots {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "ramp_slots_tests.rs"]
mod ramp_slots_tests;
