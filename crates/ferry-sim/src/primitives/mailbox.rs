// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Priority mailboxes: `SECURITY` (single priority class) and `RAMP`
//! (EXIT < VIP_REQ < REGULAR_REQ). Replies are not tag-matched against a
//! shared queue — each request carries its own `oneshot` reply channel,
//! which is the idiomatic Rust equivalent of "reply tagged by requester ID"
//! (spec §2: "any structure that supports receive-highest-priority-first
//! ... suffices").

use tokio::sync::{mpsc, oneshot};

use crate::model::Gender;
use crate::primitives::ramp_slots::Pool;

/// A passenger's request to be screened, with gender used for station
/// homogeneity. The allocator replies with the index of the station the
/// passenger was admitted to; the passenger calls `SecurityStations::release`
/// with that index once screening completes.
pub struct SecurityRequest {
    pub passenger_id: u64,
    pub gender: Gender,
    pub reply: oneshot::Sender<usize>,
}

/// Single-priority-class mailbox: `tag == 1` on the inbound path (spec §3).
pub struct SecurityMailbox {
    tx: mpsc::UnboundedSender<SecurityRequest>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<SecurityRequest>>,
}

impl SecurityMailbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx: tokio::sync::Mutex::new(rx) }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<SecurityRequest> {
        self.tx.clone()
    }

    /// Blocking receive; only the allocator task calls this.
    pub async fn recv(&self) -> Option<SecurityRequest> {
        self.rx.lock().await.recv().await
    }

    /// Non-blocking receive.
    pub fn try_recv(&self) -> Result<SecurityRequest, mpsc::error::TryRecvError> {
        match self.rx.try_lock() {
            Ok(mut rx) => rx.try_recv(),
            Err(_) => Err(mpsc::error::TryRecvError::Empty),
        }
    }
}

impl Default for SecurityMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// A ramp-exit notification: the passenger has finished boarding and is
/// leaving the ramp area (spec §4.1 step 2, `RAMP_MESSAGE_EXIT`).
pub struct RampExit {
    pub passenger_id: u64,
    pub weight: u32,
    pub pool: Pool,
}

/// A ramp admission request, carrying the reply channel for the ferry's
/// approve/reject decision.
pub struct RampRequest {
    pub passenger_id: u64,
    pub pool: Pool,
    pub weight: u32,
    pub reply: oneshot::Sender<bool>,
}

/// What the ferry's non-blocking priority receive yields.
pub enum RampEvent {
    Exit(RampExit),
    Request(RampRequest),
}

/// Three priority-ordered channels: EXIT (highest), VIP_REQ, REGULAR_REQ
/// (lowest). Only the currently-boarding ferry ever reads from this mailbox,
/// which is safe because the turn token guarantees single-ferry occupancy.
pub struct RampMailbox {
    exit_tx: mpsc::UnboundedSender<RampExit>,
    exit_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<RampExit>>,
    vip_tx: mpsc::UnboundedSender<RampRequest>,
    vip_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<RampRequest>>,
    regular_tx: mpsc::UnboundedSender<RampRequest>,
    regular_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<RampRequest>>,
}

impl RampMailbox {
    pub fn new() -> Self {
        let (exit_tx, exit_rx) = mpsc::unbounded_channel();
        let (vip_tx, vip_rx) = mpsc::unbounded_channel();
        let (regular_tx, regular_rx) = mpsc::unbounded_channel();
        Self {
            exit_tx,
            exit_rx: tokio::sync::Mutex::new(exit_rx),
            vip_tx,
            vip_rx: tokio::sync::Mutex::new(vip_rx),
            regular_tx,
            regular_rx: tokio::sync::Mutex::new(regular_rx),
        }
    }

    pub fn send_exit(&self, passenger_id: u64, weight: u32, pool: Pool) {
        // This channel's receiver lives as long as `SharedState` and is read
        // by whichever ferry currently holds the turn token; it is never
        // dropped between cycles. A passenger that sends after its boarding
        // ferry has already torn down its cycle relies on `on_ramp_usage`
        // gating gate-close, not on the receiver disappearing, to keep a
        // late EXIT from crediting the wrong ferry's cycle.
        let _ = self.exit_tx.send(RampExit { passenger_id, weight, pool });
    }

    pub fn send_request(&self, passenger_id: u64, pool: Pool, weight: u32) -> oneshot::Receiver<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = RampRequest { passenger_id, pool, weight, reply: reply_tx };
        let sent = match pool {
            Pool::Vip => self.vip_tx.send(request),
            Pool::Regular => self.regular_tx.send(request),
        };
        // If the ferry mailbox has no reader left, drop the sender side so
        // the caller observes a closed channel rather than hanging forever.
        if sent.is_err() {
            let (tx, rx) = oneshot::channel();
            drop(tx);
            return rx;
        }
        reply_rx
    }

    /// Non-blocking receive, honoring EXIT > VIP_REQ > REGULAR_REQ priority
    /// with FIFO delivery within each class (spec §5 ordering guarantees).
    pub fn try_recv_priority(&self) -> Option<RampEvent> {
        if let Ok(mut rx) = self.exit_rx.try_lock() {
            if let Ok(exit) = rx.try_recv() {
                return Some(RampEvent::Exit(exit));
            }
        }
        if let Ok(mut rx) = self.vip_rx.try_lock() {
            if let Ok(req) = rx.try_recv() {
                return Some(RampEvent::Request(req));
            }
        }
        if let Ok(mut rx) = self.regular_rx.try_lock() {
            if let Ok(req) = rx.try_recv() {
                return Some(RampEvent::Request(req));
            }
        }
        None
    }
}

impl Default for RampMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "mailbox_tests.rs"]
mod mailbox_tests;
