// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The security-manager allocator (spec §4.3): a single task owns the
//! `SECURITY` mailbox and the station bank, admitting passengers in
//! arrival order except where bounded overtaking (`max_frustration`) lets
//! a later-arriving, station-compatible passenger go first rather than
//! block the whole queue on a single gender mismatch.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use crate::primitives::SecurityRequest;
use crate::state::SharedState;

struct Pending {
    request: SecurityRequest,
    /// Number of later arrivals that were admitted ahead of this one.
    overtaken: u32,
}

/// Runs until the security mailbox closes (all senders dropped, which
/// happens once every passenger task has exited and the supervisor drops
/// its own sender handle).
pub async fn run(state: Arc<SharedState>) {
    let span = info_span!("security_manager");
    async move {
        let mut pending: VecDeque<Pending> = VecDeque::new();
        loop {
            if pending.is_empty() {
                tokio::select! {
                    _ = state.port_closed.cancelled() => break,
                    request = state.security_mailbox.recv() => {
                        match request {
                            Some(request) => pending.push_back(Pending { request, overtaken: 0 }),
                            None => break,
                        }
                    }
                }
            }
            while let Ok(request) = state.security_mailbox.try_recv() {
                pending.push_back(Pending { request, overtaken: 0 });
            }

            match admit_one(&state, &mut pending).await {
                true => continue,
                false => {
                    // Nobody in the queue can be seated right now; wait for
                    // a release or a new arrival instead of spinning.
                    tokio::select! {
                        _ = state.security_stations.notify.notified() => {}
                        request = state.security_mailbox.recv() => {
                            match request {
                                Some(request) => pending.push_back(Pending { request, overtaken: 0 }),
                                None if pending.is_empty() => break,
                                None => {}
                            }
                        }
                    }
                }
            }
        }
        // Drain whatever the queue holds so waiting passengers don't hang
        // on a dropped oneshot forever — a closed channel is a clean signal
        // to the passenger task that the port is shutting down.
        drop(pending);
        debug!("security manager shutting down");
    }
    .instrument(span)
    .await
}

/// Try to seat exactly one pending passenger. Honors the frustration bound:
/// once a request has been overtaken `max_frustration` times it becomes
/// strictly head-of-line and no other request may be served before it,
/// even if that request isn't station-compatible yet.
async fn admit_one(state: &Arc<SharedState>, pending: &mut VecDeque<Pending>) -> bool {
    let head_of_line = pending.front().is_some_and(|front| front.overtaken >= state.config.max_frustration);
    if head_of_line {
        if let Some(Pending { request, .. }) = pending.pop_front() {
            let station = loop {
                if let Some(idx) = state.security_stations.try_admit(request.gender).await {
                    break idx;
                }
                state.security_stations.notify.notified().await;
            };
            let _ = request.reply.send(station);
            return true;
        }
    }

    for i in 0..pending.len() {
        if let Some(station) = state.security_stations.try_admit(pending[i].request.gender).await {
            for skipped in pending.iter_mut().take(i) {
                skipped.overtaken += 1;
            }
            if let Some(Pending { request, .. }) = pending.remove(i) {
                let _ = request.reply.send(station);
            }
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "security_tests.rs"]
mod security_tests;
