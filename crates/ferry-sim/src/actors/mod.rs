// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The four concurrent roles of the simulation. Each is a plain `tokio`
//! task spawned by [`crate::supervisor`]; none of them know about each
//! other directly, only about [`crate::state::SharedState`].

pub mod ferry;
pub mod passenger;
pub mod security;
