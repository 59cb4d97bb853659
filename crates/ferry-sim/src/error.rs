// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Fatal error conditions the supervisor can observe.
///
/// Capacity exhaustion (full ferry, full ramp, rejected baggage) is not an
/// error per spec §7 — it is surfaced through `stats` and protocol retries,
/// never through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A configuration value failed cross-field validation.
    InvalidConfig(String),
    /// A rendezvous primitive could not be constructed at startup.
    ResourceInit(String),
    /// An actor observed shared state that contradicts an invariant it
    /// believed held (spec §7: "the actor logs and exits non-zero").
    InvariantViolation(String),
}

impl SimError {
    /// Process exit code a collaborator (shell, CI) should observe.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) => 2,
            Self::ResourceInit(_) => 3,
            Self::InvariantViolation(_) => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ResourceInit(_) => "RESOURCE_INIT",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) | Self::ResourceInit(msg) | Self::InvariantViolation(msg) => {
                write!(f, "{}: {msg}", self.as_str())
            }
        }
    }
}

impl std::error::Error for SimError {}
