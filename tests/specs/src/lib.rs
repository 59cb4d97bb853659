// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness for end-to-end binary smoke tests.
//!
//! Spawns the real `ferry-sim` binary as a subprocess with a small,
//! deterministic-ish scenario config, and asserts on its exit code and the
//! final stats line it prints to stdout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Resolve the path to the compiled `ferry-sim` binary.
pub fn ferry_sim_binary() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    // tests/specs → tests → workspace root
    let workspace = manifest.parent().and_then(|p| p.parent()).unwrap_or(manifest);
    workspace.join("target").join("debug").join("ferry-sim")
}

/// The parsed final-summary line `ferry-sim` prints on a clean exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimStats {
    pub spawned: u64,
    pub boarded: u64,
    pub rejected_baggage: u64,
    pub screened: u64,
    pub ferry_trips: u64,
}

fn parse_stats(stdout: &str) -> Option<SimStats> {
    let line = stdout.lines().rev().find(|l| l.starts_with("spawned="))?;
    let fields: HashMap<&str, u64> = line
        .split_whitespace()
        .filter_map(|kv| {
            let (k, v) = kv.split_once('=')?;
            Some((k, v.parse().ok()?))
        })
        .collect();
    Some(SimStats {
        spawned: *fields.get("spawned")?,
        boarded: *fields.get("boarded")?,
        rejected_baggage: *fields.get("rejected_baggage")?,
        screened: *fields.get("screened")?,
        ferry_trips: *fields.get("ferry_trips")?,
    })
}

/// Builder for a `ferry-sim` invocation, defaulting to a small scenario
/// sized for a fast test run.
pub struct SimBuilder {
    args: Vec<String>,
}

impl Default for SimBuilder {
    fn default() -> Self {
        Self {
            args: vec![
                "--ferry-count".into(),
                "2".into(),
                "--passenger-count".into(),
                "12".into(),
                "--ferry-capacity".into(),
                "4".into(),
                "--security-stations".into(),
                "2".into(),
                "--security-station-capacity".into(),
                "1".into(),
                "--departure-interval-ms".into(),
                "300".into(),
                "--travel-time-ms".into(),
                "50".into(),
                "--boarding-time-ms".into(),
                "10".into(),
                "--security-time-min-ms".into(),
                "10".into(),
                "--security-time-max-ms".into(),
                "30".into(),
                "--gate-delay-max-ms".into(),
                "20".into(),
            ],
        }
    }
}

impl SimBuilder {
    pub fn arg(mut self, flag: &str, value: &str) -> Self {
        self.args.push(flag.to_owned());
        self.args.push(value.to_owned());
        self
    }

    pub fn passenger_count(self, count: u32) -> Self {
        self.arg("--passenger-count", &count.to_string())
    }

    pub fn ferry_count(self, count: u32) -> Self {
        self.arg("--ferry-count", &count.to_string())
    }

    /// Run to completion and return (exit code, parsed stats).
    pub async fn run(self, timeout: Duration) -> anyhow::Result<(i32, Option<SimStats>)> {
        let binary = ferry_sim_binary();
        anyhow::ensure!(binary.exists(), "ferry-sim binary not found at {}", binary.display());

        let output = tokio::time::timeout(
            timeout,
            Command::new(&binary)
                .args(&self.args)
                .env("RUST_LOG", "warn")
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await??;

        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok((code, parse_stats(&stdout)))
    }
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn parses_a_stats_line() {
        let stats = parse_stats("spawned=12 boarded=9 rejected_baggage=1 screened=11 ferry_trips=4\n").unwrap();
        assert_eq!(stats.spawned, 12);
        assert_eq!(stats.boarded, 9);
        assert_eq!(stats.ferry_trips, 4);
    }
}
