// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end smoke tests that spawn the real `ferry-sim` binary and check
//! its exit code and final stats line against the scenarios in
//! SPEC_FULL.md §8.

use std::time::Duration;

use ferry_sim_specs::SimBuilder;

const TIMEOUT: Duration = Duration::from_secs(20);

#[tokio::test]
async fn clean_run_exits_zero_and_boards_everyone_who_fits() -> anyhow::Result<()> {
    let (code, stats) = SimBuilder::default().passenger_count(10).run(TIMEOUT).await?;
    assert_eq!(code, 0);
    let stats = stats.expect("stdout should contain a stats summary line");
    assert_eq!(stats.spawned, 10);
    assert!(stats.boarded <= stats.spawned);
    assert!(stats.ferry_trips >= 1);

    Ok(())
}

#[tokio::test]
async fn single_ferry_still_completes_the_manifest() -> anyhow::Result<()> {
    let (code, stats) = SimBuilder::default().ferry_count(1).passenger_count(6).run(TIMEOUT).await?;
    assert_eq!(code, 0);
    let stats = stats.expect("stdout should contain a stats summary line");
    assert_eq!(stats.spawned, 6);

    Ok(())
}

#[tokio::test]
async fn rejects_invalid_config_before_spawning_any_actor() -> anyhow::Result<()> {
    let (code, stats) = SimBuilder::default().arg("--ferry-count", "0").run(TIMEOUT).await?;
    assert_eq!(code, 2, "ferry_count=0 should fail SimConfig::validate with INVALID_CONFIG's exit code");
    assert!(stats.is_none(), "an invalid config should never reach the point of printing a stats line");

    Ok(())
}

#[tokio::test]
async fn large_manifest_exercises_retry_and_security_contention() -> anyhow::Result<()> {
    let (code, stats) = SimBuilder::default()
        .passenger_count(40)
        .arg("--ferry-capacity", "6")
        .arg("--security-stations", "2")
        .arg("--security-station-capacity", "2")
        .run(TIMEOUT)
        .await?;
    assert_eq!(code, 0);
    let stats = stats.expect("stdout should contain a stats summary line");
    assert_eq!(stats.spawned, 40);
    assert!(stats.screened <= stats.spawned);

    Ok(())
}
