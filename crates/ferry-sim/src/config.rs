// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

/// Configuration for the ferry terminal simulation.
#[derive(Debug, Clone, clap::Args)]
pub struct SimConfig {
    /// Number of ferries in rotation.
    #[arg(long, default_value_t = 2, env = "FERRY_SIM_FERRY_COUNT")]
    pub ferry_count: usize,

    /// Number of passengers spawned for the run.
    #[arg(long, default_value_t = 40, env = "FERRY_SIM_PASSENGER_COUNT")]
    pub passenger_count: usize,

    /// Passenger capacity of a single ferry.
    #[arg(long, default_value_t = 10, env = "FERRY_SIM_FERRY_CAPACITY")]
    pub ferry_capacity: u32,

    /// Minimum passenger baggage weight.
    #[arg(long, default_value_t = 5, env = "FERRY_SIM_BAGGAGE_MIN")]
    pub baggage_min: u32,

    /// Maximum passenger baggage weight.
    #[arg(long, default_value_t = 30, env = "FERRY_SIM_BAGGAGE_MAX")]
    pub baggage_max: u32,

    /// Minimum per-ferry baggage limit (fixed at ferry init).
    #[arg(long, default_value_t = 15, env = "FERRY_SIM_FERRY_LIMIT_MIN")]
    pub ferry_limit_min: u32,

    /// Maximum per-ferry baggage limit (fixed at ferry init).
    #[arg(long, default_value_t = 25, env = "FERRY_SIM_FERRY_LIMIT_MAX")]
    pub ferry_limit_max: u32,

    /// Number of security screening stations.
    #[arg(long, default_value_t = 3, env = "FERRY_SIM_SECURITY_STATIONS")]
    pub security_stations: usize,

    /// Per-station concurrent occupant capacity.
    #[arg(long, default_value_t = 2, env = "FERRY_SIM_SECURITY_STATION_CAPACITY")]
    pub security_station_capacity: usize,

    /// Maximum times the allocator's internal request may be overtaken.
    #[arg(long, default_value_t = 3, env = "FERRY_SIM_MAX_FRUSTRATION")]
    pub max_frustration: u32,

    /// Regular-pool ramp capacity released at gate open.
    #[arg(long, default_value_t = 6, env = "FERRY_SIM_RAMP_CAPACITY_REGULAR")]
    pub ramp_capacity_regular: u32,

    /// VIP-pool ramp capacity released at gate open.
    #[arg(long, default_value_t = 4, env = "FERRY_SIM_RAMP_CAPACITY_VIP")]
    pub ramp_capacity_vip: u32,

    /// Time a passenger spends boarding once granted ramp access, in milliseconds.
    #[arg(long, default_value_t = 150, env = "FERRY_SIM_BOARDING_TIME_MS")]
    pub boarding_time_ms: u64,

    /// Minimum security screening duration, in milliseconds.
    #[arg(long, default_value_t = 100, env = "FERRY_SIM_SECURITY_TIME_MIN_MS")]
    pub security_time_min_ms: u64,

    /// Maximum security screening duration, in milliseconds.
    #[arg(long, default_value_t = 400, env = "FERRY_SIM_SECURITY_TIME_MAX_MS")]
    pub security_time_max_ms: u64,

    /// Wall-clock boarding window before a ferry's gate closes, in milliseconds.
    #[arg(long, default_value_t = 4000, env = "FERRY_SIM_DEPARTURE_INTERVAL_MS")]
    pub departure_interval_ms: u64,

    /// Simulated one-way travel time, in milliseconds.
    #[arg(long, default_value_t = 500, env = "FERRY_SIM_TRAVEL_TIME_MS")]
    pub travel_time_ms: u64,

    /// Upper bound (exclusive) of the randomized gate-open delay, in milliseconds.
    #[arg(long, default_value_t = 200, env = "FERRY_SIM_GATE_DELAY_MAX_MS")]
    pub gate_delay_max_ms: u64,

    /// Probability (0-100) that a passenger is spawned as VIP.
    #[arg(long, default_value_t = 20, env = "FERRY_SIM_VIP_PERCENT")]
    pub vip_percent: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "FERRY_SIM_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Optional file path to also write logs to (in addition to stdout).
    #[arg(long, env = "FERRY_SIM_LOG_FILE")]
    pub log_file: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl SimConfig {
    pub fn departure_interval(&self) -> Duration {
        Duration::from_millis(self.departure_interval_ms)
    }

    pub fn travel_time(&self) -> Duration {
        Duration::from_millis(self.travel_time_ms)
    }

    pub fn boarding_time(&self) -> Duration {
        Duration::from_millis(self.boarding_time_ms)
    }

    pub fn gate_delay_max(&self) -> Duration {
        Duration::from_millis(self.gate_delay_max_ms.max(1))
    }

    pub fn security_time_range(&self) -> (Duration, Duration) {
        (Duration::from_millis(self.security_time_min_ms), Duration::from_millis(self.security_time_max_ms))
    }

    pub fn security_slot_count(&self) -> usize {
        self.security_stations * self.security_station_capacity
    }

    /// Validate cross-field invariants that `clap` cannot express on its own.
    pub fn validate(&self) -> Result<(), crate::error::SimError> {
        if self.ferry_count == 0 {
            return Err(crate::error::SimError::InvalidConfig("ferry_count must be >= 1".into()));
        }
        if self.security_stations == 0 || self.security_station_capacity == 0 {
            return Err(crate::error::SimError::InvalidConfig(
                "security_stations and security_station_capacity must be >= 1".into(),
            ));
        }
        if self.ferry_limit_min > self.ferry_limit_max {
            return Err(crate::error::SimError::InvalidConfig(
                "ferry_limit_min must be <= ferry_limit_max".into(),
            ));
        }
        if self.baggage_min > self.baggage_max {
            return Err(crate::error::SimError::InvalidConfig("baggage_min must be <= baggage_max".into()));
        }
        if self.security_time_min_ms > self.security_time_max_ms {
            return Err(crate::error::SimError::InvalidConfig(
                "security_time_min_ms must be <= security_time_max_ms".into(),
            ));
        }
        if self.vip_percent > 100 {
            return Err(crate::error::SimError::InvalidConfig("vip_percent must be <= 100".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
