// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The security checkpoint: `security_stations` fixed booths, each holding
//! up to `security_station_capacity` occupants of a single gender at a time
//! (P3: station homogeneity). An empty station's gender is unset and the
//! next arrival claims it.

use tokio::sync::{Mutex, Notify};

use crate::model::Gender;

struct Station {
    occupants: usize,
    gender: Option<Gender>,
}

pub struct SecurityStations {
    stations: Vec<Mutex<Station>>,
    capacity: usize,
    /// Woken on every release so the allocator can retry admission instead
    /// of busy-polling.
    pub notify: Notify,
}

impl SecurityStations {
    pub fn new(station_count: usize, capacity: usize) -> Self {
        let stations = (0..station_count).map(|_| Mutex::new(Station { occupants: 0, gender: None })).collect();
        Self { stations, capacity, notify: Notify::new() }
    }

    /// Try to seat one passenger of `gender`. Returns the station index on
    /// success.
    pub async fn try_admit(&self, gender: Gender) -> Option<usize> {
        for (idx, station) in self.stations.iter().enumerate() {
            let mut s = station.lock().await;
            let compatible = s.gender.map_or(true, |g| g == gender);
            if compatible && s.occupants < self.capacity {
                s.gender = Some(gender);
                s.occupants += 1;
                return Some(idx);
            }
        }
        None
    }

    /// Vacate one seat at `station_idx`. Clears the station's gender lock
    /// once the last occupant leaves.
    pub async fn release(&self, station_idx: usize) {
        let mut s = self.stations[station_idx].lock().await;
        s.occupants = s.occupants.saturating_sub(1);
        if s.occupants == 0 {
            s.gender = None;
        }
        drop(s);
        self.notify.notify_waiters();
    }
}

#[cfg(test)]
#[path = "security_stations_tests.rs"]
mod security_stations_tests;
