// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use clap::Parser;
use tracing::error;

use ferry_sim::config::{LogFormat, SimConfig};

/// Either stdout or an append-mode log file, picked once at startup from
/// `--log-file`. `tracing_subscriber::fmt` needs one concrete writer type,
/// so this stands in for whichever the config picked.
enum LogSink {
    Stdout(io::Stdout),
    File(File),
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(s) => s.write(buf),
            Self::File(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(s) => s.flush(),
            Self::File(f) => f.flush(),
        }
    }
}

#[tokio::main]
async fn main() {
    let config = SimConfig::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let sink = match &config.log_file {
        Some(path) => match File::options().create(true).append(true).open(path) {
            Ok(file) => LogSink::File(file),
            Err(e) => {
                eprintln!("failed to open log file {}: {e}", path.display());
                std::process::exit(ferry_sim::SimError::ResourceInit(String::new()).exit_code());
            }
        },
        None => LogSink::Stdout(io::stdout()),
    };

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(Mutex::new(sink));
    match config.log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    match ferry_sim::run(config).await {
        Ok(stats) => {
            println!(
                "spawned={} boarded={} rejected_baggage={} screened={} ferry_trips={}",
                stats.passengers_spawned,
                stats.passengers_boarded,
                stats.passengers_rejected_baggage,
                stats.passengers_screened,
                stats.total_ferry_trips
            );
        }
        Err(e) => {
            error!("fatal: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
