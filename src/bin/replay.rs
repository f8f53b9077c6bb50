//! Replay a recorded track through the full tracking pipeline.
//!
//! Reads `lat,lon[,accuracy[,speed]]` lines from a file (or a built-in
//! demo track), runs them through the lifecycle controller and prints the
//! drift-corrected SWEREF 99 TM coordinate for each sample. Useful for
//! verifying the pipeline end to end without a live receiver.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use swetrack::config::TrackerConfig;
use swetrack::logging::init_logging;
use swetrack::projection::{CoordinateTransformer, GaussKruger};
use swetrack::tracking::{TrackingController, TrackingEvent};
use swetrack::watcher::{PositionSample, ReplayWatcher, ReplayWatcherConfig};

#[derive(Parser, Debug)]
#[command(name = "swetrack-replay", version = swetrack::VERSION)]
#[command(about = "Replay a recorded track as SWEREF 99 TM coordinates")]
struct Args {
    /// Track file with one `lat,lon[,accuracy[,speed]]` sample per line.
    /// Omit to replay a short built-in Stockholm track.
    #[arg(short, long)]
    track: Option<PathBuf>,

    /// Milliseconds between replayed samples.
    #[arg(short, long, default_value_t = 500)]
    interval_ms: u64,

    /// Directory for the session log file.
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _guard = match init_logging(&args.log_dir, "swetrack-replay.log") {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("failed to initialize logging: {error}");
            return ExitCode::FAILURE;
        }
    };

    let samples = match load_track(&args) {
        Ok(samples) => samples,
        Err(error) => {
            eprintln!("failed to load track: {error}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(samples = samples.len(), "Track loaded");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to start runtime: {error}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(replay(samples, args.interval_ms));
    ExitCode::SUCCESS
}

async fn replay(samples: Vec<PositionSample>, interval_ms: u64) {
    let watcher = Arc::new(ReplayWatcher::with_config(
        samples,
        ReplayWatcherConfig {
            sample_interval: Duration::from_millis(interval_ms),
        },
    ));

    let config = TrackerConfig::default();
    let transformer = CoordinateTransformer::from_config(Arc::new(GaussKruger::sweref99tm()), &config);
    let controller = TrackingController::new(watcher, transformer, config);

    let mut events = controller.subscribe();
    controller.start();

    while let Ok(event) = events.recv().await {
        match event {
            TrackingEvent::SampleProcessed { sample, coordinate } => {
                println!(
                    "{:>9.5} {:>9.5}  ->  {}",
                    sample.latitude, sample.longitude, coordinate
                );
            }
            TrackingEvent::OutOfRegionWarning => {
                println!("  (outside supported region)");
            }
            TrackingEvent::LoadingChanged(visible) => {
                tracing::debug!(visible, "Loading indicator changed");
            }
            TrackingEvent::Error(message) => {
                // The replay watcher reports signal loss when the
                // recording runs out; that ends the session.
                tracing::info!(%message, "Replay finished");
                controller.stop();
            }
            TrackingEvent::Reset => break,
        }
    }
}

fn load_track(args: &Args) -> Result<Vec<PositionSample>, String> {
    let Some(path) = &args.track else {
        return Ok(demo_track());
    };

    let content =
        fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;

    let mut samples = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        samples.push(parse_sample(line).map_err(|e| format!("line {}: {e}", index + 1))?);
    }

    if samples.is_empty() {
        return Err("track contains no samples".into());
    }
    Ok(samples)
}

fn parse_sample(line: &str) -> Result<PositionSample, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 2 {
        return Err("expected at least lat,lon".into());
    }

    let parse = |name: &str, value: &str| -> Result<f64, String> {
        value
            .parse::<f64>()
            .map_err(|_| format!("invalid {name}: {value}"))
    };

    let latitude = parse("latitude", fields[0])?;
    let longitude = parse("longitude", fields[1])?;
    let accuracy = match fields.get(2) {
        Some(value) => parse("accuracy", value)?,
        None => 10.0,
    };

    let mut sample = PositionSample::new(latitude, longitude, accuracy);
    if let Some(value) = fields.get(3) {
        sample = sample.with_speed(parse("speed", value)?);
    }
    Ok(sample)
}

/// A short walk along Strandvägen in Stockholm.
fn demo_track() -> Vec<PositionSample> {
    [
        (59.3293, 18.0686),
        (59.3299, 18.0741),
        (59.3310, 18.0801),
        (59.3322, 18.0863),
        (59.3328, 18.0925),
    ]
    .into_iter()
    .map(|(lat, lon)| PositionSample::new(lat, lon, 5.0).with_speed(1.4))
    .collect()
}
