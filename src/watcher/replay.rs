//! Replay watcher - plays back recorded samples.
//!
//! A [`PositionWatcher`] implementation backed by a fixed list of samples,
//! delivered on a background task at a configurable cadence. Used by the
//! `swetrack-replay` binary and as a reference implementation of the
//! watcher contract.
//!
//! When the recording is exhausted the watcher surfaces
//! [`WatchFailure::SignalUnavailable`], mirroring a receiver losing its
//! fix.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::{
    PositionSample, PositionWatcher, ProbeCallback, WatchCallbacks, WatchFailure, WatchHandle,
    WatchOptions,
};

/// Configuration for the replay watcher.
#[derive(Debug, Clone)]
pub struct ReplayWatcherConfig {
    /// Delay between delivered samples.
    pub sample_interval: Duration,
}

impl Default for ReplayWatcherConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_secs(1),
        }
    }
}

struct ReplayState {
    next_handle: u64,
    active: Option<(WatchHandle, JoinHandle<()>)>,
}

/// Plays back a recorded track through the watcher contract.
pub struct ReplayWatcher {
    samples: Vec<PositionSample>,
    config: ReplayWatcherConfig,
    state: Mutex<ReplayState>,
}

impl ReplayWatcher {
    /// Create a replay watcher over a recorded track.
    pub fn new(samples: Vec<PositionSample>) -> Self {
        Self::with_config(samples, ReplayWatcherConfig::default())
    }

    /// Create with custom playback cadence.
    pub fn with_config(samples: Vec<PositionSample>, config: ReplayWatcherConfig) -> Self {
        Self {
            samples,
            config,
            state: Mutex::new(ReplayState {
                next_handle: 1,
                active: None,
            }),
        }
    }
}

impl PositionWatcher for ReplayWatcher {
    fn start(&self, _options: WatchOptions, callbacks: WatchCallbacks) -> WatchHandle {
        let mut state = self.state.lock().unwrap();

        // Starting while started: hand back the running subscription.
        if let Some((handle, _)) = state.active {
            tracing::debug!(%handle, "Replay watch already running");
            return handle;
        }

        let handle = WatchHandle(state.next_handle);
        state.next_handle += 1;

        let samples = self.samples.clone();
        let interval = self.config.sample_interval;
        let task = tokio::spawn(async move {
            for sample in samples {
                tokio::time::sleep(interval).await;
                (callbacks.on_sample)(handle, sample);
            }
            // Recording exhausted: report signal loss once.
            tokio::time::sleep(interval).await;
            (callbacks.on_failure)(handle, WatchFailure::SignalUnavailable);
        });

        state.active = Some((handle, task));
        tracing::debug!(%handle, "Replay watch started");
        handle
    }

    fn stop(&self, handle: WatchHandle) {
        let mut state = self.state.lock().unwrap();
        match state.active.take() {
            Some((active_handle, task)) if active_handle == handle => {
                task.abort();
                tracing::debug!(%handle, "Replay watch stopped");
            }
            other => {
                // Unknown or already-stopped handle: put back whatever ran.
                state.active = other;
            }
        }
    }

    fn probe_once(&self, _options: WatchOptions, on_result: ProbeCallback) {
        // One-shot: answer with the head of the recording, no subscription.
        match self.samples.first().cloned() {
            Some(sample) => on_result(Ok(sample)),
            None => on_result(Err(WatchFailure::SignalUnavailable)),
        }
    }
}
