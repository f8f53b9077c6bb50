//! Lifecycle controller - owns the tracking session state machine.
//!
//! The controller is the only component that mutates the session. Every
//! watcher callback and public operation runs to completion under a single
//! lock acquisition, so no transition is ever observable half-done. Watcher
//! callbacks carry the handle of the subscription that produced them; the
//! controller discards anything from a watch it has already released, which
//! closes the race between an in-flight callback and a user-initiated stop.
//!
//! Session lock acquisitions use `unwrap()`: nothing panics while holding
//! the lock, so poisoning cannot occur.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::TrackerConfig;
use crate::projection::CoordinateTransformer;
use crate::watcher::{
    PositionSample, PositionWatcher, WatchCallbacks, WatchFailure, WatchHandle,
};

use super::events::TrackingEvent;
use super::state::{TrackingSession, TrackingState};

/// Capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Owns the tracking session: starts, stops and restores the location
/// watch, runs each sample through the coordinate transformer, and emits
/// [`TrackingEvent`]s for presentation layers.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct TrackingController {
    session: Arc<RwLock<TrackingSession>>,
    watcher: Arc<dyn PositionWatcher>,
    transformer: Arc<CoordinateTransformer>,
    events_tx: broadcast::Sender<TrackingEvent>,
    config: TrackerConfig,
}

impl TrackingController {
    /// Create a controller over a watcher and transformer.
    pub fn new(
        watcher: Arc<dyn PositionWatcher>,
        transformer: CoordinateTransformer,
        config: TrackerConfig,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Arc::new(RwLock::new(TrackingSession::new())),
            watcher,
            transformer: Arc::new(transformer),
            events_tx,
            config,
        }
    }

    /// Subscribe to tracking events.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingEvent> {
        self.events_tx.subscribe()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackingState {
        self.session.read().unwrap().state
    }

    /// Start tracking.
    ///
    /// Accepted from `Idle`, `Stopped` and `Faulted`; a no-op while the
    /// session is already `Active` or `Restoring`.
    pub fn start(&self) {
        let mut session = self.session.write().unwrap();
        if matches!(
            session.state,
            TrackingState::Active | TrackingState::Restoring
        ) {
            tracing::debug!(state = %session.state, "start() ignored, session already running");
            return;
        }
        self.begin_watch(&mut session);
    }

    /// Stop tracking and reset displayed values.
    ///
    /// The single cancellation primitive: releases the watch handle and
    /// clears any pending spinner timer in the same synchronous step.
    /// Idempotent; a redundant call in `Stopped`/`Idle` does nothing.
    pub fn stop(&self) {
        let mut session = self.session.write().unwrap();
        if matches!(session.state, TrackingState::Stopped | TrackingState::Idle) {
            tracing::debug!(state = %session.state, "stop() ignored, nothing to release");
            return;
        }
        self.release(&mut session);
        session.state = TrackingState::Stopped;
        tracing::info!("Position tracking stopped");
        self.emit(TrackingEvent::Reset);
    }

    /// External visibility-resume signal.
    ///
    /// Called when the host environment resumes after a suspension during
    /// which the platform silently dropped the watch. Only meaningful
    /// while the session believes it is `Active`: the dead handle is
    /// released and a one-shot probe decides between re-acquiring the
    /// watch and a silent reset.
    pub fn resume_requested(&self) {
        {
            let mut session = self.session.write().unwrap();
            if session.state != TrackingState::Active {
                tracing::debug!(state = %session.state, "Resume signal ignored");
                return;
            }
            self.release(&mut session);
            session.state = TrackingState::Restoring;
        }
        // Lock dropped: the probe may complete on the caller's stack.
        tracing::info!("Resume signal received, probing before re-acquiring watch");
        let controller = self.clone();
        self.watcher.probe_once(
            self.config.watch.probe_options,
            Box::new(move |outcome| controller.probe_completed(outcome)),
        );
    }

    /// Watcher callback: a position fix was delivered.
    fn handle_sample(&self, handle: WatchHandle, sample: PositionSample) {
        let mut session = self.session.write().unwrap();
        if session.watch_handle != Some(handle) {
            tracing::debug!(%handle, "Discarding sample from released watch");
            return;
        }

        self.clear_spinner(&mut session);

        let coordinate = self
            .transformer
            .transform(sample.latitude, sample.longitude);
        let in_region = self
            .config
            .region
            .bounds
            .contains(sample.latitude, sample.longitude);

        tracing::trace!(
            latitude = sample.latitude,
            longitude = sample.longitude,
            valid = coordinate.valid,
            "Sample processed"
        );
        self.emit(TrackingEvent::SampleProcessed { sample, coordinate });

        if !in_region {
            tracing::warn!("Position outside supported region");
            self.emit(TrackingEvent::OutOfRegionWarning);
        }
    }

    /// Watcher callback: a failure reached the surface.
    fn handle_watch_failure(&self, handle: WatchHandle, failure: WatchFailure) {
        let mut session = self.session.write().unwrap();
        if session.watch_handle != Some(handle) {
            tracing::debug!(%handle, %failure, "Discarding failure from released watch");
            return;
        }

        self.release(&mut session);
        session.state = TrackingState::Faulted;
        tracing::warn!(%handle, %failure, "Watch failure, session faulted");
        self.emit(TrackingEvent::Error(failure.to_string()));
    }

    /// Spinner timer callback: the first fix is slow.
    fn spinner_elapsed(&self, handle: WatchHandle) {
        let mut session = self.session.write().unwrap();
        if session.watch_handle != Some(handle) || !session.awaiting_first_sample {
            return;
        }
        session.spinner_visible = true;
        tracing::debug!(%handle, "First fix is slow, signalling loading state");
        self.emit(TrackingEvent::LoadingChanged(true));
    }

    /// Restore-probe completion.
    fn probe_completed(&self, outcome: Result<PositionSample, WatchFailure>) {
        let mut session = self.session.write().unwrap();
        if session.state != TrackingState::Restoring {
            tracing::debug!(state = %session.state, "Discarding stale probe result");
            return;
        }

        match outcome {
            Ok(_) => {
                tracing::info!("Restore probe succeeded, re-acquiring watch");
                self.begin_watch(&mut session);
            }
            Err(failure) => {
                // A failed probe after a navigation is expected, not a
                // fault: reset silently, no error surfaced to the user.
                tracing::debug!(%failure, "Restore probe failed, resetting session");
                session.state = TrackingState::Stopped;
                self.emit(TrackingEvent::Reset);
            }
        }
    }

    /// Acquire the watch and arm the slow-response timer.
    ///
    /// Shared by the Idle start transition and the Restoring re-entry.
    fn begin_watch(&self, session: &mut TrackingSession) {
        let on_sample: crate::watcher::SampleCallback = {
            let controller = self.clone();
            Arc::new(move |handle, sample| controller.handle_sample(handle, sample))
        };
        let on_failure: crate::watcher::FailureCallback = {
            let controller = self.clone();
            Arc::new(move |handle, failure| controller.handle_watch_failure(handle, failure))
        };

        let handle = self.watcher.start(
            self.config.watch.watch_options,
            WatchCallbacks {
                on_sample,
                on_failure,
            },
        );

        session.state = TrackingState::Active;
        session.watch_handle = Some(handle);
        session.awaiting_first_sample = true;
        session.spinner_visible = false;
        session.spinner_task = Some(self.arm_spinner(handle));
        tracing::info!(%handle, "Position tracking started");
    }

    /// Spawn the one-shot cosmetic spinner timer for the given watch.
    ///
    /// The timer never causes a state transition; it only signals the
    /// loading state if it outlives the wait for the first sample.
    fn arm_spinner(&self, handle: WatchHandle) -> JoinHandle<()> {
        let controller = self.clone();
        let delay = self.config.watch.spinner_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.spinner_elapsed(handle);
        })
    }

    /// Cancel a pending spinner and retract a visible one.
    fn clear_spinner(&self, session: &mut TrackingSession) {
        if let Some(task) = session.spinner_task.take() {
            task.abort();
        }
        session.awaiting_first_sample = false;
        if session.spinner_visible {
            session.spinner_visible = false;
            self.emit(TrackingEvent::LoadingChanged(false));
        }
    }

    /// Release the watch handle and spinner timer in one synchronous step.
    fn release(&self, session: &mut TrackingSession) {
        if let Some(handle) = session.watch_handle.take() {
            self.watcher.stop(handle);
        }
        self.clear_spinner(session);
    }

    fn emit(&self, event: TrackingEvent) {
        // No subscribers is fine; events describe state, they don't own it.
        let _ = self.events_tx.send(event);
    }
}
