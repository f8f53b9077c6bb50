//! Integration tests for the tracking pipeline.
//!
//! These tests verify the complete flows:
//! - Watcher → Controller → Transformer → event stream
//! - Lifecycle transitions across stop, fault and resume
//! - Datum drift correction applied end to end
//!
//! Run with: `cargo test --test tracking_integration`

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::broadcast;

use swetrack::config::TrackerConfig;
use swetrack::drift::DriftCorrector;
use swetrack::projection::{CoordinateTransformer, GaussKruger};
use swetrack::tracking::{TrackingController, TrackingEvent, TrackingState};
use swetrack::watcher::{
    PositionSample, PositionWatcher, ProbeCallback, ReplayWatcher, ReplayWatcherConfig,
    WatchCallbacks, WatchFailure, WatchHandle, WatchOptions,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Stockholm city center.
const STOCKHOLM_LAT: f64 = 59.33;
const STOCKHOLM_LON: f64 = 18.07;

/// New York City - far outside the supported region.
const NEW_YORK_LAT: f64 = 40.71;
const NEW_YORK_LON: f64 = -74.01;

/// Watcher scripted by the test: the test delivers samples and failures
/// explicitly and decides how probes complete.
struct ScriptedWatcher {
    inner: Mutex<ScriptedState>,
}

struct ScriptedState {
    next_handle: u64,
    active: Option<(WatchHandle, WatchCallbacks)>,
    stopped: Vec<WatchHandle>,
    probe_outcome: Option<Result<PositionSample, WatchFailure>>,
}

impl ScriptedWatcher {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(ScriptedState {
                next_handle: 1,
                active: None,
                stopped: Vec::new(),
                probe_outcome: None,
            }),
        })
    }

    fn script_probe(&self, outcome: Result<PositionSample, WatchFailure>) {
        self.inner.lock().unwrap().probe_outcome = Some(outcome);
    }

    fn active_watch(&self) -> Option<(WatchHandle, WatchCallbacks)> {
        self.inner.lock().unwrap().active.clone()
    }

    fn stopped_handles(&self) -> Vec<WatchHandle> {
        self.inner.lock().unwrap().stopped.clone()
    }

    fn deliver_sample(&self, sample: PositionSample) {
        let (handle, callbacks) = self.active_watch().expect("watch must be active");
        (callbacks.on_sample)(handle, sample);
    }

    fn deliver_failure(&self, failure: WatchFailure) {
        let (handle, callbacks) = self.active_watch().expect("watch must be active");
        (callbacks.on_failure)(handle, failure);
    }
}

impl PositionWatcher for ScriptedWatcher {
    fn start(&self, _options: WatchOptions, callbacks: WatchCallbacks) -> WatchHandle {
        let mut inner = self.inner.lock().unwrap();
        if let Some((handle, _)) = inner.active {
            return handle;
        }
        let handle = WatchHandle::new(inner.next_handle);
        inner.next_handle += 1;
        inner.active = Some((handle, callbacks));
        handle
    }

    fn stop(&self, handle: WatchHandle) {
        let mut inner = self.inner.lock().unwrap();
        inner.stopped.push(handle);
        if inner.active.as_ref().map(|(h, _)| *h) == Some(handle) {
            inner.active = None;
        }
    }

    fn probe_once(&self, _options: WatchOptions, on_result: ProbeCallback) {
        let outcome = self
            .inner
            .lock()
            .unwrap()
            .probe_outcome
            .clone()
            .unwrap_or(Err(WatchFailure::SignalUnavailable));
        on_result(outcome);
    }
}

/// Controller over a scripted watcher, with the session drift correction
/// computed for a fixed date so runs are reproducible.
fn create_controller(
    watcher: Arc<ScriptedWatcher>,
) -> (TrackingController, broadcast::Receiver<TrackingEvent>) {
    let config = TrackerConfig::default();
    let reference_date = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
    let drift = DriftCorrector::new(config.drift).correction_at(reference_date);
    let transformer = CoordinateTransformer::new(Arc::new(GaussKruger::sweref99tm()), drift);
    let controller = TrackingController::new(watcher, transformer, config);
    let events = controller.subscribe();
    (controller, events)
}

fn drain(rx: &mut broadcast::Receiver<TrackingEvent>) -> Vec<TrackingEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn count_matching(events: &[TrackingEvent], predicate: impl Fn(&TrackingEvent) -> bool) -> usize {
    events.iter().filter(|e| predicate(e)).count()
}

// ============================================================================
// Sample Processing Scenarios
// ============================================================================

/// Start tracking, receive a Stockholm fix, and expect a valid SWEREF 99 TM
/// coordinate inside Sweden's plausible range with no warning.
#[tokio::test]
async fn test_stockholm_sample_end_to_end() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    assert_eq!(controller.state(), TrackingState::Active);

    watcher.deliver_sample(PositionSample::new(STOCKHOLM_LAT, STOCKHOLM_LON, 4.0).with_speed(0.5));

    let received = drain(&mut events);
    let (sample, coordinate) = received
        .iter()
        .find_map(|e| match e {
            TrackingEvent::SampleProcessed { sample, coordinate } => {
                Some((sample.clone(), *coordinate))
            }
            _ => None,
        })
        .expect("sample must be processed");

    assert!(coordinate.valid);
    assert!((6_000_000.0..8_000_000.0).contains(&coordinate.northing_meters));
    assert!((200_000.0..900_000.0).contains(&coordinate.easting_meters));
    assert_eq!(sample.accuracy_meters, 4.0);
    assert_eq!(sample.speed_meters_per_second, Some(0.5));

    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::OutOfRegionWarning)),
        0
    );
}

/// A New York fix is still transformed, but flagged exactly once.
#[tokio::test]
async fn test_out_of_region_warning_fires_once() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    watcher.deliver_sample(PositionSample::new(NEW_YORK_LAT, NEW_YORK_LON, 10.0));

    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::OutOfRegionWarning)),
        1
    );
    // The warning is advisory; the session keeps running.
    assert_eq!(controller.state(), TrackingState::Active);
}

/// Samples keep flowing after an out-of-region excursion.
#[tokio::test]
async fn test_tracking_continues_after_warning() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    watcher.deliver_sample(PositionSample::new(NEW_YORK_LAT, NEW_YORK_LON, 10.0));
    watcher.deliver_sample(PositionSample::new(STOCKHOLM_LAT, STOCKHOLM_LON, 4.0));

    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(
            e,
            TrackingEvent::SampleProcessed { .. }
        )),
        2
    );
    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::OutOfRegionWarning)),
        1
    );
}

// ============================================================================
// Failure and Stop Scenarios
// ============================================================================

/// A surfaced timeout faults the session, fires one error and releases
/// the watch handle.
#[tokio::test]
async fn test_timeout_faults_session() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    let (handle, _) = watcher.active_watch().expect("watch active");

    watcher.deliver_failure(WatchFailure::Timeout);

    assert_eq!(controller.state(), TrackingState::Faulted);
    assert!(watcher.stopped_handles().contains(&handle));

    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::Error(_))),
        1
    );
}

/// stop() is idempotent and leaves the session in Stopped.
#[tokio::test]
async fn test_stop_twice_is_safe() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    controller.stop();
    controller.stop();

    assert_eq!(controller.state(), TrackingState::Stopped);
    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::Reset)),
        1
    );
}

/// A sample racing a stop() is discarded and never reaches the sink.
#[tokio::test]
async fn test_sample_after_stop_never_reaches_sink() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    let (handle, callbacks) = watcher.active_watch().expect("watch active");
    controller.stop();
    drain(&mut events);

    // In-flight callback lands after the handle was cleared.
    (callbacks.on_sample)(handle, PositionSample::new(STOCKHOLM_LAT, STOCKHOLM_LON, 4.0));

    assert!(drain(&mut events).is_empty());
    assert_eq!(controller.state(), TrackingState::Stopped);
}

/// The user can restart after a fault and resume receiving samples.
#[tokio::test]
async fn test_restart_after_fault_resumes_flow() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    watcher.deliver_failure(WatchFailure::PermissionDenied);
    assert_eq!(controller.state(), TrackingState::Faulted);
    drain(&mut events);

    controller.start();
    assert_eq!(controller.state(), TrackingState::Active);

    watcher.deliver_sample(PositionSample::new(STOCKHOLM_LAT, STOCKHOLM_LON, 4.0));
    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(
            e,
            TrackingEvent::SampleProcessed { .. }
        )),
        1
    );
}

// ============================================================================
// Resume / Restore Scenarios
// ============================================================================

/// Resume signal with a failing probe: exactly one reset, zero errors,
/// session Stopped - a navigation artifact must not alarm the user.
#[tokio::test]
async fn test_resume_probe_failure_is_silent_reset() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    drain(&mut events);

    watcher.script_probe(Err(WatchFailure::Timeout));
    controller.resume_requested();

    assert_eq!(controller.state(), TrackingState::Stopped);
    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::Reset)),
        1
    );
    assert_eq!(
        count_matching(&received, |e| matches!(e, TrackingEvent::Error(_))),
        0
    );
}

/// Resume signal with a succeeding probe: the watch is re-acquired under
/// a fresh handle and samples flow again.
#[tokio::test]
async fn test_resume_probe_success_restores_tracking() {
    let watcher = ScriptedWatcher::new();
    let (controller, mut events) = create_controller(watcher.clone());

    controller.start();
    let (first_handle, _) = watcher.active_watch().expect("watch active");
    drain(&mut events);

    watcher.script_probe(Ok(PositionSample::new(STOCKHOLM_LAT, STOCKHOLM_LON, 8.0)));
    controller.resume_requested();

    assert_eq!(controller.state(), TrackingState::Active);
    let (second_handle, _) = watcher.active_watch().expect("watch restored");
    assert_ne!(first_handle, second_handle);
    assert!(watcher.stopped_handles().contains(&first_handle));

    watcher.deliver_sample(PositionSample::new(STOCKHOLM_LAT, STOCKHOLM_LON, 4.0));
    let received = drain(&mut events);
    assert_eq!(
        count_matching(&received, |e| matches!(
            e,
            TrackingEvent::SampleProcessed { .. }
        )),
        1
    );
}

// ============================================================================
// Drift Determinism
// ============================================================================

/// Two independently constructed drift corrections from the same date
/// produce identical transforms (round-trip sanity).
#[tokio::test]
async fn test_independent_sessions_agree_for_same_date() {
    let date = Utc.with_ymd_and_hms(2026, 8, 29, 0, 0, 0).unwrap();
    let config = TrackerConfig::default();

    let drift_a = DriftCorrector::new(config.drift).correction_at(date);
    let drift_b = DriftCorrector::new(config.drift).correction_at(date);
    let transformer_a = CoordinateTransformer::new(Arc::new(GaussKruger::sweref99tm()), drift_a);
    let transformer_b = CoordinateTransformer::new(Arc::new(GaussKruger::sweref99tm()), drift_b);

    let a = transformer_a.transform(STOCKHOLM_LAT, STOCKHOLM_LON);
    let b = transformer_b.transform(STOCKHOLM_LAT, STOCKHOLM_LON);

    assert_eq!(a, b);
}

/// The applied drift correction grows with the chosen date.
#[tokio::test]
async fn test_drift_offset_grows_between_sessions() {
    let config = TrackerConfig::default();
    let near = Utc.with_ymd_and_hms(2010, 6, 1, 0, 0, 0).unwrap();
    let far = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();

    let drift_near = DriftCorrector::new(config.drift).correction_at(near);
    let drift_far = DriftCorrector::new(config.drift).correction_at(far);

    assert!(drift_far.magnitude_meters() > drift_near.magnitude_meters());

    let transformer_near =
        CoordinateTransformer::new(Arc::new(GaussKruger::sweref99tm()), drift_near);
    let transformer_far =
        CoordinateTransformer::new(Arc::new(GaussKruger::sweref99tm()), drift_far);

    let a = transformer_near.transform(STOCKHOLM_LAT, STOCKHOLM_LON);
    let b = transformer_far.transform(STOCKHOLM_LAT, STOCKHOLM_LON);

    // Same point, later session: the correction has moved it further.
    assert!(b.northing_meters > a.northing_meters);
    assert!(b.easting_meters > a.easting_meters);
}

// ============================================================================
// Replay Watcher End-to-End
// ============================================================================

/// Drive the controller from the replay watcher: every recorded sample is
/// processed in order, then the synthetic signal loss faults the session.
#[tokio::test]
async fn test_replay_track_end_to_end() {
    let track = vec![
        PositionSample::new(59.3293, 18.0686, 5.0),
        PositionSample::new(59.3310, 18.0801, 5.0),
        PositionSample::new(59.3328, 18.0925, 5.0),
    ];
    let watcher = Arc::new(ReplayWatcher::with_config(
        track,
        ReplayWatcherConfig {
            sample_interval: Duration::from_millis(10),
        },
    ));

    let config = TrackerConfig::default();
    let drift = DriftCorrector::new(config.drift).correction();
    let transformer = CoordinateTransformer::new(Arc::new(GaussKruger::sweref99tm()), drift);
    let controller = TrackingController::new(watcher, transformer, config);

    let mut events = controller.subscribe();
    controller.start();

    let mut processed = Vec::new();
    let mut errors = 0;
    loop {
        let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
            .await
            .expect("replay must finish promptly")
            .expect("event stream must stay open");
        match event {
            TrackingEvent::SampleProcessed { sample, coordinate } => {
                assert!(coordinate.valid);
                processed.push(sample.latitude);
            }
            TrackingEvent::Error(_) => {
                errors += 1;
                break;
            }
            _ => {}
        }
    }

    assert_eq!(processed, vec![59.3293, 59.3310, 59.3328]);
    assert_eq!(errors, 1);
    assert_eq!(controller.state(), TrackingState::Faulted);
}
