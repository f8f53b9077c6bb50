//! Position watcher seam
//!
//! Adapts a platform's continuous-location primitive to two callbacks with
//! explicit start/stop. The tracking controller only ever talks to the
//! [`PositionWatcher`] trait and the opaque [`WatchHandle`] it returns; the
//! underlying subscription is never inspected directly.
//!
//! [`ReplayWatcher`] is a built-in implementation that plays back recorded
//! samples, used by the replay binary and as a reference for the trait
//! contract.

mod replay;

pub use replay::{ReplayWatcher, ReplayWatcherConfig};

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// A single position fix as reported by the location primitive.
///
/// Immutable; each sample is consumed once by the tracking controller and
/// never buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Reported horizontal accuracy in meters.
    pub accuracy_meters: f64,
    /// Ground speed in meters per second, if the receiver reported one.
    pub speed_meters_per_second: Option<f64>,
    /// Capture time, milliseconds since the Unix epoch.
    pub captured_at_epoch_millis: i64,
}

impl PositionSample {
    /// Create a sample captured now with no speed information.
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        let captured_at_epoch_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self {
            latitude,
            longitude,
            accuracy_meters,
            speed_meters_per_second: None,
            captured_at_epoch_millis,
        }
    }

    /// Attach a reported ground speed.
    pub fn with_speed(mut self, meters_per_second: f64) -> Self {
        self.speed_meters_per_second = Some(meters_per_second);
        self
    }
}

/// Options forwarded to the platform location primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Request high-accuracy (GNSS) positioning.
    pub high_accuracy: bool,
    /// Maximum acceptable age of a cached fix, in milliseconds.
    pub max_sample_age_millis: u64,
    /// Time the primitive may spend acquiring a fix before reporting
    /// [`WatchFailure::Timeout`], in milliseconds.
    pub timeout_millis: u64,
}

/// Opaque identifier for a running watch subscription.
///
/// A watcher never reuses a handle it has issued, even after the watch is
/// stopped; the controller relies on this to detect callbacks from a
/// watch it has already released. Handles from different watcher
/// instances are unrelated and may collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchHandle(pub(crate) u64);

impl WatchHandle {
    /// Mint a handle from a watcher-assigned identifier.
    ///
    /// For [`PositionWatcher`] implementations; an identifier must not be
    /// reused by the watcher that issued it.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watch#{}", self.0)
    }
}

/// Failure reasons surfaced by the location primitive.
///
/// The controller treats all three uniformly, so platform-specific detail
/// is collapsed here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WatchFailure {
    /// The user or platform denied location access.
    #[error("location permission denied")]
    PermissionDenied,
    /// No position could be determined (no signal, no provider).
    #[error("position unavailable")]
    SignalUnavailable,
    /// The primitive gave up within its configured timeout.
    #[error("position request timed out")]
    Timeout,
}

/// Continuous-watch callback for delivered samples.
pub type SampleCallback = Arc<dyn Fn(WatchHandle, PositionSample) + Send + Sync>;

/// Continuous-watch callback for surfaced failures.
pub type FailureCallback = Arc<dyn Fn(WatchHandle, WatchFailure) + Send + Sync>;

/// One-shot probe completion callback.
pub type ProbeCallback = Box<dyn FnOnce(Result<PositionSample, WatchFailure>) + Send>;

/// Callback pair installed when a continuous watch is started.
///
/// Every invocation carries the [`WatchHandle`] of the subscription that
/// produced it so consumers can discard stale deliveries.
#[derive(Clone)]
pub struct WatchCallbacks {
    /// Invoked for each position fix.
    pub on_sample: SampleCallback,
    /// Invoked when a failure reaches the surface.
    pub on_failure: FailureCallback,
}

/// Adapter over a platform's continuous-location primitive.
///
/// # Contract
///
/// - `start` while a watch is already running is a no-op and returns the
///   existing handle.
/// - `stop` of an unknown or already-stopped handle is a no-op, never an
///   error.
/// - `probe_once` performs a single fix request and must not leave any
///   continuous subscription active.
pub trait PositionWatcher: Send + Sync {
    /// Start a continuous watch. Returns the opaque subscription handle.
    fn start(&self, options: WatchOptions, callbacks: WatchCallbacks) -> WatchHandle;

    /// Release the subscription identified by `handle`.
    fn stop(&self, handle: WatchHandle);

    /// Request a single fix, reporting the outcome through `on_result`.
    fn probe_once(&self, options: WatchOptions, on_result: ProbeCallback);
}
