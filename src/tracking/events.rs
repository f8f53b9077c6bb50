//! UI-facing tracking events.

use crate::coord::TransformedCoordinate;
use crate::watcher::PositionSample;

/// Events emitted by the tracking controller for presentation layers.
///
/// The controller never touches presentation state itself; consumers
/// subscribe via [`subscribe`](crate::tracking::TrackingController::subscribe)
/// and render whatever these events describe. Only the most recent
/// sample's output is ever meaningful; there is no history to replay.
#[derive(Debug, Clone)]
pub enum TrackingEvent {
    /// The slow-response spinner should be shown (`true`) or hidden
    /// (`false`). Purely cosmetic.
    LoadingChanged(bool),

    /// A position fix was processed. `coordinate.valid` is false when the
    /// projection was unavailable; tracking continues either way.
    SampleProcessed {
        /// The raw fix from the location primitive.
        sample: PositionSample,
        /// The drift-corrected SWEREF 99 TM coordinate.
        coordinate: TransformedCoordinate,
    },

    /// The latest fix lies outside the supported region. Emitted in
    /// addition to `SampleProcessed`, at most once per sample.
    OutOfRegionWarning,

    /// Tracking failed and the session is faulted until restarted.
    Error(String),

    /// The session was stopped; idle display values should be restored.
    Reset,
}
