//! Session state for the tracking controller.

use std::fmt;

use tokio::task::JoinHandle;

use crate::watcher::WatchHandle;

/// Lifecycle state of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// No session has run yet.
    #[default]
    Idle,
    /// A watch is running and samples are being transformed.
    Active,
    /// Transient: a resume signal arrived and a probe is in flight.
    Restoring,
    /// The watch was released; last displayed values were reset.
    Stopped,
    /// A watch failure surfaced; terminal until an explicit restart.
    Faulted,
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
            Self::Restoring => write!(f, "Restoring"),
            Self::Stopped => write!(f, "Stopped"),
            Self::Faulted => write!(f, "Faulted"),
        }
    }
}

/// Mutable session record, exclusively owned by the controller.
///
/// The watch handle and spinner task are cleared together, in the same
/// synchronous step, on every transition out of Active/Restoring so a
/// timer can never fire against a stopped session.
pub(crate) struct TrackingSession {
    /// Current lifecycle state.
    pub state: TrackingState,
    /// Handle of the running watch, present only while Active.
    pub watch_handle: Option<WatchHandle>,
    /// Pending one-shot slow-response timer task.
    pub spinner_task: Option<JoinHandle<()>>,
    /// True until the first sample of the current watch arrives.
    pub awaiting_first_sample: bool,
    /// True while the loading spinner has been signalled visible.
    pub spinner_visible: bool,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self {
            state: TrackingState::Idle,
            watch_handle: None,
            spinner_task: None,
            awaiting_first_sample: false,
            spinner_visible: false,
        }
    }
}
