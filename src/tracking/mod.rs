//! Tracking lifecycle
//!
//! The state machine that owns a tracking session:
//!
//! ```text
//! Idle --start()--> Active --failure--> Faulted
//!                     |  ^                 |
//!        resume signal|  |probe ok         |stop()
//!                     v  |                 v
//!                 Restoring --probe fail--> Stopped --start()--> Active
//! ```
//!
//! # Components
//!
//! - [`state`] - `TrackingState` and the session record
//! - [`events`] - `TrackingEvent`, the UI-facing event stream
//! - [`controller`] - `TrackingController`, the state machine itself

mod controller;
mod events;
mod state;

pub use controller::TrackingController;
pub use events::TrackingEvent;
pub use state::TrackingState;
