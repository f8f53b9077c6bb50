//! SweTrack - live WGS84 to SWEREF 99 TM position tracking
//!
//! This library continuously tracks a device's geographic position, converts
//! it from the global WGS84 frame into Sweden's national SWEREF 99 TM grid,
//! and keeps that conversion valid over time by applying a datum drift
//! correction for the tectonic motion between ITRF and ETRS89.
//!
//! # High-Level API
//!
//! The [`tracking`] module provides the lifecycle controller that owns the
//! whole session:
//!
//! ```ignore
//! use swetrack::config::TrackerConfig;
//! use swetrack::projection::{CoordinateTransformer, GaussKruger};
//! use swetrack::tracking::TrackingController;
//!
//! let config = TrackerConfig::default();
//! let provider = std::sync::Arc::new(GaussKruger::sweref99tm());
//! let transformer = CoordinateTransformer::from_config(provider, &config);
//! let controller = TrackingController::new(watcher, transformer, config);
//!
//! let mut events = controller.subscribe();
//! controller.start();
//! while let Ok(event) = events.recv().await {
//!     // Handle TrackingEvent
//! }
//! ```

pub mod config;
pub mod coord;
pub mod drift;
pub mod logging;
pub mod projection;
pub mod time;
pub mod tracking;
pub mod watcher;

/// Version of the SweTrack library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
