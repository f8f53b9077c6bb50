//! Tracker configuration
//!
//! Named defaults and the settings structs that carry them. The constants
//! in [`defaults`] are the product-owned values (drift model, region
//! bounds, watch timing); [`settings`] wraps them in overridable structs.

pub mod defaults;
mod settings;

pub use settings::{DriftSettings, RegionSettings, TrackerConfig, WatchSettings};
