//! Settings structs for all tracker configuration.
//!
//! Pure data types with no parsing logic. Defaults come from
//! [`super::defaults`]; host applications override fields as needed.

use std::time::Duration;

use super::defaults;
use crate::coord::GeoBounds;
use crate::watcher::WatchOptions;

/// Complete tracker configuration.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// Datum drift correction settings.
    pub drift: DriftSettings,
    /// Supported-region settings.
    pub region: RegionSettings,
    /// Location watch timing settings.
    pub watch: WatchSettings,
}

/// Datum drift correction constants.
///
/// Models the motion of the Eurasian plate (carrying the frozen ETRS89
/// frame) relative to the ITRF frame GPS reports in.
#[derive(Debug, Clone, Copy)]
pub struct DriftSettings {
    /// Plate speed in meters per year.
    pub speed_m_per_year: f64,
    /// Plate motion bearing, degrees clockwise from true north.
    pub bearing_deg: f64,
    /// Epoch year at which SWEREF 99 coordinates are frozen.
    pub reference_epoch_year: f64,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            speed_m_per_year: defaults::DEFAULT_DRIFT_SPEED_M_PER_YEAR,
            bearing_deg: defaults::DEFAULT_DRIFT_BEARING_DEG,
            reference_epoch_year: defaults::DEFAULT_REFERENCE_EPOCH_YEAR,
        }
    }
}

/// Supported-region configuration.
#[derive(Debug, Clone, Copy)]
pub struct RegionSettings {
    /// Bounding box of the region the projection is trusted in.
    /// Samples outside it are flagged, not rejected.
    pub bounds: GeoBounds,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            bounds: GeoBounds {
                min_lat: defaults::DEFAULT_REGION_MIN_LAT,
                max_lat: defaults::DEFAULT_REGION_MAX_LAT,
                min_lon: defaults::DEFAULT_REGION_MIN_LON,
                max_lon: defaults::DEFAULT_REGION_MAX_LON,
            },
        }
    }
}

/// Location watch timing configuration.
#[derive(Debug, Clone, Copy)]
pub struct WatchSettings {
    /// Options for the continuous watch.
    pub watch_options: WatchOptions,
    /// Options for the one-shot restore probe (tighter than the watch).
    pub probe_options: WatchOptions,
    /// Delay before the cosmetic slow-response spinner fires.
    pub spinner_delay: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            watch_options: WatchOptions {
                high_accuracy: defaults::DEFAULT_HIGH_ACCURACY,
                max_sample_age_millis: defaults::DEFAULT_WATCH_MAX_AGE_MILLIS,
                timeout_millis: defaults::DEFAULT_WATCH_TIMEOUT_MILLIS,
            },
            probe_options: WatchOptions {
                high_accuracy: defaults::DEFAULT_HIGH_ACCURACY,
                max_sample_age_millis: defaults::DEFAULT_PROBE_MAX_AGE_MILLIS,
                timeout_millis: defaults::DEFAULT_PROBE_TIMEOUT_MILLIS,
            },
            spinner_delay: Duration::from_millis(defaults::DEFAULT_SPINNER_DELAY_MILLIS),
        }
    }
}
