//! Default configuration values.
//!
//! Every tuning constant the tracker uses lives here by name so that host
//! applications can see, and settings structs can override, the shipped
//! behavior. Several of these values (drift constants, region bounds) have
//! gone through multiple product revisions; the authoritative numbers are a
//! product decision, which is why they are configuration rather than
//! hard-coded in the components that consume them.

/// Annual drift speed of the Eurasian plate relative to ITRF, in
/// meters per year. Applied along [`DEFAULT_DRIFT_BEARING_DEG`].
pub const DEFAULT_DRIFT_SPEED_M_PER_YEAR: f64 = 0.025;

/// Bearing of plate motion, in degrees clockwise from true north.
pub const DEFAULT_DRIFT_BEARING_DEG: f64 = 33.0;

/// Reference epoch of SWEREF 99 (the ETRS89 realization it is fixed to).
pub const DEFAULT_REFERENCE_EPOCH_YEAR: f64 = 1999.5;

/// Southern edge of the supported region (degrees latitude).
pub const DEFAULT_REGION_MIN_LAT: f64 = 55.0;

/// Northern edge of the supported region (degrees latitude).
pub const DEFAULT_REGION_MAX_LAT: f64 = 69.1;

/// Western edge of the supported region (degrees longitude).
pub const DEFAULT_REGION_MIN_LON: f64 = 10.5;

/// Eastern edge of the supported region (degrees longitude).
pub const DEFAULT_REGION_MAX_LON: f64 = 24.2;

/// Timeout for the continuous watch, in milliseconds.
pub const DEFAULT_WATCH_TIMEOUT_MILLIS: u64 = 20_000;

/// Maximum acceptable sample age for the continuous watch, in milliseconds.
pub const DEFAULT_WATCH_MAX_AGE_MILLIS: u64 = 30_000;

/// Timeout for the one-shot restore probe, in milliseconds.
///
/// Deliberately shorter than [`DEFAULT_WATCH_TIMEOUT_MILLIS`]: a probe
/// that cannot answer quickly is treated as "tracking did not survive the
/// suspension" rather than kept pending.
pub const DEFAULT_PROBE_TIMEOUT_MILLIS: u64 = 10_000;

/// Maximum acceptable sample age for the restore probe, in milliseconds.
pub const DEFAULT_PROBE_MAX_AGE_MILLIS: u64 = 5_000;

/// Whether to request high-accuracy (GNSS) positioning.
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Delay before the cosmetic slow-response spinner fires, in milliseconds.
pub const DEFAULT_SPINNER_DELAY_MILLIS: u64 = 5_000;
