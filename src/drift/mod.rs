//! Datum drift correction
//!
//! GPS receivers report positions in the ITRF frame, which moves with the
//! global plate model; SWEREF 99 is frozen to the Eurasian plate at epoch
//! 1999.5. The gap between the two grows by a few centimeters per year.
//! This module computes the additive north/east offset that closes it for
//! the current date.
//!
//! The correction is computed once per session and cached; recomputing
//! from the same date is idempotent, and a clock set before the reference
//! epoch simply yields a negative-valued correction.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::config::DriftSettings;
use crate::time::fractional_year;

/// The one-time additive correction for plate motion since the datum's
/// reference epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftCorrection {
    /// Offset along the grid's north axis, in meters.
    pub north_offset_meters: f64,
    /// Offset along the grid's east axis, in meters.
    pub east_offset_meters: f64,
    /// Fractional year the correction was computed for.
    pub computed_at_epoch_year: f64,
}

impl DriftCorrection {
    /// Compute the correction for a given instant.
    ///
    /// Pure arithmetic; elapsed years may be negative under clock skew,
    /// which flips the sign of both offsets rather than failing.
    pub fn compute(settings: &DriftSettings, now: DateTime<Utc>) -> Self {
        let epoch_year = fractional_year(now);
        let elapsed_years = epoch_year - settings.reference_epoch_year;

        let bearing_rad = settings.bearing_deg.to_radians();
        let displacement = settings.speed_m_per_year * elapsed_years;

        Self {
            north_offset_meters: displacement * bearing_rad.cos(),
            east_offset_meters: displacement * bearing_rad.sin(),
            computed_at_epoch_year: epoch_year,
        }
    }

    /// Total displacement magnitude in meters.
    pub fn magnitude_meters(&self) -> f64 {
        (self.north_offset_meters * self.north_offset_meters
            + self.east_offset_meters * self.east_offset_meters)
            .sqrt()
    }
}

/// Computes and caches the session's [`DriftCorrection`].
///
/// The first call to [`correction`](Self::correction) (or
/// [`correction_at`](Self::correction_at), the injectable-clock variant
/// used in tests) fixes the correction for the remainder of the session.
pub struct DriftCorrector {
    settings: DriftSettings,
    cached: OnceLock<DriftCorrection>,
}

impl DriftCorrector {
    /// Create a corrector with the given drift model constants.
    pub fn new(settings: DriftSettings) -> Self {
        Self {
            settings,
            cached: OnceLock::new(),
        }
    }

    /// The session correction, computed from the wall clock on first use.
    pub fn correction(&self) -> DriftCorrection {
        self.correction_at(Utc::now())
    }

    /// The session correction, computed from `now` on first use.
    ///
    /// Later calls return the cached value regardless of the date passed.
    pub fn correction_at(&self, now: DateTime<Utc>) -> DriftCorrection {
        *self.cached.get_or_init(|| {
            let correction = DriftCorrection::compute(&self.settings, now);
            tracing::info!(
                north_m = correction.north_offset_meters,
                east_m = correction.east_offset_meters,
                epoch_year = correction.computed_at_epoch_year,
                "Datum drift correction computed"
            );
            correction
        })
    }
}
