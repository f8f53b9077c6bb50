//! Coordinate transformer - WGS84 to drift-corrected SWEREF 99 TM.

use std::sync::{Arc, OnceLock};

use chrono::Utc;

use crate::config::TrackerConfig;
use crate::coord::TransformedCoordinate;
use crate::drift::{DriftCorrection, DriftCorrector};

use super::provider::{ProjectionError, ProjectionProvider};

/// Converts (latitude, longitude) pairs into drift-corrected
/// SWEREF 99 TM coordinates.
///
/// Wraps a [`ProjectionProvider`] behind a lazy, once-per-session
/// initialization gate and adds the session's [`DriftCorrection`] to every
/// projected coordinate. Projection failures degrade to
/// [`TransformedCoordinate::invalid`] instead of propagating; the session
/// keeps tracking.
pub struct CoordinateTransformer {
    provider: Arc<dyn ProjectionProvider>,
    drift: DriftCorrection,
    init_outcome: OnceLock<Result<(), ProjectionError>>,
}

impl CoordinateTransformer {
    /// Create a transformer with an explicit drift correction.
    pub fn new(provider: Arc<dyn ProjectionProvider>, drift: DriftCorrection) -> Self {
        Self {
            provider,
            drift,
            init_outcome: OnceLock::new(),
        }
    }

    /// Create a transformer from configuration, computing the drift
    /// correction for the current date.
    pub fn from_config(provider: Arc<dyn ProjectionProvider>, config: &TrackerConfig) -> Self {
        let corrector = DriftCorrector::new(config.drift);
        let drift = corrector.correction_at(Utc::now());
        Self::new(provider, drift)
    }

    /// The drift correction applied to every output.
    pub fn drift(&self) -> &DriftCorrection {
        &self.drift
    }

    /// Transform a WGS84 position, returning the failure cause on error.
    ///
    /// Deterministic within a session: identical input always yields
    /// identical output.
    pub fn try_transform(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<TransformedCoordinate, ProjectionError> {
        self.ensure_initialized()?;

        // Provider convention is (lon, lat).
        let planar = self.provider.project(longitude, latitude)?;

        let northing = planar.northing + self.drift.north_offset_meters;
        let easting = planar.easting + self.drift.east_offset_meters;

        if !northing.is_finite() || !easting.is_finite() {
            return Err(ProjectionError::NonFinite {
                latitude,
                longitude,
            });
        }

        Ok(TransformedCoordinate::new(northing, easting))
    }

    /// Transform a WGS84 position, degrading failures to the invalid
    /// placeholder coordinate.
    pub fn transform(&self, latitude: f64, longitude: f64) -> TransformedCoordinate {
        match self.try_transform(latitude, longitude) {
            Ok(coordinate) => coordinate,
            Err(ProjectionError::Unavailable(reason)) => {
                tracing::warn!(reason, "Projection provider unavailable");
                TransformedCoordinate::invalid()
            }
            Err(error @ ProjectionError::NonFinite { .. }) => {
                tracing::warn!(%error, "Projection returned a non-finite result");
                TransformedCoordinate::invalid()
            }
        }
    }

    /// Run the provider's initialization gate exactly once and cache the
    /// outcome; later calls return the cached result without retrying.
    fn ensure_initialized(&self) -> Result<(), ProjectionError> {
        self.init_outcome
            .get_or_init(|| {
                let outcome = self.provider.initialize();
                match &outcome {
                    Ok(()) => {
                        tracing::debug!(provider = self.provider.name(), "Projection provider ready")
                    }
                    Err(error) => tracing::warn!(
                        provider = self.provider.name(),
                        %error,
                        "Projection provider failed to initialize"
                    ),
                }
                outcome
            })
            .clone()
    }
}
