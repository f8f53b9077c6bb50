//! Gauss–Krüger transverse Mercator provider.
//!
//! Implements the Krüger series formulas on the GRS80 ellipsoid, the same
//! formulation Lantmäteriet publishes for SWEREF 99 TM. Accuracy is at the
//! millimeter level inside the projection's intended zone, which is far
//! below the drift correction this crate exists to apply.

use crate::coord::PlanarCoordinate;

use super::provider::{ProjectionError, ProjectionProvider};

/// GRS80 semi-major axis in meters.
const GRS80_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// GRS80 flattening.
const GRS80_FLATTENING: f64 = 1.0 / 298.257_222_101;

/// A transverse Mercator projection in Krüger series form.
#[derive(Debug, Clone)]
pub struct GaussKruger {
    semi_major_axis: f64,
    flattening: f64,
    central_meridian_deg: f64,
    scale: f64,
    false_northing: f64,
    false_easting: f64,
}

impl GaussKruger {
    /// The SWEREF 99 TM projection: GRS80, central meridian 15°E,
    /// scale 0.9996, false easting 500 km.
    pub fn sweref99tm() -> Self {
        Self {
            semi_major_axis: GRS80_SEMI_MAJOR_AXIS,
            flattening: GRS80_FLATTENING,
            central_meridian_deg: 15.0,
            scale: 0.9996,
            false_northing: 0.0,
            false_easting: 500_000.0,
        }
    }

    /// A custom transverse Mercator parameterization.
    pub fn new(
        semi_major_axis: f64,
        flattening: f64,
        central_meridian_deg: f64,
        scale: f64,
        false_northing: f64,
        false_easting: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            flattening,
            central_meridian_deg,
            scale,
            false_northing,
            false_easting,
        }
    }
}

impl ProjectionProvider for GaussKruger {
    fn initialize(&self) -> Result<(), ProjectionError> {
        // Pure arithmetic backend, nothing to load.
        Ok(())
    }

    fn project(&self, longitude: f64, latitude: f64) -> Result<PlanarCoordinate, ProjectionError> {
        let e2 = self.flattening * (2.0 - self.flattening);
        let n = self.flattening / (2.0 - self.flattening);
        let a_hat =
            self.semi_major_axis / (1.0 + n) * (1.0 + n * n / 4.0 + n.powi(4) / 64.0);

        let phi = latitude.to_radians();
        let delta_lambda = (longitude - self.central_meridian_deg).to_radians();

        // Conformal latitude
        let a_coef = e2;
        let b_coef = (5.0 * e2 * e2 - e2.powi(3)) / 6.0;
        let c_coef = (104.0 * e2.powi(3) - 45.0 * e2.powi(4)) / 120.0;
        let d_coef = 1237.0 * e2.powi(4) / 1260.0;
        let sin2 = phi.sin() * phi.sin();
        let phi_star = phi
            - phi.sin()
                * phi.cos()
                * (a_coef + b_coef * sin2 + c_coef * sin2 * sin2 + d_coef * sin2 * sin2 * sin2);

        let xi = (phi_star.tan() / delta_lambda.cos()).atan();
        let eta = (phi_star.cos() * delta_lambda.sin()).atanh();

        let beta1 = n / 2.0 - 2.0 * n * n / 3.0 + 5.0 * n.powi(3) / 16.0 + 41.0 * n.powi(4) / 180.0;
        let beta2 = 13.0 * n * n / 48.0 - 3.0 * n.powi(3) / 5.0 + 557.0 * n.powi(4) / 1440.0;
        let beta3 = 61.0 * n.powi(3) / 240.0 - 103.0 * n.powi(4) / 140.0;
        let beta4 = 49_561.0 * n.powi(4) / 161_280.0;

        let northing = self.scale
            * a_hat
            * (xi
                + beta1 * (2.0 * xi).sin() * (2.0 * eta).cosh()
                + beta2 * (4.0 * xi).sin() * (4.0 * eta).cosh()
                + beta3 * (6.0 * xi).sin() * (6.0 * eta).cosh()
                + beta4 * (8.0 * xi).sin() * (8.0 * eta).cosh())
            + self.false_northing;

        let easting = self.scale
            * a_hat
            * (eta
                + beta1 * (2.0 * xi).cos() * (2.0 * eta).sinh()
                + beta2 * (4.0 * xi).cos() * (4.0 * eta).sinh()
                + beta3 * (6.0 * xi).cos() * (6.0 * eta).sinh()
                + beta4 * (8.0 * xi).cos() * (8.0 * eta).sinh())
            + self.false_easting;

        let coord = PlanarCoordinate { northing, easting };
        if coord.is_finite() {
            Ok(coord)
        } else {
            Err(ProjectionError::NonFinite {
                latitude,
                longitude,
            })
        }
    }

    fn name(&self) -> &str {
        "gauss-kruger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stockholm_projection() {
        let provider = GaussKruger::sweref99tm();
        let coord = provider.project(18.0686, 59.3293).unwrap();

        // Regression anchor from this Krüger parameterization.
        assert!(
            (coord.northing - 6_580_743.0).abs() < 1.0,
            "northing {}",
            coord.northing
        );
        assert!(
            (coord.easting - 674_571.9).abs() < 1.0,
            "easting {}",
            coord.easting
        );
    }

    #[test]
    fn test_kiruna_projection() {
        let provider = GaussKruger::sweref99tm();
        let coord = provider.project(20.2253, 67.8558).unwrap();

        assert!((coord.northing - 7_536_070.0).abs() < 1.0);
        assert!((coord.easting - 719_583.1).abs() < 1.0);
    }

    #[test]
    fn test_central_meridian_has_false_easting() {
        let provider = GaussKruger::sweref99tm();
        let coord = provider.project(15.0, 62.0).unwrap();

        // On the central meridian the easting collapses to the false easting.
        assert!((coord.easting - 500_000.0).abs() < 1e-6);
        assert!(coord.northing > 6_000_000.0);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let provider = GaussKruger::sweref99tm();
        let first = provider.project(18.07, 59.33).unwrap();
        let second = provider.project(18.07, 59.33).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_far_out_of_zone_input_reports_non_finite() {
        let provider = GaussKruger::sweref99tm();

        // 90 degrees from the central meridian on the equator the series
        // degenerates; the provider must report it rather than emit NaN.
        let result = provider.project(-75.0, 0.0);
        assert!(matches!(result, Err(ProjectionError::NonFinite { .. })));
    }

    #[test]
    fn test_initialize_is_trivially_available() {
        assert!(GaussKruger::sweref99tm().initialize().is_ok());
    }
}
