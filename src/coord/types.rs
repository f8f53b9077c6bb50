//! Coordinate type definitions

use std::fmt;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A planar coordinate pair as produced by a projection provider.
///
/// Raw projection output in meters, before any datum drift correction
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarCoordinate {
    /// Distance north of the projection origin, in meters.
    pub northing: f64,
    /// Distance east of the projection origin (including any false
    /// easting), in meters.
    pub easting: f64,
}

impl PlanarCoordinate {
    /// Returns true if both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.northing.is_finite() && self.easting.is_finite()
    }
}

/// A drift-corrected SWEREF 99 TM coordinate handed to consumers.
///
/// When `valid` is false the projection provider was unavailable or
/// returned a non-finite result; both components are then zero, and
/// consumers must treat (0, 0) as invalid regardless of the flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedCoordinate {
    /// Northing in meters.
    pub northing_meters: f64,
    /// Easting in meters.
    pub easting_meters: f64,
    /// False iff the projection failed and the components are placeholders.
    pub valid: bool,
}

impl TransformedCoordinate {
    /// A valid coordinate from projected components.
    pub fn new(northing_meters: f64, easting_meters: f64) -> Self {
        Self {
            northing_meters,
            easting_meters,
            valid: true,
        }
    }

    /// The invalid placeholder coordinate.
    pub fn invalid() -> Self {
        Self {
            northing_meters: 0.0,
            easting_meters: 0.0,
            valid: false,
        }
    }
}

impl fmt::Display for TransformedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(
                f,
                "N {:.1} E {:.1}",
                self.northing_meters, self.easting_meters
            )
        } else {
            write!(f, "unavailable")
        }
    }
}

/// A geographic bounding box in degrees.
///
/// Used for the out-of-region check: samples outside the configured
/// bounds are still transformed, but flagged with a warning event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Southern edge latitude.
    pub min_lat: f64,
    /// Northern edge latitude.
    pub max_lat: f64,
    /// Western edge longitude.
    pub min_lon: f64,
    /// Eastern edge longitude.
    pub max_lon: f64,
}

impl GeoBounds {
    /// Returns true if the point lies inside the box (edges inclusive).
    #[inline]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}
