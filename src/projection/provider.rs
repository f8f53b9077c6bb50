//! Projection provider trait and errors.

use thiserror::Error;

use crate::coord::PlanarCoordinate;

/// Errors that can occur in the projection pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    /// The provider is missing or failed its one-time initialization.
    #[error("projection provider unavailable: {0}")]
    Unavailable(String),

    /// The provider returned NaN or infinity for the given input.
    #[error("projection produced a non-finite result for lat {latitude}, lon {longitude}")]
    NonFinite { latitude: f64, longitude: f64 },
}

/// A projection backend converting WGS84 geographic coordinates to a
/// planar grid.
///
/// Backends may be compiled native libraries, script ports, or the
/// built-in [`GaussKruger`](super::GaussKruger) implementation. By
/// convention `project` takes longitude before latitude.
///
/// Implementations must be deterministic: the same input always maps to
/// the same output within a session.
pub trait ProjectionProvider: Send + Sync {
    /// One-time initialization gate.
    ///
    /// Called lazily by the transformer before the first projection; the
    /// outcome is cached and never retried within a session.
    fn initialize(&self) -> Result<(), ProjectionError>;

    /// Project a WGS84 position onto the planar grid.
    ///
    /// Out-of-range input is not rejected up front; a failed or
    /// non-finite projection is the error signal.
    fn project(&self, longitude: f64, latitude: f64) -> Result<PlanarCoordinate, ProjectionError>;

    /// Provider name for logging and identification.
    fn name(&self) -> &str;
}
