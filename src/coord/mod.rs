//! Coordinate value types
//!
//! Planar and geographic coordinate types shared by the projection
//! pipeline and the tracking controller. The projection math itself
//! lives in [`crate::projection`].

mod types;

pub use types::{
    GeoBounds, PlanarCoordinate, TransformedCoordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};
