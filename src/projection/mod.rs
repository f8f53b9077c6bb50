//! Projection pipeline
//!
//! Converts WGS84 geographic coordinates into drift-corrected SWEREF 99 TM
//! grid coordinates. The projection math sits behind the
//! [`ProjectionProvider`] trait so a native library port can replace the
//! built-in [`GaussKruger`] implementation; [`CoordinateTransformer`] owns
//! the one-time initialization gate, the drift correction and the
//! degrade-to-invalid policy.

mod gauss_kruger;
mod provider;
mod transformer;

pub use gauss_kruger::GaussKruger;
pub use provider::{ProjectionError, ProjectionProvider};
pub use transformer::CoordinateTransformer;
