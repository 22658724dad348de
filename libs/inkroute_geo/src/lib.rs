#![doc = include_str!("../docs/geo.md")]

/// Approximate length of one degree of latitude (and of longitude at the
/// equator), in meters.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

pub mod bbox;
#[doc(hidden)]
pub mod error;
pub mod project;

#[doc(inline)]
pub use bbox::BoundingBox;
#[doc(inline)]
pub use error::GeoError;
#[doc(inline)]
pub use project::GeoProjector;

#[cfg(test)]
mod test;
