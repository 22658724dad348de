use geo::{Rect, coord};
use serde::{Deserialize, Serialize};

use crate::METERS_PER_DEGREE;
use crate::error::GeoError;

/// A geographic extent, in degrees, north and east positive.
///
/// A box is only valid if every edge is finite, `north > south`
/// and `east > west`. Boxes crossing the antimeridian are not supported.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Constructs a validated [`BoundingBox`].
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, GeoError> {
        let bbox = BoundingBox {
            north,
            south,
            east,
            west,
        };

        bbox.validate()?;
        Ok(bbox)
    }

    /// Checks the box has a finite, non-zero extent.
    pub fn validate(&self) -> Result<(), GeoError> {
        let edges = [self.north, self.south, self.east, self.west];
        if edges.iter().any(|edge| !edge.is_finite()) {
            return Err(GeoError::InvalidBoundingBox(format!(
                "edges must be finite, given {self:?}"
            )));
        }

        if self.north <= self.south {
            return Err(GeoError::InvalidBoundingBox(format!(
                "north ({}) must be greater than south ({})",
                self.north, self.south
            )));
        }

        if self.east <= self.west {
            return Err(GeoError::InvalidBoundingBox(format!(
                "east ({}) must be greater than west ({})",
                self.east, self.west
            )));
        }

        Ok(())
    }

    /// Extent in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Extent in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Grows the box on every side by `padding_meters`, using a flat
    /// [`METERS_PER_DEGREE`] conversion for both axes.
    ///
    /// A non-positive padding returns the box unchanged.
    pub fn expand(&self, padding_meters: f64) -> Self {
        if padding_meters <= 0.0 {
            return *self;
        }

        let pad = padding_meters / METERS_PER_DEGREE;
        BoundingBox {
            north: self.north + pad,
            south: self.south - pad,
            east: self.east + pad,
            west: self.west - pad,
        }
    }

    /// The box as a [`Rect`] in (lng, lat) space.
    pub fn rect(&self) -> Rect {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }
}
