//! Projection from image pixel space onto a geographic bounding box.

use geo::{LineString, Point, point};
use log::debug;

use crate::bbox::BoundingBox;
use crate::error::GeoError;

/// Maps pixel coordinates of an image onto a [`BoundingBox`].
///
/// The image's top-left origin is the box's north-west corner, and the
/// geographic extent is assumed to map linearly onto the pixel extent.
/// No distortion (mercator or otherwise) correction is applied.
///
/// For a pixel `(x, y)`:
///
/// ```math
/// lng = west + (x / width) * (east - west)
/// lat = north - (y / height) * (north - south)
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GeoProjector {
    bbox: BoundingBox,
    width: u32,
    height: u32,
}

impl GeoProjector {
    /// Creates a projector for an image of `width`x`height` pixels.
    ///
    /// Fails if the box is degenerate, or the image has a zero dimension.
    pub fn new(bbox: BoundingBox, width: u32, height: u32) -> Result<Self, GeoError> {
        bbox.validate()?;

        if width == 0 || height == 0 {
            return Err(GeoError::InvalidImageSize { width, height });
        }

        Ok(GeoProjector {
            bbox,
            width,
            height,
        })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Projects a single pixel position into a (lng, lat) [`Point`].
    ///
    /// Evaluated as an interpolation between opposite edges, so that
    /// `(0, 0)` lands exactly on `(north, west)` and `(width, height)`
    /// exactly on `(south, east)`.
    #[inline]
    pub fn project(&self, x: f64, y: f64) -> Point {
        let tx = x / self.width as f64;
        let ty = y / self.height as f64;

        let lng = self.bbox.west * (1.0 - tx) + self.bbox.east * tx;
        let lat = self.bbox.north * (1.0 - ty) + self.bbox.south * ty;

        point! { x: lng, y: lat }
    }

    /// Projects an ordered pixel polyline, preserving its length and order.
    pub fn project_polyline<I, P>(&self, pixels: I) -> LineString
    where
        I: IntoIterator<Item = P>,
        P: Into<(f64, f64)>,
    {
        let line = pixels
            .into_iter()
            .map(|pixel| {
                let (x, y) = pixel.into();
                self.project(x, y)
            })
            .collect::<LineString>();

        debug!(
            "Projected {} pixels into {:?}",
            line.0.len(),
            self.bbox
        );

        line
    }

    /// The inverse mapping, from a (lng, lat) point back to pixel space.
    pub fn unproject(&self, point: Point) -> (f64, f64) {
        let tx = (point.x() - self.bbox.west) / self.bbox.width();
        let ty = (self.bbox.north - point.y()) / self.bbox.height();

        (tx * self.width as f64, ty * self.height as f64)
    }
}
