//! Ordering of numbered distance markers along a road.
//!
//! Markers (such as kilometre signs drawn on a course map) should be
//! passed in increasing order when travelling along the right road.

use geo::{Distance, Euclidean, Haversine, Line, LineString, Point};
use inkroute_geo::GeoProjector;
use serde::{Deserialize, Serialize};

use crate::extract::Pixel;

/// A numbered marker at a geographic position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Point,
    pub value: i64,
}

impl Marker {
    pub fn new(position: Point, value: i64) -> Self {
        Marker { position, value }
    }

    /// A marker read off the image at `pixel`.
    pub fn from_pixel(projector: &GeoProjector, pixel: Pixel, value: i64) -> Self {
        let (x, y) = pixel.into();
        Marker {
            position: projector.project(x, y),
            value,
        }
    }
}

/// Where a marker lands on a road.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerProjection {
    pub value: i64,
    /// Index of the closest segment of the road.
    pub segment: usize,
    /// Great-circle distance travelled along the road, in meters, to
    /// reach the start of that segment.
    pub travelled: f64,
}

/// Projects each marker onto its closest segment of `road`.
///
/// Segments are compared by planar point-to-segment distance, the first
/// closest segment winning ties. A road without segments projects
/// nothing.
pub fn project_markers(markers: &[Marker], road: &LineString) -> Vec<MarkerProjection> {
    let segments = road.lines().collect::<Vec<Line>>();
    if segments.is_empty() {
        return vec![];
    }

    let starts = segments
        .iter()
        .scan(0.0, |travelled, segment| {
            let start = *travelled;
            *travelled += Haversine.distance(segment.start_point(), segment.end_point());
            Some(start)
        })
        .collect::<Vec<_>>();

    markers
        .iter()
        .filter_map(|marker| {
            let (segment, _) = segments
                .iter()
                .map(|line| Euclidean.distance(&marker.position, line))
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (index, distance)| {
                    match best {
                        Some((_, closest)) if closest <= distance => best,
                        _ => Some((index, distance)),
                    }
                })?;

            Some(MarkerProjection {
                value: marker.value,
                segment,
                travelled: starts[segment],
            })
        })
        .collect()
}

/// Scores marker order along a road.
///
/// Sorts the projections by distance travelled, keeping input order for
/// markers on the same segment, then walks adjacent pairs: `+step` where
/// the value strictly increases, `-step` otherwise.
pub fn marker_order(projections: &[MarkerProjection], step: f64) -> f64 {
    let mut sorted = projections.to_vec();
    sorted.sort_by(|a, b| a.travelled.total_cmp(&b.travelled));

    sorted
        .windows(2)
        .map(|pair| if pair[1].value > pair[0].value { step } else { -step })
        .sum()
}
