//! Scoring of candidate road geometries against an extracted path.
//!
//! Each road is scored as the sum of three terms (see [`ScoreTerm`]):
//! how closely the path follows it, how many anchor points lie on it,
//! and whether numbered markers are passed in increasing order.

use serde::{Deserialize, Serialize};

mod anchors;
mod candidate;
mod error;
mod matcher;
pub mod markers;
mod road;
pub mod similarity;

#[cfg(test)]
mod test;

pub use anchors::anchors_near;
pub use candidate::{MapMatchCandidate, ScoreTerm};
pub use error::{MatchError, SourceError};
pub use matcher::{MapMatcher, MatchQuery};
pub use markers::{Marker, MarkerProjection};
pub use road::{RoadSegment, RoadSource, StaticRoads};
pub use similarity::hausdorff_lite;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Great-circle radius, in meters, within which an anchor counts as
    /// lying on a road.
    pub anchor_radius_meters: f64,
    /// Score added per anchor lying on a road.
    pub anchor_bonus: f64,
    /// Score added (or removed) per adjacent marker pair in (or out of) order.
    pub marker_step: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            anchor_radius_meters: 30.0,
            anchor_bonus: 10.0,
            marker_step: 5.0,
        }
    }
}
