use std::collections::BTreeMap;

use geo::LineString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The named terms making up a candidate's score.
///
/// Declaration order is the order terms are summed in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoreTerm {
    /// Negated averaged Hausdorff distance from the path to the road.
    ShapeSimilarity,
    /// A fixed bonus per anchor point near the road.
    AnchorBonus,
    /// Reward for passing markers in increasing order.
    MarkerOrder,
}

/// A road ranked against an extracted path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMatchCandidate {
    pub id: u64,
    pub polyline: LineString,
    /// Sum of the `breakdown` terms.
    pub score: f64,
    pub breakdown: BTreeMap<ScoreTerm, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl MapMatchCandidate {
    /// Builds a candidate whose score is the sum of `breakdown`.
    pub fn new(id: u64, polyline: LineString, breakdown: BTreeMap<ScoreTerm, f64>) -> Self {
        MapMatchCandidate {
            id,
            polyline,
            score: breakdown.values().sum(),
            breakdown,
            metadata: BTreeMap::new(),
        }
    }

    pub fn term(&self, term: ScoreTerm) -> f64 {
        self.breakdown.get(&term).copied().unwrap_or_default()
    }
}
