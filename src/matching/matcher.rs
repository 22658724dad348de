use std::collections::BTreeMap;

use geo::{LineString, Point};
use inkroute_geo::BoundingBox;
use log::{debug, info, warn};
use measure_time::debug_time;
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::matching::markers::{marker_order, project_markers};
use crate::matching::similarity::VertexIndex;
use crate::matching::{
    MapMatchCandidate, Marker, MatchConfig, MatchError, RoadSegment, RoadSource, ScoreTerm,
    anchors_near,
};

/// A path to match, with the optional hints used to score roads.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchQuery {
    /// The extracted route, in `(x: lng, y: lat)` order.
    pub path: LineString,
    pub anchors: Vec<Point>,
    pub markers: Vec<Marker>,
}

impl MatchQuery {
    pub fn new(path: LineString) -> Self {
        MatchQuery {
            path,
            anchors: vec![],
            markers: vec![],
        }
    }

    pub fn with_anchors(self, anchors: Vec<Point>) -> Self {
        MatchQuery { anchors, ..self }
    }

    pub fn with_markers(self, markers: Vec<Marker>) -> Self {
        MatchQuery { markers, ..self }
    }
}

/// Ranks candidate roads by how well they explain an extracted path.
///
/// ```rust
/// use geo::line_string;
/// use inkroute::matching::{MapMatcher, MatchConfig, MatchQuery, RoadSegment};
///
/// let path = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
/// let roads = vec![
///     RoadSegment::new(1, line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 6.0)]),
///     RoadSegment::new(2, path.clone()),
/// ];
///
/// let matcher = MapMatcher::new(MatchConfig::default());
/// let ranked = matcher.rank(&MatchQuery::new(path), &roads)?;
///
/// assert_eq!(ranked[0].id, 2);
/// # Ok::<(), inkroute::matching::MatchError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapMatcher {
    config: MatchConfig,
}

impl MapMatcher {
    pub fn new(config: MatchConfig) -> Self {
        MapMatcher { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Fetches roads for `bbox` from `source` and ranks them.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err(level = Level::INFO)))]
    pub fn match_source(
        &self,
        query: &MatchQuery,
        source: &dyn RoadSource,
        bbox: &BoundingBox,
    ) -> Result<Vec<MapMatchCandidate>, MatchError> {
        if query.path.0.is_empty() {
            return Err(MatchError::EmptyPath);
        }

        let roads = {
            debug_time!("road lookup");
            source.roads(bbox)?
        };

        self.rank(query, &roads)
    }

    /// Scores every road and sorts them best first.
    ///
    /// Roads with equal scores keep their given order. Roads without any
    /// vertices are skipped. No roads is not an error, and ranks as an
    /// empty list.
    pub fn rank(
        &self,
        query: &MatchQuery,
        roads: &[RoadSegment],
    ) -> Result<Vec<MapMatchCandidate>, MatchError> {
        if query.path.0.is_empty() {
            return Err(MatchError::EmptyPath);
        }

        debug_time!("ranking {} roads", roads.len());

        let mut candidates = roads
            .par_iter()
            .filter_map(|road| self.score(query, road))
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        match candidates.first() {
            Some(best) => info!(
                "Ranked {} roads, best {} scoring {:.4}",
                candidates.len(),
                best.id,
                best.score
            ),
            None => debug!("No candidate roads to rank"),
        }

        Ok(candidates)
    }

    /// Scores a single road, or `None` if it has no vertices.
    pub fn score(&self, query: &MatchQuery, road: &RoadSegment) -> Option<MapMatchCandidate> {
        if road.geometry.0.is_empty() {
            warn!("Road {} has no vertices, skipping", road.id);
            return None;
        }

        let shape = -VertexIndex::new(&road.geometry).mean_distance(&query.path);

        let anchors = anchors_near(
            &road.geometry,
            &query.anchors,
            self.config.anchor_radius_meters,
        );

        let markers = marker_order(
            &project_markers(&query.markers, &road.geometry),
            self.config.marker_step,
        );

        let breakdown = BTreeMap::from([
            (ScoreTerm::ShapeSimilarity, shape),
            (
                ScoreTerm::AnchorBonus,
                anchors as f64 * self.config.anchor_bonus,
            ),
            (ScoreTerm::MarkerOrder, markers),
        ]);

        let mut candidate = MapMatchCandidate::new(road.id, road.geometry.clone(), breakdown);
        candidate
            .metadata
            .insert("anchors_near".to_string(), anchors.to_string());
        if let Some(name) = &road.name {
            candidate.metadata.insert("name".to_string(), name.clone());
        }

        Some(candidate)
    }
}
