use std::path::Path;

use geo::{Intersects, LineString};
use inkroute_geo::BoundingBox;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use wkt::TryFromWkt;

use crate::matching::SourceError;

/// A candidate road geometry, in `(x: lng, y: lat)` order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub id: u64,
    pub geometry: LineString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RoadSegment {
    pub fn new(id: u64, geometry: LineString) -> Self {
        RoadSegment {
            id,
            geometry,
            name: None,
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        RoadSegment {
            name: Some(name.into()),
            ..self
        }
    }
}

/// A provider of candidate roads for an area.
///
/// Implementations may perform I/O. The roads returned should be
/// those near or within `bbox`, in a stable order, since ties in the
/// final ranking keep the order given here.
pub trait RoadSource {
    fn roads(&self, bbox: &BoundingBox) -> Result<Vec<RoadSegment>, SourceError>;
}

/// A fixed, in-memory set of roads.
#[derive(Clone, Debug, Default)]
pub struct StaticRoads {
    roads: Vec<RoadSegment>,
}

impl StaticRoads {
    pub fn new(roads: Vec<RoadSegment>) -> Self {
        StaticRoads { roads }
    }

    /// Parses one `LINESTRING` per line, optionally prefixed by
    /// `id;name;`. Blank lines and lines starting with `#` are skipped.
    /// Roads without an explicit id are numbered by their line.
    ///
    /// ```text
    /// 7;George Street;LINESTRING (151.2 -33.86, 151.21 -33.87)
    /// LINESTRING (151.1 -33.8, 151.15 -33.85)
    /// ```
    pub fn from_wkt(source: &str) -> Result<Self, SourceError> {
        let roads = source
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(number, line)| parse_line(number, line))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed {} roads from WKT", roads.len());
        Ok(StaticRoads { roads })
    }

    pub fn from_wkt_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_wkt(&source)
    }

    pub fn roads_unfiltered(&self) -> &[RoadSegment] {
        &self.roads
    }
}

fn parse_line(number: usize, line: &str) -> Result<RoadSegment, SourceError> {
    let malformed = |reason: String| SourceError::Parse {
        line: number,
        reason,
    };

    let (id, name, wkt) = match line.splitn(3, ';').collect::<Vec<_>>().as_slice() {
        [id, name, wkt] => {
            let id = id
                .trim()
                .parse::<u64>()
                .map_err(|e| malformed(format!("invalid id {id:?}: {e}")))?;
            let name = Some(name.trim()).filter(|n| !n.is_empty());
            (id, name, *wkt)
        }
        [wkt] => (number as u64, None, *wkt),
        _ => return Err(malformed("expected `id;name;WKT` or `WKT`".to_string())),
    };

    let geometry =
        LineString::<f64>::try_from_wkt_str(wkt.trim()).map_err(|e| malformed(e.to_string()))?;

    Ok(RoadSegment {
        id,
        geometry,
        name: name.map(str::to_string),
    })
}

impl RoadSource for StaticRoads {
    fn roads(&self, bbox: &BoundingBox) -> Result<Vec<RoadSegment>, SourceError> {
        let area = bbox.rect();
        let roads = self
            .roads
            .iter()
            .filter(|road| {
                if road.geometry.0.is_empty() {
                    warn!("Skipping road {} without vertices", road.id);
                    return false;
                }

                road.geometry.intersects(&area)
            })
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            "Found {} of {} roads within the bounding box",
            roads.len(),
            self.roads.len()
        );

        Ok(roads)
    }
}
