use geo::{Distance, Haversine, LineString, Point};

/// Counts the anchors lying within `radius` meters (great-circle) of
/// some vertex of `road`.
pub fn anchors_near(road: &LineString, anchors: &[Point], radius: f64) -> usize {
    anchors
        .iter()
        .filter(|anchor| {
            road.points()
                .any(|vertex| Haversine.distance(**anchor, vertex) <= radius)
        })
        .count()
}
