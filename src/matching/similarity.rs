use geo::LineString;
use rstar::{PointDistance, RTree};

/// Directed, averaged Hausdorff-style distance from `a` to `b`.
///
/// The mean, over every vertex of `a`, of the Euclidean distance to the
/// nearest vertex of `b`, measured in the coordinate space of the inputs
/// (degrees, for geographic lines). Unlike the textbook Hausdorff distance
/// this is neither symmetric nor dominated by a single outlier.
///
/// An empty `a` is at distance `0`, and any non-empty `a` is infinitely
/// far from an empty `b`.
pub fn hausdorff_lite(a: &LineString, b: &LineString) -> f64 {
    if a.0.is_empty() {
        return 0.0;
    }

    let index = VertexIndex::new(b);
    index.mean_distance(a)
}

/// Nearest-vertex lookups over a single line.
pub struct VertexIndex {
    tree: RTree<[f64; 2]>,
}

impl VertexIndex {
    pub fn new(line: &LineString) -> Self {
        let vertices = line.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>();
        VertexIndex {
            tree: RTree::bulk_load(vertices),
        }
    }

    /// Distance from `(x, y)` to the closest vertex, if there are any.
    pub fn nearest_distance(&self, x: f64, y: f64) -> Option<f64> {
        let query = [x, y];
        self.tree
            .nearest_neighbor(&query)
            .map(|nearest| nearest.distance_2(&query).sqrt())
    }

    pub fn mean_distance(&self, line: &LineString) -> f64 {
        let total = line
            .coords()
            .map(|c| self.nearest_distance(c.x, c.y).unwrap_or(f64::INFINITY))
            .sum::<f64>();

        total / line.0.len().max(1) as f64
    }
}
