//! Ordering of an unordered pixel set into a traversable polyline.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::extract::{Pixel, PixelGraph};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStrategy {
    /// Breadth-first from one endpoint to the furthest endpoint, taking
    /// the shortest pixel path between them. Branches off that path are
    /// dropped.
    #[default]
    Graph,

    /// Greedy nearest-neighbour walk from an endpoint over every pixel.
    /// Visits branches, at the cost of jumping between them.
    NearestNeighbor,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub strategy: OrderStrategy,
}

/// Orders the pixels of a single component.
#[derive(Clone, Debug)]
pub struct PathOrderer<'a> {
    config: &'a OrderConfig,
}

impl<'a> PathOrderer<'a> {
    pub fn new(config: &'a OrderConfig) -> Self {
        PathOrderer { config }
    }

    pub fn order(&self, pixels: &[Pixel]) -> Vec<Pixel> {
        self.order_graph(&PixelGraph::new(pixels))
    }

    /// Orders a component whose adjacency graph is already built.
    ///
    /// With fewer than two endpoints (closed loops, isolated blobs) the
    /// pixels are returned in lexicographic order instead.
    pub fn order_graph(&self, graph: &PixelGraph) -> Vec<Pixel> {
        let ordered = match self.config.strategy {
            OrderStrategy::Graph => breadth_first(graph),
            OrderStrategy::NearestNeighbor => {
                let pixels = graph.pixels().collect::<Vec<_>>();
                match start_pixel(graph) {
                    Some(start) => nearest_neighbour(&pixels, start),
                    None => pixels,
                }
            }
        };

        dedup(ordered)
    }
}

/// The first endpoint of the graph, or its first pixel if it has none.
pub fn start_pixel(graph: &PixelGraph) -> Option<Pixel> {
    graph
        .endpoints()
        .first()
        .map(|node| graph.pixel(*node))
        .or_else(|| graph.pixels().next())
}

/// The shortest path between the graph's extremities, or every pixel in
/// lexicographic order if it has none.
pub fn breadth_first(graph: &PixelGraph) -> Vec<Pixel> {
    match graph.extremities() {
        Some((_, traversal, terminus)) => traversal
            .path_to(terminus)
            .into_iter()
            .map(|node| graph.pixel(node))
            .collect(),
        None => graph.pixels().collect(),
    }
}

/// Greedy walk from `start`, always stepping to the closest unvisited
/// pixel. Ties go to the lexicographically smaller pixel.
///
/// `start` is prepended if it is not a member of `pixels`.
pub fn nearest_neighbour(pixels: &[Pixel], start: Pixel) -> Vec<Pixel> {
    let mut remaining = pixels.to_vec();
    remaining.sort_unstable();
    remaining.dedup();

    let mut ordered = Vec::with_capacity(remaining.len() + 1);
    let mut current = start;
    ordered.push(start);
    remaining.retain(|pixel| *pixel != start);

    while let Some(position) = remaining
        .iter()
        .position_min_by_key(|pixel| squared_distance(&current, pixel))
    {
        current = remaining.remove(position);
        ordered.push(current);
    }

    ordered
}

#[inline]
fn squared_distance(a: &Pixel, b: &Pixel) -> u64 {
    let dx = a.x.abs_diff(b.x) as u64;
    let dy = a.y.abs_diff(b.y) as u64;
    dx * dx + dy * dy
}

/// Collapses consecutive duplicates.
fn dedup(pixels: Vec<Pixel>) -> Vec<Pixel> {
    pixels.into_iter().dedup().collect()
}
