use std::collections::VecDeque;

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;

use crate::extract::Pixel;

/// Neighbour offsets "after" a pixel in scan order, so that every
/// 8-adjacent pair is visited exactly once while building edges.
const FORWARD: [(i32, i32); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Adjacency graph over a set of pixels, where two pixels are joined
/// iff they are 8-adjacent.
///
/// Nodes live in an arena ordered lexicographically by pixel, so node
/// indices, and everything derived from them, are independent of the
/// order the pixels were supplied in.
#[derive(Clone, Debug)]
pub struct PixelGraph {
    graph: UnGraph<Pixel, ()>,
    index: FxHashMap<Pixel, NodeIndex>,
}

/// The result of a breadth-first traversal.
#[derive(Clone, Debug)]
pub struct Traversal {
    pub start: NodeIndex,
    /// Nodes in visitation order, beginning with `start`.
    pub order: Vec<NodeIndex>,
    parents: Vec<Option<NodeIndex>>,
}

impl Traversal {
    /// Walks parent pointers from `end` back to the start, returning the
    /// path in start to end order. Empty if `end` was never reached.
    pub fn path_to(&self, end: NodeIndex) -> Vec<NodeIndex> {
        if end != self.start && self.parents[end.index()].is_none() {
            return vec![];
        }

        let mut path = vec![end];
        let mut current = end;
        while let Some(parent) = self.parents[current.index()] {
            path.push(parent);
            current = parent;
        }

        path.reverse();
        path
    }
}

impl PixelGraph {
    pub fn new(pixels: &[Pixel]) -> Self {
        let mut sorted = pixels.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut graph = UnGraph::with_capacity(sorted.len(), sorted.len() * 2);
        let index = sorted
            .iter()
            .map(|pixel| (*pixel, graph.add_node(*pixel)))
            .collect::<FxHashMap<_, _>>();

        for pixel in &sorted {
            let from = index[pixel];
            for (dx, dy) in FORWARD {
                let neighbour = pixel
                    .x
                    .checked_add_signed(dx)
                    .zip(pixel.y.checked_add_signed(dy))
                    .and_then(|(x, y)| index.get(&Pixel::new(x, y)));

                if let Some(to) = neighbour {
                    graph.add_edge(from, *to, ());
                }
            }
        }

        PixelGraph { graph, index }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    #[inline]
    pub fn pixel(&self, node: NodeIndex) -> Pixel {
        self.graph[node]
    }

    pub fn node(&self, pixel: &Pixel) -> Option<NodeIndex> {
        self.index.get(pixel).copied()
    }

    /// Every pixel, in arena (lexicographic) order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.graph.node_indices().map(|node| self.graph[node])
    }

    #[inline]
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.neighbors(node).count()
    }

    /// Neighbours of a node, in ascending arena order.
    pub fn neighbours(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbours = self.graph.neighbors(node).collect::<Vec<_>>();
        neighbours.sort_unstable();
        neighbours
    }

    /// Nodes with exactly one neighbour, in arena order.
    pub fn endpoints(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|node| self.degree(*node) == 1)
            .collect()
    }

    pub fn breadth_first(&self, start: NodeIndex) -> Traversal {
        let mut parents = vec![None; self.len()];
        let mut visited = vec![false; self.len()];
        let mut order = Vec::with_capacity(self.len());
        let mut queue = VecDeque::from([start]);
        visited[start.index()] = true;

        while let Some(current) = queue.pop_front() {
            order.push(current);

            for neighbour in self.neighbours(current) {
                if !visited[neighbour.index()] {
                    visited[neighbour.index()] = true;
                    parents[neighbour.index()] = Some(current);
                    queue.push_back(neighbour);
                }
            }
        }

        Traversal {
            start,
            order,
            parents,
        }
    }

    /// The two extremities of the graph, if it has at least two endpoints.
    ///
    /// Starts from the first endpoint and takes the last endpoint reached
    /// breadth-first, that is, the furthest by hop count (ties going to the
    /// later visit). When no other endpoint is reachable, the last node
    /// visited is used instead. This is a furthest-from-one-end heuristic
    /// and does not guarantee the true diameter of the graph.
    pub fn extremities(&self) -> Option<(NodeIndex, Traversal, NodeIndex)> {
        let endpoints = self.endpoints();
        let start = *endpoints.first()?;
        if endpoints.len() < 2 {
            return None;
        }

        let traversal = self.breadth_first(start);
        let terminus = traversal
            .order
            .iter()
            .rev()
            .find(|node| **node != start && self.degree(**node) == 1)
            .or_else(|| traversal.order.last())
            .copied()
            .unwrap_or(start);

        Some((start, traversal, terminus))
    }
}
