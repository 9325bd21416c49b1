//! Graph coloring instances and their GA encoding.
//!
//! A candidate assigns a color id in `[0, max_colors)` to every vertex;
//! its score is the number of conflicting edges (both endpoints share a
//! color). Zero conflicts is a proper coloring.

use rand::Rng;

use crate::error::{Result, SearchError};
use crate::ga::{operators, Direction, GaProblem};

/// An undirected simple graph.
///
/// Stores both a flat `n×n` adjacency matrix (symmetric, zero diagonal) for
/// scoring and an edge list for independent verification. Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColoringGraph {
    n: usize,
    adjacency: Vec<bool>,
    edges: Vec<(usize, usize)>,
}

impl ColoringGraph {
    /// Builds a graph with `n` vertices from an edge list.
    ///
    /// Duplicate edges (in either orientation) are merged.
    ///
    /// # Errors
    /// [`SearchError::InvalidInstance`] if `n == 0`, an endpoint is out of
    /// range, or an edge is a self loop.
    pub fn new(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if n == 0 {
            return Err(SearchError::instance("graph must have at least one vertex"));
        }

        let mut graph = Self {
            n,
            adjacency: vec![false; n * n],
            edges: Vec::with_capacity(edges.len()),
        };
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(SearchError::instance(format!(
                    "edge ({u}, {v}) out of range for {n} vertices"
                )));
            }
            if u == v {
                return Err(SearchError::instance(format!("self loop on vertex {u}")));
            }
            graph.connect(u, v);
        }
        Ok(graph)
    }

    /// Random graph: each unordered pair is an edge with probability
    /// `edge_probability`.
    pub fn random<R: Rng>(n: usize, edge_probability: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&edge_probability) {
            return Err(SearchError::instance(format!(
                "edge probability must be in [0, 1], got {edge_probability}"
            )));
        }
        let mut graph = Self::new(n, &[])?;
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.random_bool(edge_probability) {
                    graph.connect(u, v);
                }
            }
        }
        log::debug!("coloring: random graph with {n} vertices, {} edges", graph.edges.len());
        Ok(graph)
    }

    fn connect(&mut self, u: usize, v: usize) {
        let (u, v) = if u < v { (u, v) } else { (v, u) };
        if self.adjacency[u * self.n + v] {
            return;
        }
        self.adjacency[u * self.n + v] = true;
        self.adjacency[v * self.n + u] = true;
        self.edges.push((u, v));
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Edges as `(u, v)` with `u < v`, in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Returns `true` if `u` and `v` are adjacent.
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.adjacency[u * self.n + v]
    }

    /// Number of conflicting edges under `colors`.
    ///
    /// Scans the upper triangle of the adjacency matrix. Any color id is
    /// accepted, so this also scores partial or out-of-range assignments.
    pub fn conflicts(&self, colors: &[usize]) -> usize {
        debug_assert_eq!(colors.len(), self.n, "one color per vertex");
        let mut conflicts = 0;
        for u in 0..self.n {
            let row = &self.adjacency[u * self.n..(u + 1) * self.n];
            for v in (u + 1)..self.n {
                if row[v] && colors[u] == colors[v] {
                    conflicts += 1;
                }
            }
        }
        conflicts
    }

    /// Checks every edge of the edge list for a color clash.
    ///
    /// Independent of [`conflicts`](Self::conflicts): used to confirm a zero
    /// score before declaring success.
    pub fn is_proper_coloring(&self, colors: &[usize]) -> bool {
        colors.len() == self.n && self.edges.iter().all(|&(u, v)| colors[u] != colors[v])
    }
}

/// Graph coloring with a fixed palette, as a GA problem.
///
/// Minimizes the conflict count. Converges only on a zero-conflict
/// assignment that also passes [`ColoringGraph::is_proper_coloring`].
#[derive(Debug, Clone)]
pub struct ColoringProblem<'a> {
    graph: &'a ColoringGraph,
    max_colors: usize,
}

impl<'a> ColoringProblem<'a> {
    /// Colors `graph` with at most `max_colors` colors.
    pub fn new(graph: &'a ColoringGraph, max_colors: usize) -> Result<Self> {
        if max_colors == 0 {
            return Err(SearchError::config("max_colors must be at least 1"));
        }
        Ok(Self { graph, max_colors })
    }

    /// Uses one color per vertex, which always admits a proper coloring.
    pub fn with_vertex_count_colors(graph: &'a ColoringGraph) -> Self {
        Self {
            graph,
            max_colors: graph.vertex_count(),
        }
    }

    /// The graph being colored.
    pub fn graph(&self) -> &ColoringGraph {
        self.graph
    }

    /// Palette size.
    pub fn max_colors(&self) -> usize {
        self.max_colors
    }
}

impl GaProblem for ColoringProblem<'_> {
    type Gene = usize;
    type Score = usize;
    const DIRECTION: Direction = Direction::Minimize;

    fn genome_len(&self) -> usize {
        self.graph.vertex_count()
    }

    fn random_genome<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        (0..self.graph.vertex_count())
            .map(|_| rng.random_range(0..self.max_colors))
            .collect()
    }

    fn evaluate(&self, genes: &[usize]) -> usize {
        self.graph.conflicts(genes)
    }

    fn is_solution(&self, genes: &[usize], score: usize) -> bool {
        if score != 0 {
            return false;
        }
        if !self.graph.is_proper_coloring(genes) {
            log::warn!("coloring: zero score rejected by edge re-check");
            return false;
        }
        true
    }

    fn mutate<R: Rng>(&self, genes: &mut [usize], rate: f64, rng: &mut R) {
        let palette = self.max_colors;
        operators::reset_mutation(genes, rate, rng, |rng| rng.random_range(0..palette));
        debug_assert!(genes.iter().all(|&c| c < palette), "color out of palette");
    }
}
