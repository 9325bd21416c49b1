//! Traveling salesman instances, the tour objective, and the tour
//! encodings used by the GA and simulated annealing.
//!
//! A tour is a permutation of city indices; its length is the closed
//! Euclidean cycle including the edge from the last city back to the first.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SearchError};
use crate::ga::{operators, Crossover, Direction, GaProblem};
use crate::local_search::two_opt;
use crate::sa::SaProblem;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle used for random city placement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: 100.0,
            max_x: 700.0,
            min_y: 100.0,
            max_y: 500.0,
        }
    }
}

/// An immutable TSP instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspInstance {
    cities: Vec<City>,
}

impl TspInstance {
    /// Builds an instance from explicit cities.
    ///
    /// # Errors
    /// [`SearchError::InvalidInstance`] if there are no cities or a
    /// coordinate is not finite.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(SearchError::instance("tsp instance must have at least one city"));
        }
        if let Some(i) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(SearchError::instance(format!("city {i} has a non-finite coordinate")));
        }
        Ok(Self { cities })
    }

    /// Places `n` cities uniformly inside `bounds`.
    pub fn random<R: Rng>(n: usize, bounds: Bounds, rng: &mut R) -> Result<Self> {
        if !(bounds.min_x <= bounds.max_x && bounds.min_y <= bounds.max_y) {
            return Err(SearchError::instance("bounds must satisfy min <= max"));
        }
        let cities = (0..n)
            .map(|_| {
                City::new(
                    rng.random_range(bounds.min_x..=bounds.max_x),
                    rng.random_range(bounds.min_y..=bounds.max_y),
                )
            })
            .collect();
        Self::new(cities)
    }

    /// Cities in index order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`: instances are never empty.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Distance between cities `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.cities[a].distance(&self.cities[b])
    }

    /// Flat row-major `n×n` distance matrix.
    pub fn distance_matrix(&self) -> Vec<f64> {
        let n = self.cities.len();
        let mut matrix = vec![0.0; n * n];
        for a in 0..n {
            for b in (a + 1)..n {
                let d = self.distance(a, b);
                matrix[a * n + b] = d;
                matrix[b * n + a] = d;
            }
        }
        matrix
    }

    /// Closed tour length; 0 for fewer than two cities.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        tour_length_with(order, |a, b| self.distance(a, b))
    }

    /// The tour `0, 1, ..., n-1`.
    pub fn identity_tour(&self) -> Vec<usize> {
        (0..self.cities.len()).collect()
    }
}

/// Closed tour length under an arbitrary pairwise distance.
pub fn tour_length_with<F: Fn(usize, usize) -> f64>(order: &[usize], dist: F) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    let closing = dist(order[order.len() - 1], order[0]);
    order.windows(2).map(|w| dist(w[0], w[1])).sum::<f64>() + closing
}

/// Permutation crossover used by [`TourProblem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TourCrossover {
    /// Order crossover (OX).
    #[default]
    Order,
    /// Partially mapped crossover (PMX).
    PartiallyMapped,
}

/// Tours as a GA problem: minimize length, never "converges".
///
/// Crossover and mutation are permutation-preserving, so every child is a
/// valid tour by construction.
#[derive(Debug, Clone)]
pub struct TourProblem<'a> {
    instance: &'a TspInstance,
    crossover: TourCrossover,
}

impl<'a> TourProblem<'a> {
    /// Wraps `instance` with order crossover.
    pub fn new(instance: &'a TspInstance) -> Self {
        Self {
            instance,
            crossover: TourCrossover::default(),
        }
    }

    /// Selects the permutation crossover.
    pub fn with_crossover(mut self, crossover: TourCrossover) -> Self {
        self.crossover = crossover;
        self
    }
}

impl GaProblem for TourProblem<'_> {
    type Gene = usize;
    type Score = f64;
    const DIRECTION: Direction = Direction::Minimize;

    fn genome_len(&self) -> usize {
        self.instance.len()
    }

    fn random_genome<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut tour = self.instance.identity_tour();
        tour.shuffle(rng);
        tour
    }

    fn evaluate(&self, genes: &[usize]) -> f64 {
        self.instance.tour_length(genes)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        _crossover: Crossover,
        rng: &mut R,
    ) -> Vec<usize> {
        let child = match self.crossover {
            TourCrossover::Order => operators::order_crossover(parent1, parent2, rng),
            TourCrossover::PartiallyMapped => operators::pmx_crossover(parent1, parent2, rng),
        };
        debug_assert!(operators::is_permutation(&child, self.instance.len()));
        child
    }

    fn mutate<R: Rng>(&self, genes: &mut [usize], rate: f64, rng: &mut R) {
        operators::swap_mutation(genes, rate, rng);
    }
}

/// Tours as a simulated-annealing problem.
///
/// Starts from the identity tour. A neighbor swaps two distinct random
/// positions and is then polished with 2-opt (unless disabled).
#[derive(Debug, Clone)]
pub struct TourAnnealing<'a> {
    instance: &'a TspInstance,
    refine: bool,
}

impl<'a> TourAnnealing<'a> {
    /// Wraps `instance` with 2-opt refinement enabled.
    pub fn new(instance: &'a TspInstance) -> Self {
        Self {
            instance,
            refine: true,
        }
    }

    /// Enables or disables 2-opt refinement of every proposal.
    pub fn with_refinement(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }
}

impl SaProblem for TourAnnealing<'_> {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
        self.instance.identity_tour()
    }

    fn cost(&self, tour: &Vec<usize>) -> f64 {
        self.instance.tour_length(tour)
    }

    fn neighbor<R: Rng>(&self, tour: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let n = tour.len();
        let mut next = tour.clone();
        if n >= 2 {
            let i = rng.random_range(0..n);
            let mut j = rng.random_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            next.swap(i, j);
        }
        if self.refine {
            next = two_opt(&next, |a, b| self.instance.distance(a, b));
        }
        next
    }
}
