//! Core trait definitions for the GA engine.
//!
//! [`GaProblem`] is the contract between the generic generational loop and a
//! problem encoding (graph coloring, knapsack, tours). [`Candidate`] pairs a
//! genome with the score it was given when it was created.

use rand::Rng;
use std::cmp::Ordering;

use super::config::Crossover;
use super::operators;

/// Marker trait for score values.
///
/// Scores must be comparable and cheaply copyable. Whether lower or higher
/// is better is decided by the problem's [`Direction`], never by the score
/// type itself.
pub trait Score: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the score to `f64` for roulette weights and history.
    fn to_f64(self) -> f64;
}

impl Score for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Score for usize {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Score for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Optimization direction of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower scores are better (conflict counts, tour lengths).
    Minimize,
    /// Higher scores are better (knapsack fill ratio).
    Maximize,
}

impl Direction {
    /// Orders `a` before `b` when `a` is the better score.
    ///
    /// Incomparable values (NaN) compare equal so stable sorts keep
    /// population order.
    pub fn compare<S: Score>(self, a: S, b: S) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }

    /// Returns `true` when `a` is strictly better than `b`.
    pub fn is_better<S: Score>(self, a: S, b: S) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// One encoded solution and its score.
///
/// The score is computed once, when the candidate is created through
/// [`Candidate::evaluated`]; the genome is never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate<G, S> {
    genes: Vec<G>,
    score: S,
}

impl<G, S: Copy> Candidate<G, S> {
    /// Evaluates `genes` against `problem` and freezes the result.
    pub fn evaluated<P>(problem: &P, genes: Vec<G>) -> Self
    where
        P: GaProblem<Gene = G, Score = S> + ?Sized,
    {
        debug_assert_eq!(genes.len(), problem.genome_len(), "malformed genome");
        let score = problem.evaluate(&genes);
        Self { genes, score }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(genes: Vec<G>, score: S) -> Self {
        Self { genes, score }
    }

    /// The encoded genome.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// The score assigned at creation.
    pub fn score(&self) -> S {
        self.score
    }

    /// Consumes the candidate, returning its genome.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }
}

/// Defines a problem the GA engine can search.
///
/// Implementors decide the gene type, how random genomes look, the score
/// and its [`Direction`], and the success test. Crossover defaults to the
/// configured k-point operator; mutation is problem-specific because "a
/// fresh valid value" means different things for colors, bits and tours.
pub trait GaProblem {
    /// A single encoded position.
    type Gene: Clone + PartialEq + std::fmt::Debug;

    /// The score type.
    type Score: Score;

    /// Whether lower or higher scores win.
    const DIRECTION: Direction;

    /// Fixed genome length.
    fn genome_len(&self) -> usize;

    /// Creates a random, well-formed genome.
    fn random_genome<R: Rng>(&self, rng: &mut R) -> Vec<Self::Gene>;

    /// Scores a genome. Must be pure and deterministic.
    fn evaluate(&self, genes: &[Self::Gene]) -> Self::Score;

    /// Returns `true` when `genes` (already scored `score`) ends the search.
    ///
    /// The default never converges, so the engine runs until its budget is
    /// spent.
    fn is_solution(&self, _genes: &[Self::Gene], _score: Self::Score) -> bool {
        false
    }

    /// Returns `false` for genomes that violate a hard constraint.
    ///
    /// Only consulted to break score ties: at equal score a feasible
    /// candidate outranks an infeasible one. The default accepts every
    /// genome.
    fn is_feasible(&self, _genes: &[Self::Gene]) -> bool {
        true
    }

    /// Recombines two parents into one child genome.
    fn crossover<R: Rng>(
        &self,
        parent1: &[Self::Gene],
        parent2: &[Self::Gene],
        crossover: Crossover,
        rng: &mut R,
    ) -> Vec<Self::Gene> {
        operators::k_point_crossover(parent1, parent2, crossover.cut_points(), rng)
    }

    /// Mutates each position independently with probability `rate`.
    fn mutate<R: Rng>(&self, genes: &mut [Self::Gene], rate: f64, rng: &mut R);
}
