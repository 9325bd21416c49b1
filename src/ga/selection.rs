//! Selection strategies for the GA.
//!
//! Selection determines which candidates are chosen as parents for
//! crossover. All strategies sample with replacement and respect the
//! problem's [`Direction`].
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Candidate, Direction, Score};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use np_search::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Parents drawn uniformly from the better half
/// let sel = Selection::Truncation;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` candidates at random, select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Rank truncation: keep the best half, then choose uniformly within it.
    ///
    /// # Complexity
    /// O(1) per selection once the generation is ranked
    Truncation,

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// When minimizing, weights are the inverted penalty
    /// `max - score + epsilon`; when maximizing, `score - min + epsilon`.
    /// Weights are normalized by their sum.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Linear rank selection: the best of `n` gets weight `n`, the worst 1.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n) per selection once the generation is ranked
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// Truncation and rank selection sort the population on every call.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<G, S: Score, R: Rng>(
        &self,
        population: &[Candidate<G, S>],
        direction: Direction,
        rng: &mut R,
    ) -> usize {
        match self {
            Selection::Truncation | Selection::Rank => {
                let order = ranked(population, direction);
                self.select_ranked(population, &order, direction, rng)
            }
            Selection::Tournament(_) | Selection::Roulette => {
                self.select_ranked(population, &[], direction, rng)
            }
        }
    }

    /// Like [`select`](Self::select), with `order` already holding
    /// `ranked(population, direction)`.
    ///
    /// Tournament and roulette ignore `order`.
    pub(crate) fn select_ranked<G, S: Score, R: Rng>(
        &self,
        population: &[Candidate<G, S>],
        order: &[usize],
        direction: Direction,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, direction, rng),
            Selection::Truncation => truncation(order, rng),
            Selection::Roulette => roulette(population, direction, rng),
            Selection::Rank => rank(order, rng),
        }
    }
}

/// Indices sorted best first; stable, so ties keep population order.
pub(crate) fn ranked<G, S: Score>(
    population: &[Candidate<G, S>],
    direction: Direction,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| direction.compare(population[a].score(), population[b].score()));
    order
}

/// Tournament selection: pick k random candidates, return the best.
fn tournament<G, S: Score, R: Rng>(
    population: &[Candidate<G, S>],
    k: usize,
    direction: Direction,
    rng: &mut R,
) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if direction.is_better(population[idx].score(), population[best_idx].score()) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Uniform choice among the better half of `order`.
fn truncation<R: Rng>(order: &[usize], rng: &mut R) -> usize {
    debug_assert!(!order.is_empty(), "population not ranked");
    let pool = (order.len() / 2).max(1);
    order[rng.random_range(0..pool)]
}

/// Roulette wheel selection on shifted scores.
fn roulette<G, S: Score, R: Rng>(
    population: &[Candidate<G, S>],
    direction: Direction,
    rng: &mut R,
) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let scores: Vec<f64> = population.iter().map(|c| c.score().to_f64()).collect();
    let epsilon = 1e-10;

    let weights: Vec<f64> = match direction {
        Direction::Minimize => {
            let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            scores.iter().map(|&s| (max - s + epsilon).max(epsilon)).collect()
        }
        Direction::Maximize => {
            let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
            scores.iter().map(|&s| (s - min + epsilon).max(epsilon)).collect()
        }
    };

    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w / total;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank-based selection using linear ranking over `order`.
fn rank<R: Rng>(order: &[usize], rng: &mut R) -> usize {
    let n = order.len();
    if n == 1 {
        return order[0];
    }

    // weight of rank r (0 = best) is n - r
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (r, &original_idx) in order.iter().enumerate() {
        cumulative += (n - r) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(scores: &[f64]) -> Vec<Candidate<u8, f64>> {
        scores.iter().map(|&s| Candidate::from_parts(vec![], s)).collect()
    }

    fn counts(sel: Selection, pop: &[Candidate<u8, f64>], direction: Direction) -> [u32; 4] {
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[sel.select(pop, direction, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Tournament(4), &pop, Direction::Minimize);
        assert!(c[2] > 6000, "expected best to dominate, got {c:?}");

        let c = counts(Selection::Tournament(4), &pop, Direction::Maximize);
        assert!(c[0] > 6000, "expected highest score to dominate, got {c:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Tournament(1), &pop, Direction::Minimize);
        for &n in &c {
            assert!(n > 1500, "expected uniform, got counts: {c:?}");
        }
    }

    #[test]
    fn test_truncation_only_picks_better_half() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Truncation, &pop, Direction::Minimize);
        assert_eq!(c[0], 0);
        assert_eq!(c[3], 0);
        assert!(c[1] > 4000 && c[2] > 4000, "got {c:?}");
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Roulette, &pop, Direction::Minimize);
        assert!(c[2] > c[0], "best should be selected more often: {c:?}");

        let c = counts(Selection::Roulette, &pop, Direction::Maximize);
        assert!(c[0] > c[2], "best should be selected more often: {c:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Rank, &pop, Direction::Minimize);
        assert!(c[2] > c[0], "best should be selected more: {c:?}");
    }

    #[test]
    fn test_single_candidate() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        for sel in [
            Selection::Tournament(3),
            Selection::Truncation,
            Selection::Roulette,
            Selection::Rank,
        ] {
            assert_eq!(sel.select(&pop, Direction::Minimize, &mut rng), 0);
        }
    }

    #[test]
    fn test_truncation_draws_from_precomputed_order() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0, 3.0, 7.0]);
        let order = ranked(&pop, Direction::Minimize);
        assert_eq!(order, vec![2, 4, 1, 5, 3, 0]);

        let mut rng = create_rng(7);
        let mut seen = [0u32; 6];
        for _ in 0..6_000 {
            let i =
                Selection::Truncation.select_ranked(&pop, &order, Direction::Minimize, &mut rng);
            seen[i] += 1;
        }
        assert_eq!(seen[0] + seen[3] + seen[5], 0, "got {seen:?}");
        assert!(seen[1] > 1500 && seen[2] > 1500 && seen[4] > 1500, "got {seen:?}");
    }

    #[test]
    fn test_rank_with_precomputed_order_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let order = ranked(&pop, Direction::Minimize);
        let mut rng = create_rng(11);
        let mut seen = [0u32; 4];
        for _ in 0..10_000 {
            seen[Selection::Rank.select_ranked(&pop, &order, Direction::Minimize, &mut rng)] += 1;
        }
        // weights 4:3:2:1 for ranks best..worst
        assert!(seen[2] > seen[1] && seen[1] > seen[3] && seen[3] > seen[0], "got {seen:?}");
    }

    #[test]
    fn test_ranked_is_stable() {
        let pop = make_population(&[3.0, 1.0, 1.0, 2.0]);
        assert_eq!(ranked(&pop, Direction::Minimize), vec![1, 2, 3, 0]);
        assert_eq!(ranked(&pop, Direction::Maximize), vec![0, 3, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Candidate<u8, f64>> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, Direction::Minimize, &mut rng);
    }
}
