//! 0/1 knapsack instances and their GA encoding.
//!
//! Each item has a single positive value that doubles as its weight; the
//! goal is the largest subset sum not exceeding the target capacity.
//!
//! The GA scores a selection by its fill ratio `sum / target`, with any
//! overweight selection (and any selection against a zero target) scored 0.

use rand::Rng;

use crate::error::{Result, SearchError};
use crate::ga::{operators, Direction, GaProblem};

/// Parameters for random instance generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackParams {
    /// Number of items. Must be positive.
    pub num_items: usize,
    /// Smallest item value (inclusive, positive).
    pub min_value: u32,
    /// Largest item value (inclusive).
    pub max_value: u32,
    /// Fraction of items whose values are summed into the target (0.0–1.0).
    pub target_fraction: f64,
    /// Draws allowed per item before generation gives up on uniqueness.
    pub max_attempts: usize,
}

impl Default for KnapsackParams {
    fn default() -> Self {
        Self {
            num_items: 100,
            min_value: 100,
            max_value: 2500,
            target_fraction: 0.75,
            max_attempts: 1000,
        }
    }
}

impl KnapsackParams {
    /// Sets the number of items.
    pub fn with_num_items(mut self, n: usize) -> Self {
        self.num_items = n;
        self
    }

    /// Sets the inclusive value range.
    pub fn with_value_range(mut self, min: u32, max: u32) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Sets the target fraction.
    pub fn with_target_fraction(mut self, fraction: f64) -> Self {
        self.target_fraction = fraction;
        self
    }

    /// Sets the per-item retry cap.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.num_items == 0 {
            return Err(SearchError::instance("knapsack must have at least one item"));
        }
        if self.min_value == 0 || self.min_value > self.max_value {
            return Err(SearchError::config(format!(
                "value range {}..={} must be positive and non-empty",
                self.min_value, self.max_value
            )));
        }
        if !(0.0..=1.0).contains(&self.target_fraction) {
            return Err(SearchError::config("target_fraction must be in [0, 1]"));
        }
        if self.max_attempts == 0 {
            return Err(SearchError::config("max_attempts must be at least 1"));
        }
        Ok(())
    }
}

/// An immutable knapsack instance: unique positive item values and a
/// capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackInstance {
    values: Vec<u32>,
    target: u32,
}

impl KnapsackInstance {
    /// Builds an instance from explicit values.
    ///
    /// # Errors
    /// [`SearchError::InvalidInstance`] if there are no items, a value is
    /// zero, or two values coincide.
    pub fn new(values: Vec<u32>, target: u32) -> Result<Self> {
        if values.is_empty() {
            return Err(SearchError::instance("knapsack must have at least one item"));
        }
        if let Some(i) = values.iter().position(|&v| v == 0) {
            return Err(SearchError::instance(format!("item {i} has zero value")));
        }
        let mut sorted = values.clone();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(SearchError::instance(format!(
                "duplicate item value {}",
                pair[0]
            )));
        }
        Ok(Self { values, target })
    }

    /// Draws a random instance.
    ///
    /// Each item value is redrawn until it differs from all previous ones,
    /// at most `max_attempts` times. The target is the sum of
    /// `floor(num_items * target_fraction)` distinct items chosen at random,
    /// so it is always reachable.
    ///
    /// # Errors
    /// [`SearchError::GenerationExhausted`] if a unique value could not be
    /// drawn, which happens when the value range is too narrow.
    pub fn generate<R: Rng>(params: &KnapsackParams, rng: &mut R) -> Result<Self> {
        params.validate()?;

        let mut values: Vec<u32> = Vec::with_capacity(params.num_items);
        for _ in 0..params.num_items {
            let value = draw_unique(&values, params, rng)?;
            values.push(value);
        }

        let picks = (params.num_items as f64 * params.target_fraction) as usize;
        let target = rand::seq::index::sample(rng, params.num_items, picks)
            .into_iter()
            .map(|i| values[i] as u64)
            .sum::<u64>();
        let target = u32::try_from(target)
            .map_err(|_| SearchError::instance(format!("target {target} overflows u32")))?;

        log::debug!(
            "knapsack: generated {} items, target {target}",
            params.num_items
        );
        Self::new(values, target)
    }

    /// Item values, in item order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Capacity.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: instances are never empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of the values of included items.
    pub fn selected_sum(&self, included: &[bool]) -> u64 {
        debug_assert_eq!(included.len(), self.values.len(), "one flag per item");
        self.values
            .iter()
            .zip(included)
            .filter_map(|(&v, &inc)| inc.then_some(v as u64))
            .sum()
    }

    /// Fill ratio `sum / target` in `[0, 1]`; 0 when overweight or when the
    /// target is zero.
    pub fn fill_ratio(&self, included: &[bool]) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        let sum = self.selected_sum(included);
        if sum > self.target as u64 {
            0.0
        } else {
            sum as f64 / self.target as f64
        }
    }
}

fn draw_unique<R: Rng>(taken: &[u32], params: &KnapsackParams, rng: &mut R) -> Result<u32> {
    for _ in 0..params.max_attempts {
        let value = rng.random_range(params.min_value..=params.max_value);
        if !taken.contains(&value) {
            return Ok(value);
        }
    }
    log::warn!(
        "knapsack: no unique value in {}..={} after {} attempts",
        params.min_value,
        params.max_value,
        params.max_attempts
    );
    Err(SearchError::GenerationExhausted {
        attempts: params.max_attempts,
    })
}

/// The knapsack GA problem.
///
/// Maximizes [`KnapsackInstance::fill_ratio`]. The search converges when
/// the best selection sums exactly to the target, or to a known optimum
/// set with [`with_known_optimum`](Self::with_known_optimum).
///
/// Overweight selections score the same 0 as the empty one; at that tie
/// selections within the target rank first.
#[derive(Debug, Clone)]
pub struct KnapsackProblem<'a> {
    instance: &'a KnapsackInstance,
    inclusion_probability: f64,
    goal: u64,
}

impl<'a> KnapsackProblem<'a> {
    /// Default probability that an item starts included.
    pub const DEFAULT_INCLUSION_PROBABILITY: f64 = 0.75;

    /// Wraps `instance`; success means filling the target exactly.
    pub fn new(instance: &'a KnapsackInstance) -> Self {
        Self {
            instance,
            inclusion_probability: Self::DEFAULT_INCLUSION_PROBABILITY,
            goal: instance.target() as u64,
        }
    }

    /// Sets the probability that an item is included in initial genomes.
    pub fn with_inclusion_probability(mut self, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SearchError::config(format!(
                "inclusion probability must be in [0, 1], got {p}"
            )));
        }
        self.inclusion_probability = p;
        Ok(self)
    }

    /// Treats `optimum` (for example the exact DP value) as the success sum.
    pub fn with_known_optimum(mut self, optimum: u64) -> Result<Self> {
        if optimum > self.instance.target() as u64 {
            return Err(SearchError::config(format!(
                "optimum {optimum} exceeds target {}",
                self.instance.target()
            )));
        }
        self.goal = optimum;
        Ok(self)
    }

    /// The wrapped instance.
    pub fn instance(&self) -> &KnapsackInstance {
        self.instance
    }
}

impl GaProblem for KnapsackProblem<'_> {
    type Gene = bool;
    type Score = f64;
    const DIRECTION: Direction = Direction::Maximize;

    fn genome_len(&self) -> usize {
        self.instance.len()
    }

    fn random_genome<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        (0..self.instance.len())
            .map(|_| rng.random_bool(self.inclusion_probability))
            .collect()
    }

    fn evaluate(&self, genes: &[bool]) -> f64 {
        self.instance.fill_ratio(genes)
    }

    fn is_solution(&self, genes: &[bool], _score: f64) -> bool {
        self.instance.selected_sum(genes) == self.goal
    }

    fn is_feasible(&self, genes: &[bool]) -> bool {
        self.instance.selected_sum(genes) <= self.instance.target() as u64
    }

    fn mutate<R: Rng>(&self, genes: &mut [bool], rate: f64, rng: &mut R) {
        operators::flip_mutation(genes, rate, rng);
    }
}
