//! GA configuration.
//!
//! [`GaConfig`] holds every knob of the generational loop. Presets mirror
//! the classic demo setups for graph coloring and knapsack.

use super::selection::Selection;
use crate::error::{Result, SearchError};

/// Crossover arity for linear genomes.
///
/// Cut points split the genome into segments that alternate parent source,
/// starting with the first parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// One cut: `p1[..c] + p2[c..]`.
    OnePoint,
    /// Two cuts: `p1[..a] + p2[a..b] + p1[b..]`.
    #[default]
    TwoPoint,
}

impl Crossover {
    /// Number of cut points the operator draws.
    pub fn cut_points(self) -> usize {
        match self {
            Crossover::OnePoint => 1,
            Crossover::TwoPoint => 2,
        }
    }
}

/// Per-position mutation probability as a function of the generation.
///
/// Every schedule is non-increasing in the generation count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationSchedule {
    /// Same rate in every generation.
    Constant(f64),

    /// `max(floor, start - slope * generation)`.
    ///
    /// Explores heavily early, then settles to `floor`.
    LinearDecay {
        /// Rate at generation 0.
        start: f64,
        /// Decrease per generation.
        slope: f64,
        /// Lower bound.
        floor: f64,
    },
}

impl Default for MutationSchedule {
    fn default() -> Self {
        MutationSchedule::LinearDecay {
            start: 0.5,
            slope: 0.0005,
            floor: 0.05,
        }
    }
}

impl MutationSchedule {
    /// Mutation rate for `generation`, clamped into `[0, 1]`.
    pub fn rate(&self, generation: usize) -> f64 {
        let rate = match *self {
            MutationSchedule::Constant(rate) => rate,
            MutationSchedule::LinearDecay {
                start,
                slope,
                floor,
            } => (start - slope * generation as f64).max(floor),
        };
        rate.clamp(0.0, 1.0)
    }

    fn validate(&self) -> Result<()> {
        match *self {
            MutationSchedule::Constant(rate) => {
                if !(0.0..=1.0).contains(&rate) {
                    return Err(SearchError::config(format!(
                        "mutation rate must be in [0, 1], got {rate}"
                    )));
                }
            }
            MutationSchedule::LinearDecay {
                start,
                slope,
                floor,
            } => {
                if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&floor) {
                    return Err(SearchError::config("mutation start and floor must be in [0, 1]"));
                }
                if slope < 0.0 {
                    return Err(SearchError::config("mutation slope must be non-negative"));
                }
                if floor > start {
                    return Err(SearchError::config(
                        "mutation floor must not exceed the start rate",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use np_search::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use np_search::ga::{Crossover, GaConfig, MutationSchedule, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::OnePoint)
///     .with_mutation(MutationSchedule::Constant(0.05))
///     .with_elite_count(5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of candidates in every generation. At least 2.
    pub population_size: usize,

    /// The engine becomes exhausted once this many generations were bred.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Cut-point operator for linear genomes.
    pub crossover: Crossover,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is skipped the first parent is cloned.
    pub crossover_rate: f64,

    /// Per-position mutation rate schedule.
    pub mutation: MutationSchedule,

    /// Number of top candidates copied unchanged into the next generation.
    ///
    /// Must be smaller than `population_size`. Zero disables elitism.
    pub elite_count: usize,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            selection: Selection::default(),
            crossover: Crossover::default(),
            crossover_rate: 1.0,
            mutation: MutationSchedule::default(),
            elite_count: 0,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation schedule.
    pub fn with_mutation(mut self, mutation: MutationSchedule) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Convenience builder for tournament selection of size `k`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Preset for graph coloring.
    ///
    /// - Population 100, 1000 generations
    /// - Truncation selection, the best half carried over as elites
    /// - Two-point crossover, mutation decaying 0.5 → 0.05
    pub fn graph_coloring() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            selection: Selection::Truncation,
            crossover: Crossover::TwoPoint,
            crossover_rate: 1.0,
            mutation: MutationSchedule::default(),
            elite_count: 50,
            seed: None,
        }
    }

    /// Preset for the knapsack GA.
    ///
    /// - Population 100, 2000 generations
    /// - Tournament of 5, five elites
    /// - One-point crossover, constant mutation 0.05
    pub fn knapsack() -> Self {
        Self {
            population_size: 100,
            max_generations: 2000,
            selection: Selection::Tournament(5),
            crossover: Crossover::OnePoint,
            crossover_rate: 1.0,
            mutation: MutationSchedule::Constant(0.05),
            elite_count: 5,
            seed: None,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SearchError::config("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(SearchError::config("max_generations must be at least 1"));
        }
        if self.elite_count >= self.population_size {
            return Err(SearchError::config("elite_count must be smaller than population_size"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(SearchError::config("crossover_rate must be in [0, 1]"));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(SearchError::config("tournament size must be at least 1"));
        }
        self.mutation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.crossover, Crossover::TwoPoint);
        assert_eq!(config.elite_count, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(50)
            .with_selection(Selection::Rank)
            .with_crossover(Crossover::OnePoint)
            .with_crossover_rate(0.8)
            .with_mutation(MutationSchedule::Constant(0.1))
            .with_elite_count(4)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.crossover, Crossover::OnePoint);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert_eq!(config.mutation, MutationSchedule::Constant(0.1));
        assert_eq!(config.elite_count, 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_presets_validate() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::graph_coloring().validate().is_ok());
        assert!(GaConfig::knapsack().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elites_fill_population() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_mutation_out_of_range() {
        let config = GaConfig::default().with_mutation(MutationSchedule::Constant(1.5));
        assert!(config.validate().is_err());

        let config = GaConfig::default().with_mutation(MutationSchedule::LinearDecay {
            start: 0.1,
            slope: 0.01,
            floor: 0.2,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_crossover_rate() {
        let config = GaConfig::default().with_crossover_rate(-0.5);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_decay_schedule() {
        let schedule = MutationSchedule::default();
        assert!((schedule.rate(0) - 0.5).abs() < 1e-12);
        assert!((schedule.rate(400) - 0.3).abs() < 1e-12);
        assert!((schedule.rate(900) - 0.05).abs() < 1e-12);
        assert!((schedule.rate(100_000) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_schedules_never_increase() {
        for schedule in [MutationSchedule::default(), MutationSchedule::Constant(0.2)] {
            let rates: Vec<f64> = (0..2000).map(|g| schedule.rate(g)).collect();
            for pair in rates.windows(2) {
                assert!(pair[1] <= pair[0], "{schedule:?} increased: {pair:?}");
            }
        }
    }

    #[test]
    fn test_cut_points() {
        assert_eq!(Crossover::OnePoint.cut_points(), 1);
        assert_eq!(Crossover::TwoPoint.cut_points(), 2);
    }
}
