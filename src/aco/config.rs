//! ACO configuration.

use crate::error::{Result, SearchError};

/// Configuration for [`AntColony`](super::AntColony).
///
/// # Examples
///
/// ```
/// use np_search::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(30)
///     .with_beta(3.0)
///     .with_evaporation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants per iteration.
    pub num_ants: usize,

    /// Number of iterations before the colony is exhausted.
    pub max_iterations: usize,

    /// Pheromone exponent α.
    pub alpha: f64,

    /// Heuristic (inverse distance) exponent β.
    pub beta: f64,

    /// Fraction of pheromone removed each iteration, in [0, 1].
    pub evaporation_rate: f64,

    /// Deposit constant Q: a tour of length `L` adds `Q / L` per edge.
    pub pheromone_constant: f64,

    /// Pheromone level on every edge before the first iteration.
    pub initial_pheromone: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 20,
            max_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            pheromone_constant: 100.0,
            initial_pheromone: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the pheromone exponent α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the fraction of pheromone lost per iteration.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit constant `Q`.
    pub fn with_pheromone_constant(mut self, q: f64) -> Self {
        self.pheromone_constant = q;
        self
    }

    /// Sets the starting level on every edge.
    pub fn with_initial_pheromone(mut self, tau: f64) -> Self {
        self.initial_pheromone = tau;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(SearchError::config("num_ants must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(SearchError::config("max_iterations must be at least 1"));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if value < 0.0 || !value.is_finite() {
                return Err(SearchError::config(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(SearchError::config(format!(
                "evaporation_rate must be in [0, 1], got {}",
                self.evaporation_rate
            )));
        }
        if self.pheromone_constant <= 0.0 || !self.pheromone_constant.is_finite() {
            return Err(SearchError::config("pheromone_constant must be positive"));
        }
        if self.initial_pheromone <= 0.0 || !self.initial_pheromone.is_finite() {
            return Err(SearchError::config("initial_pheromone must be positive"));
        }
        Ok(())
    }
}
