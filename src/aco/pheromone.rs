//! Pheromone trail storage.

/// Symmetric `n×n` pheromone levels in a flat row-major buffer.
///
/// Every entry stays non-negative: evaporation scales by a factor in
/// [0, 1] and deposits are skipped unless positive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    n: usize,
    levels: Vec<f64>,
}

impl PheromoneMatrix {
    /// An `n×n` matrix with every entry set to `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            n,
            levels: vec![initial.max(0.0); n * n],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Pheromone on edge `(a, b)`.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.levels[a * self.n + b]
    }

    /// Row-major view of all levels.
    pub fn as_slice(&self) -> &[f64] {
        &self.levels
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = (1.0 - rate).clamp(0.0, 1.0);
        for level in &mut self.levels {
            *level *= keep;
        }
    }

    /// Adds `amount` to every edge of the closed `tour`, in both directions.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        if tour.len() < 2 || amount <= 0.0 || !amount.is_finite() {
            return;
        }
        let closing = (tour[tour.len() - 1], tour[0]);
        for (a, b) in tour.windows(2).map(|w| (w[0], w[1])).chain([closing]) {
            self.levels[a * self.n + b] += amount;
            self.levels[b * self.n + a] += amount;
        }
    }
}
