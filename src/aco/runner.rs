//! Ant System iteration loop.

use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;
use crate::engine::{Engine, Snapshot, Status};
use crate::error::Result;
use crate::problems::tsp::TspInstance;
use crate::random::{rng_from_seed, SearchRng};
use rand::Rng;

/// Result of a colony run driven by [`AntColony::run`].
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Shortest tour found.
    pub best_tour: Vec<usize>,

    /// Length of [`best_tour`](Self::best_tour).
    pub best_length: f64,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Best length after each iteration.
    pub length_history: Vec<f64>,
}

/// Steppable ant colony over a [`TspInstance`].
///
/// # Usage
///
/// ```ignore
/// let mut colony = AntColony::new(&instance, AcoConfig::default().with_seed(1))?;
/// for snapshot in &mut colony {
///     visualizer.render(&snapshot);
/// }
/// ```
pub struct AntColony<'a> {
    instance: &'a TspInstance,
    config: AcoConfig,
    rng: SearchRng,
    distances: Vec<f64>,
    /// `η^β` per edge, 0 for coincident cities.
    attractiveness: Vec<f64>,
    pheromone: PheromoneMatrix,
    best_tour: Vec<usize>,
    best_length: f64,
    iteration: usize,
    status: Status,
    finished: bool,
}

impl<'a> AntColony<'a> {
    /// Validates `config` and precomputes distances and heuristic weights.
    pub fn new(instance: &'a TspInstance, config: AcoConfig) -> Result<Self> {
        config.validate()?;

        let n = instance.len();
        let distances = instance.distance_matrix();
        let attractiveness = distances
            .iter()
            .map(|&d| if d > 0.0 { d.recip().powf(config.beta) } else { 0.0 })
            .collect();

        Ok(Self {
            instance,
            rng: rng_from_seed(config.seed),
            distances,
            attractiveness,
            pheromone: PheromoneMatrix::new(n, config.initial_pheromone),
            best_tour: instance.identity_tour(),
            best_length: f64::INFINITY,
            config,
            iteration: 0,
            status: Status::Running,
            finished: false,
        })
    }

    /// Current pheromone levels.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Best tour found so far.
    pub fn best_tour(&self) -> &[usize] {
        &self.best_tour
    }

    /// Length of [`best_tour`](Self::best_tour); infinite before the first step.
    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Runs one colony iteration: construct, evaporate, reinforce.
    pub fn step(&mut self) -> Snapshot<Vec<usize>, f64> {
        if self.status.is_terminal() {
            return self.snapshot();
        }

        let mut fallbacks = 0usize;
        let tours: Vec<(Vec<usize>, f64)> = (0..self.config.num_ants)
            .map(|_| {
                let tour = self.construct_tour(&mut fallbacks);
                let length = self.tour_length(&tour);
                (tour, length)
            })
            .collect();
        if fallbacks > 0 {
            log::warn!(
                "aco: {fallbacks} uniform fallback choices in iteration {} (degenerate weights)",
                self.iteration + 1
            );
        }

        for (tour, length) in &tours {
            if *length < self.best_length {
                self.best_tour = tour.clone();
                self.best_length = *length;
            }
        }

        self.pheromone.evaporate(self.config.evaporation_rate);
        for (tour, length) in &tours {
            if *length > 0.0 {
                self.pheromone
                    .deposit(tour, self.config.pheromone_constant / length);
            }
        }

        self.iteration += 1;
        log::debug!(
            "aco: iteration {} best {}",
            self.iteration,
            self.best_length
        );

        if self.iteration >= self.config.max_iterations {
            self.status = Status::Exhausted;
            log::info!(
                "aco: exhausted after {} iterations, best {}",
                self.iteration,
                self.best_length
            );
        }

        self.snapshot()
    }

    /// Steps until exhausted and summarizes the run.
    pub fn run(mut self) -> AcoResult {
        let mut length_history = vec![];
        while !self.status.is_terminal() {
            length_history.push(self.step().score);
        }

        AcoResult {
            best_tour: self.best_tour,
            best_length: self.best_length,
            iterations: self.iteration,
            length_history,
        }
    }

    /// Builds one ant's tour from a random start city.
    ///
    /// `fallbacks` counts moves where every weight was zero or non-finite
    /// and the next city was drawn uniformly instead.
    pub(crate) fn construct_tour(&mut self, fallbacks: &mut usize) -> Vec<usize> {
        let n = self.instance.len();
        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        let mut current = self.rng.random_range(0..n);
        visited[current] = true;
        tour.push(current);

        while tour.len() < n {
            weights.clear();
            weights.extend((0..n).filter(|&j| !visited[j]).map(|j| {
                let tau = self.pheromone.get(current, j).powf(self.config.alpha);
                (j, tau * self.attractiveness[current * n + j])
            }));

            let total: f64 = weights.iter().map(|&(_, w)| w).sum();
            let next = if total > 0.0 && total.is_finite() {
                roulette(&weights, total, &mut self.rng)
            } else {
                *fallbacks += 1;
                weights[self.rng.random_range(0..weights.len())].0
            };

            visited[next] = true;
            tour.push(next);
            current = next;
        }

        debug_assert!(crate::ga::operators::is_permutation(&tour, n));
        tour
    }

    fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = self.instance.len();
        crate::problems::tsp::tour_length_with(tour, |a, b| self.distances[a * n + b])
    }

    fn snapshot(&self) -> Snapshot<Vec<usize>, f64> {
        Snapshot {
            candidate: self.best_tour.clone(),
            score: self.best_length,
            iteration: self.iteration,
            status: self.status,
        }
    }
}

/// Roulette-wheel pick over `(city, weight)` pairs with positive `total`.
fn roulette<R: Rng>(weights: &[(usize, f64)], total: f64, rng: &mut R) -> usize {
    let mut threshold = rng.random::<f64>() * total;
    for &(city, w) in weights {
        if threshold < w {
            return city;
        }
        threshold -= w;
    }
    // rounding can leave a sliver past the last bucket
    weights
        .iter()
        .rev()
        .find(|&&(_, w)| w > 0.0)
        .map_or(weights[weights.len() - 1].0, |&(city, _)| city)
}

impl Engine for AntColony<'_> {
    type Candidate = Vec<usize>;
    type Score = f64;

    fn step(&mut self) -> Snapshot<Vec<usize>, f64> {
        AntColony::step(self)
    }

    fn status(&self) -> Status {
        self.status
    }

    fn iteration(&self) -> usize {
        self.iteration
    }
}

impl Iterator for AntColony<'_> {
    type Item = Snapshot<Vec<usize>, f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let snapshot = self.step();
        self.finished = snapshot.is_terminal();
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::is_permutation;
    use crate::problems::tsp::{Bounds, City};
    use crate::random::create_rng;

    fn square() -> TspInstance {
        TspInstance::new(vec![
            City::new(0.0, 0.0),
            City::new(10.0, 10.0),
            City::new(0.0, 10.0),
            City::new(10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_square_reaches_perimeter() {
        let inst = square();
        let result = AntColony::new(&inst, AcoConfig::default().with_seed(42))
            .unwrap()
            .run();
        assert!((result.best_length - 40.0).abs() < 1e-6);
        assert_eq!(result.iterations, 100);
        assert!(is_permutation(&result.best_tour, 4));
    }

    #[test]
    fn test_ant_tours_are_permutations() {
        let mut rng = create_rng(5);
        let inst = TspInstance::random(25, Bounds::default(), &mut rng).unwrap();
        let mut colony = AntColony::new(&inst, AcoConfig::default().with_seed(5)).unwrap();
        let mut fallbacks = 0;
        for _ in 0..1000 {
            let tour = colony.construct_tour(&mut fallbacks);
            assert!(is_permutation(&tour, 25));
        }
        assert_eq!(fallbacks, 0);
    }

    #[test]
    fn test_coincident_cities_fall_back_to_uniform() {
        let inst = TspInstance::new(vec![City::new(1.0, 1.0); 5]).unwrap();
        let mut colony = AntColony::new(&inst, AcoConfig::default().with_seed(9)).unwrap();
        let mut fallbacks = 0;
        let tour = colony.construct_tour(&mut fallbacks);
        assert!(is_permutation(&tour, 5));
        assert_eq!(fallbacks, 4);

        // zero-length tours deposit nothing, so pheromone only evaporates
        let snapshot = colony.step();
        assert_eq!(snapshot.score, 0.0);
        assert!(colony.pheromone().as_slice().iter().all(|&t| (t - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_best_length_non_increasing() {
        let mut rng = create_rng(6);
        let inst = TspInstance::random(15, Bounds::default(), &mut rng).unwrap();
        let colony = AntColony::new(
            &inst,
            AcoConfig::default().with_max_iterations(30).with_seed(6),
        )
        .unwrap();
        let lengths: Vec<f64> = colony.map(|s| s.score).collect();
        assert_eq!(lengths.len(), 30);
        for w in lengths.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_pheromone_stays_symmetric() {
        let mut rng = create_rng(2);
        let inst = TspInstance::random(8, Bounds::default(), &mut rng).unwrap();
        let mut colony = AntColony::new(
            &inst,
            AcoConfig::default().with_max_iterations(5).with_seed(2),
        )
        .unwrap();
        while !colony.step().is_terminal() {}
        let m = colony.pheromone();
        for a in 0..8 {
            for b in 0..8 {
                assert!(m.get(a, b) >= 0.0);
                assert!((m.get(a, b) - m.get(b, a)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_terminal_step_is_idempotent() {
        let inst = square();
        let mut colony = AntColony::new(
            &inst,
            AcoConfig::default().with_max_iterations(2).with_seed(1),
        )
        .unwrap();
        colony.step();
        let last = colony.step();
        assert_eq!(last.status, Status::Exhausted);
        assert_eq!(colony.step(), last);
        assert_eq!(colony.next(), Some(last));
        assert_eq!(colony.next(), None);
    }

    #[test]
    fn test_unbounded_iteration_budget() {
        let inst = square();
        let config = AcoConfig::default().with_max_iterations(usize::MAX).with_seed(4);
        let mut colony = AntColony::new(&inst, config).unwrap();
        let snapshots: Vec<_> = colony.by_ref().take(3).collect();
        assert!(snapshots.iter().all(|s| s.status == Status::Running));
        assert_eq!(colony.iteration(), 3);
        assert!(colony.best_length().is_finite());
    }

    #[test]
    fn test_run_history_matches_iterations() {
        let inst = square();
        let config = AcoConfig::default().with_max_iterations(7).with_seed(4);
        let result = AntColony::new(&inst, config).unwrap().run();
        assert_eq!(result.iterations, 7);
        assert_eq!(result.length_history.len(), 7);
    }

    #[test]
    fn test_single_city() {
        let inst = TspInstance::new(vec![City::new(3.0, 3.0)]).unwrap();
        let result = AntColony::new(&inst, AcoConfig::default().with_max_iterations(3))
            .unwrap()
            .run();
        assert_eq!(result.best_tour, vec![0]);
        assert_eq!(result.best_length, 0.0);
    }
}
