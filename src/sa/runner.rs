//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::engine::{Engine, Snapshot, Status};
use crate::error::Result;
use crate::random::{rng_from_seed, SearchRng};
use rand::Rng;

/// Result of a simulated annealing run driven by [`Annealer::run`].
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the walk stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Best cost after initialization and after every iteration.
    pub cost_history: Vec<f64>,
}

/// Steppable simulated annealing over an [`SaProblem`].
///
/// Each [`step`](Annealer::step) proposes one neighbor of the current
/// state, applies the Metropolis criterion and cools once. The walk is
/// exhausted when the temperature reaches `min_temperature` or the
/// iteration budget runs out.
///
/// Also an [`Iterator`] over snapshots, ending after the terminal one.
pub struct Annealer<'a, P: SaProblem> {
    problem: &'a P,
    config: SaConfig,
    rng: SearchRng,
    current: P::Solution,
    current_cost: f64,
    best: P::Solution,
    best_cost: f64,
    temperature: f64,
    iteration: usize,
    accepted_moves: usize,
    improving_moves: usize,
    status: Status,
    finished: bool,
}

impl<'a, P: SaProblem> Annealer<'a, P> {
    /// Validates `config` and evaluates the initial solution.
    pub fn new(problem: &'a P, config: SaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let current = problem.initial_solution(&mut rng);
        let current_cost = problem.cost(&current);
        log::debug!("sa: initial cost {current_cost}");

        Ok(Self {
            problem,
            rng,
            best: current.clone(),
            best_cost: current_cost,
            current,
            current_cost,
            temperature: config.initial_temperature,
            config,
            iteration: 0,
            accepted_moves: 0,
            improving_moves: 0,
            status: Status::Running,
            finished: false,
        })
    }

    /// Best solution seen so far.
    pub fn best(&self) -> &P::Solution {
        &self.best
    }

    /// Cost of [`best`](Self::best).
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Cost of the walk's current state.
    pub fn current_cost(&self) -> f64 {
        self.current_cost
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Accepted moves so far, improving ones included.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Strictly improving moves so far.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// Applies one Metropolis transition followed by one cooling step.
    pub fn step(&mut self) -> Snapshot<P::Solution, f64> {
        if self.status.is_terminal() {
            return self.snapshot();
        }

        let neighbor = self.problem.neighbor(&self.current, &mut self.rng);
        let neighbor_cost = self.problem.cost(&neighbor);
        let delta = neighbor_cost - self.current_cost;

        let accept = if delta < 0.0 {
            self.improving_moves += 1;
            true
        } else {
            (-delta / self.temperature).exp() > self.rng.random::<f64>()
        };

        if accept {
            self.current = neighbor;
            self.current_cost = neighbor_cost;
            self.accepted_moves += 1;

            if self.current_cost < self.best_cost {
                self.best = self.current.clone();
                self.best_cost = self.current_cost;
            }
        }

        self.iteration += 1;
        self.temperature = self.config.cooling.next(self.temperature);

        log::debug!(
            "sa: iteration {} temperature {:.4} current {} best {}",
            self.iteration,
            self.temperature,
            self.current_cost,
            self.best_cost
        );

        let budget_spent =
            self.config.max_iterations > 0 && self.iteration >= self.config.max_iterations;
        if self.temperature <= self.config.min_temperature || budget_spent {
            self.status = Status::Exhausted;
            log::info!(
                "sa: stopped after {} iterations at temperature {:.4}, best {}",
                self.iteration,
                self.temperature,
                self.best_cost
            );
        }

        self.snapshot()
    }

    /// Steps until the schedule runs out and summarizes the run.
    pub fn run(mut self) -> SaResult<P::Solution> {
        let mut cost_history = vec![self.best_cost];
        while !self.status.is_terminal() {
            cost_history.push(self.step().score);
        }

        SaResult {
            best: self.best,
            best_cost: self.best_cost,
            iterations: self.iteration,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            cost_history,
        }
    }

    fn snapshot(&self) -> Snapshot<P::Solution, f64> {
        Snapshot {
            candidate: self.best.clone(),
            score: self.best_cost,
            iteration: self.iteration,
            status: self.status,
        }
    }
}

impl<P: SaProblem> Engine for Annealer<'_, P> {
    type Candidate = P::Solution;
    type Score = f64;

    fn step(&mut self) -> Snapshot<P::Solution, f64> {
        Annealer::step(self)
    }

    fn status(&self) -> Status {
        self.status
    }

    fn iteration(&self) -> usize {
        self.iteration
    }
}

impl<P: SaProblem> Iterator for Annealer<'_, P> {
    type Item = Snapshot<P::Solution, f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let snapshot = self.step();
        self.finished = snapshot.is_terminal();
        Some(snapshot)
    }
}
