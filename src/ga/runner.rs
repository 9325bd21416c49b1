//! GA generational loop.
//!
//! [`GaEngine`] is a steppable state machine:
//! `Running → {Converged, Exhausted}`. Each [`step`](GaEngine::step) checks
//! the success criterion, then breeds exactly one generation
//! (selection → crossover → mutation → elitism → replacement).

use super::config::GaConfig;
use super::selection::ranked;
use super::types::{Candidate, GaProblem, Score};
use crate::engine::{Engine, Snapshot, Status};
use crate::error::Result;
use crate::random::{rng_from_seed, SearchRng};
use rand::Rng;
use std::cmp::Ordering;

/// Result of a GA run driven to completion by [`GaEngine::run`].
#[derive(Debug, Clone)]
pub struct GaResult<G, S> {
    /// The best candidate found during the entire run.
    pub best: Candidate<G, S>,

    /// Total number of generations bred.
    pub generations: usize,

    /// Terminal state reached.
    pub status: Status,

    /// Best-ever score after initialization and after each generation.
    pub score_history: Vec<f64>,
}

/// Population-based search engine over a [`GaProblem`].
///
/// # Usage
///
/// ```ignore
/// let graph = ColoringGraph::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])?;
/// let problem = ColoringProblem::new(&graph, 2)?;
/// let mut engine = GaEngine::new(&problem, GaConfig::graph_coloring().with_seed(42))?;
/// while !engine.step().is_terminal() {}
/// ```
pub struct GaEngine<'a, P: GaProblem> {
    problem: &'a P,
    config: GaConfig,
    rng: SearchRng,
    population: Vec<Candidate<P::Gene, P::Score>>,
    best: Candidate<P::Gene, P::Score>,
    generation: usize,
    status: Status,
}

impl<'a, P: GaProblem> GaEngine<'a, P> {
    /// Validates `config` and seeds a random initial population.
    pub fn new(problem: &'a P, config: GaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let population: Vec<_> = (0..config.population_size)
            .map(|_| Candidate::evaluated(problem, problem.random_genome(&mut rng)))
            .collect();
        let best = population[best_index(problem, &population)].clone();

        log::debug!(
            "ga: initialized population of {} (genome length {})",
            config.population_size,
            problem.genome_len()
        );

        Ok(Self {
            problem,
            config,
            rng,
            population,
            best,
            generation: 0,
            status: Status::Running,
        })
    }

    /// Current population, in order.
    pub fn population(&self) -> &[Candidate<P::Gene, P::Score>] {
        &self.population
    }

    /// Best candidate seen so far.
    pub fn best(&self) -> &Candidate<P::Gene, P::Score> {
        &self.best
    }

    /// Number of generations bred so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Applies one generation (or detects convergence) and reports the best.
    pub fn step(&mut self) -> Snapshot<Vec<P::Gene>, P::Score> {
        if self.status.is_terminal() {
            return self.snapshot();
        }

        if self.try_converge() {
            return self.snapshot();
        }

        self.population = self.breed();
        self.generation += 1;

        let idx = best_index(self.problem, &self.population);
        if outranks(self.problem, &self.population[idx], &self.best) {
            self.best = self.population[idx].clone();
        }

        log::debug!(
            "ga: generation {} best {:?}",
            self.generation,
            self.best.score()
        );

        if !self.try_converge() && self.generation >= self.config.max_generations {
            self.status = Status::Exhausted;
            log::info!(
                "ga: exhausted after {} generations, best {:?}",
                self.generation,
                self.best.score()
            );
        }

        self.snapshot()
    }

    /// Steps until a terminal state and summarizes the run.
    pub fn run(mut self) -> GaResult<P::Gene, P::Score> {
        let mut score_history = vec![self.best.score().to_f64()];

        while !self.status.is_terminal() {
            let before = self.generation;
            let snapshot = self.step();
            if self.generation > before {
                score_history.push(snapshot.score.to_f64());
            }
        }

        GaResult {
            best: self.best,
            generations: self.generation,
            status: self.status,
            score_history,
        }
    }

    /// Marks the engine converged if a candidate sharing the current
    /// population's best score is a verified solution.
    ///
    /// Tied candidates are tried in population order.
    fn try_converge(&mut self) -> bool {
        let problem = self.problem;
        let leader = self.population[best_index(problem, &self.population)].score();
        let found = self.population.iter().find(|c| {
            P::DIRECTION.compare(c.score(), leader) == Ordering::Equal
                && problem.is_solution(c.genes(), c.score())
        });
        let Some(found) = found else {
            return false;
        };
        // a verified solution always outranks or ties the best-seen record
        self.best = found.clone();
        self.status = Status::Converged;
        log::info!(
            "ga: converged at generation {} with score {:?}",
            self.generation,
            self.best.score()
        );
        true
    }

    fn breed(&mut self) -> Vec<Candidate<P::Gene, P::Score>> {
        let size = self.config.population_size;
        let mut next = Vec::with_capacity(size);

        let order = ranked(&self.population, P::DIRECTION);
        next.extend(
            order[..self.config.elite_count]
                .iter()
                .map(|&i| self.population[i].clone()),
        );

        let selection = self.config.selection;
        let rate = self.config.mutation.rate(self.generation);
        while next.len() < size {
            let i =
                selection.select_ranked(&self.population, &order, P::DIRECTION, &mut self.rng);
            let j =
                selection.select_ranked(&self.population, &order, P::DIRECTION, &mut self.rng);
            let (p1, p2) = (self.population[i].genes(), self.population[j].genes());

            let mut genes = if self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                self.problem
                    .crossover(p1, p2, self.config.crossover, &mut self.rng)
            } else {
                p1.to_vec()
            };
            self.problem.mutate(&mut genes, rate, &mut self.rng);

            next.push(Candidate::evaluated(self.problem, genes));
        }

        next
    }

    fn snapshot(&self) -> Snapshot<Vec<P::Gene>, P::Score> {
        Snapshot {
            candidate: self.best.genes().to_vec(),
            score: self.best.score(),
            iteration: self.generation,
            status: self.status,
        }
    }
}

impl<P: GaProblem> Engine for GaEngine<'_, P> {
    type Candidate = Vec<P::Gene>;
    type Score = P::Score;

    fn step(&mut self) -> Snapshot<Self::Candidate, Self::Score> {
        GaEngine::step(self)
    }

    fn status(&self) -> Status {
        self.status
    }

    fn iteration(&self) -> usize {
        self.generation
    }
}

/// Whether `a` should replace `b` as the best: a strictly better score, or
/// an equal one where only `a` is feasible.
fn outranks<P: GaProblem>(
    problem: &P,
    a: &Candidate<P::Gene, P::Score>,
    b: &Candidate<P::Gene, P::Score>,
) -> bool {
    match P::DIRECTION.compare(a.score(), b.score()) {
        Ordering::Less => true,
        Ordering::Equal => problem.is_feasible(a.genes()) && !problem.is_feasible(b.genes()),
        Ordering::Greater => false,
    }
}

/// Index of the best candidate. Among equal scores feasible genomes win,
/// then the first in population order.
fn best_index<P: GaProblem>(problem: &P, population: &[Candidate<P::Gene, P::Score>]) -> usize {
    let mut best = 0;
    for (i, candidate) in population.iter().enumerate().skip(1) {
        if outranks(problem, candidate, &population[best]) {
            best = i;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
