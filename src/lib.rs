//! Steppable search engines for graph coloring, 0/1 knapsack and the
//! traveling salesman problem.
//!
//! Provides:
//!
//! - **Genetic Algorithm (GA)**: generational search with pluggable
//!   selection, crossover, mutation schedules and elitism. Used for graph
//!   coloring, knapsack and permutation-encoded tours.
//! - **Simulated Annealing (SA)**: Metropolis walk with geometric or
//!   Lundy-Mees cooling. The TSP neighborhood swaps two cities and polishes
//!   the result with 2-opt.
//! - **Ant Colony Optimization (ACO)**: Ant System over a TSP instance.
//! - **2-opt** local search for closed tours.
//! - **Exact knapsack** by dynamic programming.
//!
//! # Driving an engine
//!
//! Engines never run on their own thread. A driver calls
//! [`Engine::step`](engine::Engine::step) and gets back a
//! [`Snapshot`](engine::Snapshot) of the best candidate so far; rendering
//! happens behind [`Visualizer`](engine::Visualizer).
//!
//! ```
//! use np_search::engine::{drive, NoopVisualizer, Status};
//! use np_search::ga::{GaConfig, GaEngine};
//! use np_search::problems::{ColoringGraph, ColoringProblem};
//!
//! let graph = ColoringGraph::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let problem = ColoringProblem::new(&graph, 2).unwrap();
//! let mut engine = GaEngine::new(&problem, GaConfig::graph_coloring().with_seed(42)).unwrap();
//!
//! let last = drive(&mut engine, &mut NoopVisualizer, 1000).unwrap();
//! assert_eq!(last.status, Status::Converged);
//! assert_eq!(last.score, 0);
//! ```

pub mod aco;
pub mod dp;
pub mod engine;
pub mod error;
pub mod ga;
pub mod local_search;
pub mod problems;
pub mod random;
pub mod sa;

pub use error::{Result, SearchError};
