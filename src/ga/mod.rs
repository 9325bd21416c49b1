//! Genetic algorithm engine.
//!
//! A generic, steppable GA built on trait-based abstractions. Problems plug
//! in by implementing [`GaProblem`], which specifies how to create, score,
//! recombine and mutate genomes, and whether lower or higher scores win.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, selection, crossover, mutation schedule,
//!   elitism, presets
//! - [`GaEngine`]: the generational state machine, advanced by `step()`
//! - [`Candidate`]: an immutable genome with its score
//!
//! # Submodules
//!
//! - [`operators`]: cut-point and permutation crossovers, mutation operators
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{Crossover, GaConfig, MutationSchedule};
pub use runner::{GaEngine, GaResult};
pub use selection::Selection;
pub use types::{Candidate, Direction, GaProblem, Score};
