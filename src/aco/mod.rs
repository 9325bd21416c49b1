//! Ant colony optimization (ACO) for the traveling salesman problem.
//!
//! Each iteration, a colony of ants builds tours city by city, choosing the
//! next city with probability proportional to `τ^α · η^β` (pheromone times
//! inverse distance). Pheromone then evaporates and every tour reinforces
//! its edges in proportion to `Q / length`.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"

mod config;
mod pheromone;
mod runner;

pub use config::AcoConfig;
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AntColony};
