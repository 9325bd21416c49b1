//! Simulated annealing (SA).
//!
//! A single-solution trajectory search. Worsening moves are accepted with a
//! probability that shrinks as the temperature cools, which lets the walk
//! escape local optima early on.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{Annealer, SaResult};
pub use types::SaProblem;
