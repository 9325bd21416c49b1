//! Problem instances and their search encodings.
//!
//! - [`coloring`]: graph coloring with a fixed palette (GA).
//! - [`knapsack`]: 0/1 subset-sum knapsack (GA, or exact via [`crate::dp`]).
//! - [`tsp`]: Euclidean traveling salesman (GA, SA with 2-opt, or
//!   [`crate::aco`]).

pub mod coloring;
pub mod knapsack;
pub mod tsp;

pub use coloring::{ColoringGraph, ColoringProblem};
pub use knapsack::{KnapsackInstance, KnapsackParams, KnapsackProblem};
pub use tsp::{Bounds, City, TourAnnealing, TourCrossover, TourProblem, TspInstance};
