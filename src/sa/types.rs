//! Core trait for simulated annealing.

use rand::Rng;

/// Defines a simulated annealing problem.
///
/// The implementor supplies the starting point, the cost and the
/// neighborhood. [`Annealer`](super::Annealer) handles temperature,
/// acceptance and cooling.
///
/// # Minimization
///
/// SA minimizes the cost. For maximization, negate it.
///
/// # Examples
///
/// ```
/// use np_search::sa::SaProblem;
/// use rand::Rng;
///
/// struct Parabola;
///
/// impl SaProblem for Parabola {
///     type Solution = f64;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
///         rng.random_range(-10.0..10.0)
///     }
///
///     fn cost(&self, x: &f64) -> f64 {
///         x * x
///     }
///
///     fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
///         x + rng.random_range(-1.0..1.0)
///     }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaProblem {
    /// The solution representation type.
    type Solution: Clone;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Proposes a neighbor of `solution`.
    ///
    /// The neighborhood must be connected: any solution reachable from any
    /// other via a sequence of moves.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
