//! Circuit equation assembly and dense direct solving.
//!
//! ## Equation system
//!
//! For an `R x C` grid with `E = 2RC - R - C` resistors the unknowns are
//! the `E` branch currents. The system `Ax = b` has exactly `E` rows:
//!
//! ```text
//! [ node rows  ]  R*C - 1 rows, entries in {0, +1, -1}   (Kirchhoff current law)
//! [ mesh rows  ]  (R-1)*(C-1) rows, entries in {0, ±R_e} (Kirchhoff voltage law)
//! ```
//!
//! One node's conservation row is dropped because the sum of all of them
//! is identically zero. `b` is zero except for `+1` on the source's row
//! and `-1` on the sink's row.
//!
//! ## Solving
//!
//! [`DenseLuSolver`] factors `A` (Doolittle, partial pivoting by default)
//! and runs forward/backward substitution against the permuted `b`.
//! Exact-zero pivots are replaced by a tiny epsilon rather than reported
//! as errors; see [`LuFactorization`]. This is `O(E^3)` and dominates the
//! cost of a navigation request. [`LinearSolver`] is the seam for a sparse
//! or iterative replacement.

mod assembly;
mod lu;
mod matrix;

pub use assembly::{redundant_node, EquationSystem};
pub use lu::{DenseLuSolver, LuFactorization};
pub use matrix::DenseMatrix;

use crate::error::Result;

/// Value substituted for an exactly-zero pivot.
pub const PIVOT_EPSILON: f64 = 1e-40;

/// Row exchange strategy during LU factorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pivoting {
    /// Swap in the row with the largest magnitude in the pivot column.
    #[default]
    Partial,
    /// Keep the row order; zero pivots go straight to epsilon substitution.
    Disabled,
}

/// Configuration for the direct solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Replacement for an exactly-zero pivot.
    pub pivot_epsilon: f64,
    /// Row exchange strategy.
    pub pivoting: Pivoting,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_epsilon: PIVOT_EPSILON,
            pivoting: Pivoting::default(),
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zero-pivot replacement.
    pub fn with_pivot_epsilon(mut self, pivot_epsilon: f64) -> Self {
        self.pivot_epsilon = pivot_epsilon;
        self
    }

    /// Set the pivoting strategy.
    pub fn with_pivoting(mut self, pivoting: Pivoting) -> Self {
        self.pivoting = pivoting;
        self
    }
}

/// Result of a linear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Solution vector
    pub x: Vec<f64>,
    /// How many zero pivots were replaced by epsilon. Non-zero means the
    /// answer is an approximation of an ill-conditioned system.
    pub substituted_pivots: usize,
}

/// A solver for square linear systems `Ax = b`.
pub trait LinearSolver {
    fn solve(&self, a: &DenseMatrix, b: &[f64]) -> Result<SolveOutcome>;
}
