//! LU factorization and triangular solves.

use log::{debug, warn};

use super::{DenseMatrix, LinearSolver, Pivoting, SolveOutcome, SolverConfig};
use crate::error::{GridError, Result};

/// Doolittle LU factorization `PA = LU`.
///
/// `L` (unit diagonal, not stored) and `U` share one row-major buffer.
/// `pivots[i]` is the row of `A` that ended up in row `i`.
///
/// # Zero pivots
///
/// A pivot that is exactly `0.0`, during elimination or in either
/// substitution, is replaced by [`SolverConfig::pivot_epsilon`] instead of
/// failing. Every substitution is counted and reported in
/// [`SolveOutcome::substituted_pivots`]. The resulting answer may be
/// numerically meaningless, and once epsilon-sized pivots feed later
/// elimination steps the multipliers can overflow, leaving `inf` or `NaN`
/// in the solution. [`LuFactorization::solve`] returns such values as they
/// are; [`DenseLuSolver`] rejects them with [`GridError::IllConditioned`].
#[derive(Debug, Clone)]
pub struct LuFactorization {
    lu: Vec<f64>,
    pivots: Vec<usize>,
    size: usize,
    epsilon: f64,
    substituted: usize,
}

impl LuFactorization {
    /// Factor a square matrix.
    pub fn factor(a: &DenseMatrix, config: &SolverConfig) -> Result<Self> {
        if !a.is_square() {
            return Err(GridError::DimensionMismatch {
                expected: a.rows(),
                found: a.cols(),
            });
        }

        let n = a.rows();
        let mut lu = a.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut substituted = 0usize;

        for k in 0..n {
            if config.pivoting == Pivoting::Partial {
                let mut max_val = lu[k * n + k].abs();
                let mut max_row = k;

                for i in (k + 1)..n {
                    let val = lu[i * n + k].abs();
                    if val > max_val {
                        max_val = val;
                        max_row = i;
                    }
                }

                if max_row != k {
                    pivots.swap(k, max_row);
                    for j in 0..n {
                        lu.swap(k * n + j, max_row * n + j);
                    }
                }
            }

            let mut pivot = lu[k * n + k];
            if pivot == 0.0 {
                pivot = config.pivot_epsilon;
                lu[k * n + k] = pivot;
                substituted += 1;
            }

            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                if factor == 0.0 {
                    continue;
                }
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        debug!("Factored {}x{} system ({} zero pivots replaced)", n, n, substituted);

        Ok(Self {
            lu,
            pivots,
            size: n,
            epsilon: config.pivot_epsilon,
            substituted,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row permutation produced by the factorization.
    pub fn permutation(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of zero pivots replaced during factorization.
    pub fn substituted_pivots(&self) -> usize {
        self.substituted
    }

    /// Unit lower-triangular factor.
    pub fn lower(&self) -> DenseMatrix {
        let n = self.size;
        let mut l = DenseMatrix::identity(n);
        for i in 0..n {
            for j in 0..i {
                l.set(i, j, self.lu[i * n + j]);
            }
        }
        l
    }

    /// Upper-triangular factor.
    pub fn upper(&self) -> DenseMatrix {
        let n = self.size;
        let mut u = DenseMatrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                u.set(i, j, self.lu[i * n + j]);
            }
        }
        u
    }

    /// Solve `Ax = b` with the stored factors.
    pub fn solve(&self, b: &[f64]) -> Result<SolveOutcome> {
        let n = self.size;
        if b.len() != n {
            return Err(GridError::DimensionMismatch {
                expected: n,
                found: b.len(),
            });
        }

        // Pb
        let mut x: Vec<f64> = self.pivots.iter().map(|&p| b[p]).collect();
        let mut substituted = self.substituted;

        // Forward substitution (L * y = Pb), unit diagonal
        for i in 0..n {
            let sum: f64 = (0..i).map(|j| self.lu[i * n + j] * x[j]).sum();
            x[i] -= sum;
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            let sum: f64 = ((i + 1)..n).map(|j| self.lu[i * n + j] * x[j]).sum();
            let mut diag = self.lu[i * n + i];
            if diag == 0.0 {
                diag = self.epsilon;
                substituted += 1;
            }
            x[i] = (x[i] - sum) / diag;
        }

        Ok(SolveOutcome {
            x,
            substituted_pivots: substituted,
        })
    }
}

/// Dense direct solver: LU factorization followed by substitution.
#[derive(Debug, Clone, Default)]
pub struct DenseLuSolver {
    config: SolverConfig,
}

impl DenseLuSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl LinearSolver for DenseLuSolver {
    fn solve(&self, a: &DenseMatrix, b: &[f64]) -> Result<SolveOutcome> {
        let outcome = LuFactorization::factor(a, &self.config)?.solve(b)?;

        let non_finite = outcome.x.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            return Err(GridError::IllConditioned {
                substituted_pivots: outcome.substituted_pivots,
                non_finite,
            });
        }

        if outcome.substituted_pivots > 0 {
            warn!(
                "Ill-conditioned system: {} zero pivot(s) replaced by {:e}; currents may be inaccurate",
                outcome.substituted_pivots, self.config.pivot_epsilon
            );
        }
        Ok(outcome)
    }
}
