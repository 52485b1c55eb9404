//! Dense row-major matrix storage.

use std::fmt;

use crate::error::{GridError, Result};

/// Dense `rows x cols` matrix of `f64`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build a matrix from nested rows of equal length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(GridError::DimensionMismatch {
                expected: cols,
                found: bad.len(),
            });
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.concat(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set matrix element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] += value;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Number of non-zero entries in a row.
    pub fn nonzeros_in_row(&self, row: usize) -> usize {
        self.row(row).iter().filter(|v| **v != 0.0).count()
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.cols {
            return Err(GridError::DimensionMismatch {
                expected: self.cols,
                found: x.len(),
            });
        }
        Ok((0..self.rows)
            .map(|r| self.row(r).iter().zip(x).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let line: Vec<String> = self.row(r).iter().map(|v| format!("{v:>10.4}")).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_add() {
        let mut m = DenseMatrix::zeros(2, 3);
        m.set(1, 2, 4.0);
        m.add(1, 2, 1.5);
        assert_eq!(m.get(1, 2), 5.5);
        assert_eq!(m.row(1), &[0.0, 0.0, 5.5]);
        assert_eq!(m.nonzeros_in_row(1), 1);
        assert_eq!(m.nonzeros_in_row(0), 0);
    }

    #[test]
    fn test_mul_vec() {
        let m = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.mul_vec(&[1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
        assert!(matches!(
            m.mul_vec(&[1.0]),
            Err(GridError::DimensionMismatch { expected: 2, found: 1 })
        ));
        assert_eq!(DenseMatrix::identity(2).mul_vec(&[5.0, 6.0]).unwrap(), vec![5.0, 6.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
    }
}
