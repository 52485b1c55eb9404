//! Intensity raster the resistor network is derived from.
//!
//! A [`Grid`] holds one intensity in `[0, 1]` per node, row-major. Dark
//! values (below the configured threshold) mark blocked nodes. Grids are
//! immutable once built.

use std::path::Path;

use log::debug;

use crate::error::{GridError, Result};
use crate::topology::{Coord, Topology};

/// Row-major grid of node intensities in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Create a grid from row-major intensities.
    ///
    /// Values must be finite; they are clamped to `[0, 1]`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(GridError::invalid_grid(format!(
                "{}x{} grid needs {} intensities, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(GridError::invalid_grid(format!(
                "intensity at index {pos} is not finite"
            )));
        }

        let data = data.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(Self { rows, cols, data })
    }

    /// A fully open grid (every intensity 1.0).
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![1.0; rows * cols],
        }
    }

    /// Create a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(GridError::invalid_grid(format!(
                "row {bad} has {} columns, expected {cols}",
                rows[bad].len()
            )));
        }
        Self::new(rows.len(), cols, rows.concat())
    }

    /// Decode an image file into a grid of normalised luma values.
    ///
    /// Each pixel becomes one node; black is 0.0 and white is 1.0.
    pub fn from_image(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| GridError::image_load(path.display().to_string(), e.to_string()))?;
        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();

        debug!("Loaded {}x{} image from {}", width, height, path.display());

        let data = luma.pixels().map(|p| f64::from(p.0[0]) / 255.0).collect();
        Self::new(height as usize, width as usize, data)
    }

    /// Copy of this grid with one node's intensity replaced.
    pub fn with_intensity(&self, coord: Coord, value: f64) -> Result<Self> {
        let index = self.topology().node_id(coord)?.0;
        let mut data = self.data.clone();
        data[index] = value;
        Self::new(self.rows, self.cols, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if the grid has no nodes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Topology of the node lattice this grid covers.
    pub fn topology(&self) -> Topology {
        Topology::new(self.rows, self.cols)
    }

    /// Intensity at a coordinate.
    pub fn intensity(&self, coord: Coord) -> Result<f64> {
        let index = self.topology().node_id(coord)?.0;
        Ok(self.data[index])
    }

    /// True if the node at `coord` is darker than `threshold`.
    pub fn is_blocked(&self, coord: Coord, threshold: f64) -> Result<bool> {
        Ok(self.intensity(coord)? < threshold)
    }

    /// Raw row-major intensities.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
