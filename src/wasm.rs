//! WASM bindings for Resistor Grid.
//!
//! This module provides JavaScript-friendly bindings for use in web
//! browsers, typically fed from a canvas' pixel data.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmResistorGrid } from 'resistor_grid';
//!
//! await init();
//!
//! // One intensity in [0, 1] per pixel, row-major
//! const grid = new WasmResistorGrid(rows, cols, intensities);
//! const path = grid.route(0, rows * cols - 1); // Uint32Array of node ids
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{NavigatorConfig, ResistorCircuit};
use crate::error::GridError;
use crate::grid::Grid;
use crate::topology::NodeId;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: GridError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible resistor grid navigator.
///
/// Wraps the native [`ResistorCircuit`] with a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmResistorGrid {
    circuit: ResistorCircuit,
}

#[wasm_bindgen]
impl WasmResistorGrid {
    /// Create a navigator from row-major intensities.
    ///
    /// # Arguments
    /// * `rows` - Number of grid rows
    /// * `cols` - Number of grid columns
    /// * `intensities` - `rows * cols` values in [0, 1]; dark values block
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize, intensities: Vec<f64>) -> Result<WasmResistorGrid, JsValue> {
        let grid = Grid::new(rows, cols, intensities).map_err(to_js)?;
        Ok(WasmResistorGrid {
            circuit: ResistorCircuit::load(grid),
        })
    }

    /// Create a navigator with custom resistances.
    ///
    /// # Arguments
    /// * `blocked_threshold` - Intensity below which a pixel blocks (default: 0.5)
    /// * `open_resistance` - Resistance between open pixels (default: 1)
    /// * `blocked_resistance` - Resistance touching a blocked pixel (default: 1e6)
    #[wasm_bindgen]
    pub fn with_config(
        rows: usize,
        cols: usize,
        intensities: Vec<f64>,
        blocked_threshold: f64,
        open_resistance: f64,
        blocked_resistance: f64,
    ) -> Result<WasmResistorGrid, JsValue> {
        let grid = Grid::new(rows, cols, intensities).map_err(to_js)?;
        let config = NavigatorConfig::new()
            .with_blocked_threshold(blocked_threshold)
            .with_open_resistance(open_resistance)
            .with_blocked_resistance(blocked_resistance);
        let circuit = ResistorCircuit::with_config(grid, config).map_err(to_js)?;
        Ok(WasmResistorGrid { circuit })
    }

    /// Solve for the branch currents between two nodes.
    #[wasm_bindgen]
    pub fn currents(&self, source: u32, sink: u32) -> Result<Vec<f64>, JsValue> {
        let solution = self
            .circuit
            .navigate(NodeId(source as usize), NodeId(sink as usize))
            .map_err(to_js)?;
        Ok(solution.currents().to_vec())
    }

    /// Solve and trace the strongest-current path; returns node ids.
    #[wasm_bindgen]
    pub fn route(&self, source: u32, sink: u32) -> Result<Vec<u32>, JsValue> {
        let path = self
            .circuit
            .route(NodeId(source as usize), NodeId(sink as usize))
            .map_err(to_js)?;
        Ok(path.nodes().iter().map(|n| n.0 as u32).collect())
    }

    /// Number of grid rows.
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> usize {
        self.circuit.topology().rows()
    }

    /// Number of grid columns.
    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> usize {
        self.circuit.topology().cols()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
