//! # Resistor Grid
//!
//! Current-following navigation over bitmap-derived resistor networks.
//!
//! This library provides:
//! - A resistor lattice derived from a grayscale bitmap (dark pixels block)
//! - Kirchhoff current/voltage law assembly into a dense linear system
//! - A dense LU solver with an explicit zero-pivot policy
//! - A greedy tracer that follows the strongest current from source to sink
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`grid`] - Intensity raster and image loading
//! - [`topology`] - Node/resistor numbering and incidence queries
//! - [`circuit`] - Resistance sampling and the navigation API
//! - [`solver`] - Equation assembly and LU solving
//! - [`tracer`] - Current-following path tracing
//!
//! ## Usage
//!
//! ```no_run
//! use resistor_grid::{NodeId, ResistorCircuit};
//!
//! let circuit = ResistorCircuit::from_image("maze.png")?;
//! let solution = circuit.navigate(NodeId(0), NodeId(42))?;
//! let path = circuit.trace_path(&solution)?;
//! for coord in path.coords() {
//!     println!("{coord}");
//! }
//! # Ok::<(), resistor_grid::GridError>(())
//! ```
//!
//! ## Method
//!
//! For an `R x C` grid each node is joined to its right and lower
//! neighbours by a resistor, giving `E = 2RC - R - C` unknown branch
//! currents. A unit current enters at the source and leaves at the sink:
//!
//! 1. Write Kirchhoff's current law at every node but one (`R*C - 1` rows)
//! 2. Write Kirchhoff's voltage law around every unit square
//! 3. Solve `Ax = b` by LU factorization
//! 4. Walk from the source, always along the largest outgoing current
//!
//! Because blocked pixels carry a much higher resistance, the current and
//! thus the traced path avoids them.

pub mod circuit;
pub mod error;
pub mod grid;
pub mod solver;
pub mod topology;
pub mod tracer;

// Re-export main types for convenience
pub use circuit::{NavigatorConfig, ResistorCircuit, Solution};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use topology::{Coord, EdgeId, NodeId, NodePair, Topology};
pub use tracer::Path;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmResistorGrid;

/// Intensity below which a node is blocked
pub const DEFAULT_BLOCKED_THRESHOLD: f64 = 0.5;

/// Resistance between two open nodes (ohms)
pub const DEFAULT_OPEN_RESISTANCE: f64 = 1.0;

/// Resistance of a resistor touching a blocked node (ohms)
pub const DEFAULT_BLOCKED_RESISTANCE: f64 = 1.0e6;
