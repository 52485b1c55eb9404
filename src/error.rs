//! Error types for the resistor grid navigator.
//!
//! This module provides a unified error type [`GridError`] that covers
//! all error conditions that can occur while loading a grid, assembling
//! and solving the circuit equations, and tracing a current path.
//!
//! Zero pivots met by the LU solver are deliberately *not* errors: the
//! solver substitutes a tiny epsilon and reports the count on the solution
//! instead (see [`crate::solver::LuFactorization`]). Only when that
//! substitution overflows into non-finite currents does the solve fail
//! with [`GridError::IllConditioned`].

use thiserror::Error;

use crate::topology::NodeId;

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;

/// Unified error type for all grid navigation operations.
#[derive(Error, Debug)]
pub enum GridError {
    // ============ Topology Errors ============
    /// Two nodes were passed as a resistor but are not unit-distance neighbours
    #[error("Invalid topology: nodes ({row1}, {col1}) and ({row2}, {col2}) are not adjacent")]
    InvalidTopology {
        row1: usize,
        col1: usize,
        row2: usize,
        col2: usize,
    },

    /// Edge (resistor) id outside `[0, E)`
    #[error("Resistor id {id} out of range (grid has {count} resistors)")]
    OutOfRange { id: usize, count: usize },

    /// Node id outside the grid
    #[error("Node {node} out of range (grid has {count} nodes)")]
    NodeOutOfRange { node: usize, count: usize },

    /// Row/column coordinate outside the grid
    #[error("Coordinate ({row}, {col}) outside {rows}x{cols} grid")]
    CoordOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    // ============ Request Errors ============
    /// Grid has zero rows or zero columns
    #[error("No grid loaded (grid is {rows}x{cols})")]
    NoGridLoaded { rows: usize, cols: usize },

    /// Source and sink are the same node
    #[error("Degenerate request: source and sink are both node {node}")]
    DegenerateRequest { node: NodeId },

    // ============ Grid / Config Errors ============
    /// Failed to decode an image into an intensity grid
    #[error("Failed to load image '{path}': {message}")]
    ImageLoadError { path: String, message: String },

    /// Raw intensity data does not describe a valid grid
    #[error("Invalid grid: {message}")]
    InvalidGrid { message: String },

    /// Configuration value out of its valid domain
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Solver Errors ============
    /// Matrix and vector sizes do not agree
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Zero-pivot substitution overflowed and left non-finite currents
    #[error("Ill-conditioned system: {non_finite} non-finite value(s) after {substituted_pivots} zero pivot(s) were replaced")]
    IllConditioned {
        substituted_pivots: usize,
        non_finite: usize,
    },

    // ============ Tracing Errors ============
    /// No incident resistor carries current away from a non-sink node
    #[error("No outgoing current at node {node} - solution is degenerate or inconsistent")]
    NoOutgoingEdge { node: NodeId },

    /// Path exceeded the node count without reaching the sink
    #[error("Path exceeded {limit} steps without reaching the sink")]
    PathTooLong { limit: usize },

    /// Current vector does not match the resistor count of the grid
    #[error("Current vector has {found} entries but the grid has {expected} resistors")]
    DanglingCurrents { expected: usize, found: usize },
}

impl GridError {
    /// Create an image load error
    pub fn image_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImageLoadError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid grid error
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid topology error for a non-adjacent node pair
    pub fn invalid_topology(row1: usize, col1: usize, row2: usize, col2: usize) -> Self {
        Self::InvalidTopology {
            row1,
            col1,
            row2,
            col2,
        }
    }
}
