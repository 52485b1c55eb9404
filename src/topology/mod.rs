//! Grid graph topology.
//!
//! An `R x C` grid has `R * C` nodes and `E = 2RC - R - C` resistors. The
//! resistors are numbered band by band: for every grid row, first its
//! `C - 1` horizontal resistors, then the `C` vertical resistors hanging
//! below it. A band is therefore `2C - 1` ids wide and the last row only
//! contributes its horizontal part.
//!
//! ```text
//!   (0,0) -0- (0,1) -1- (0,2)
//!     |         |         |
//!     2         3         4
//!     |         |         |
//!   (1,0) -5- (1,1) -6- (1,2)
//! ```
//!
//! [`Topology`] converts between resistor ids and node pairs and answers
//! the single "which resistors touch this node" query shared by the
//! equation assembler and the path tracer.

mod index;
mod types;

pub use index::Topology;
pub use types::*;
