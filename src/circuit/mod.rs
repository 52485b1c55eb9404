//! Resistor network representation.
//!
//! This module binds an intensity [`Grid`](crate::grid::Grid) to resistor
//! values and exposes the navigation API: [`ResistorCircuit::navigate`]
//! assembles and solves the network for one source/sink pair and
//! [`ResistorCircuit::trace_path`] follows the resulting currents.

mod config;
mod network;
mod resistance;
mod validate;

pub use config::NavigatorConfig;
pub use network::{ResistorCircuit, Solution};
pub use resistance::ResistanceModel;
pub use validate::validate_request;
