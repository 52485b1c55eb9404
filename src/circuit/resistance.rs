//! Resistance sampling from grid intensities.

use crate::error::Result;
use crate::grid::Grid;
use crate::topology::EdgeId;
use crate::{DEFAULT_BLOCKED_RESISTANCE, DEFAULT_BLOCKED_THRESHOLD, DEFAULT_OPEN_RESISTANCE};

/// Maps node intensities to resistor values.
///
/// A resistor is blocked when either of its end nodes is darker than
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceModel {
    /// Intensity below which a node counts as blocked
    pub threshold: f64,
    /// Resistance of a resistor between two open nodes (ohms)
    pub open_resistance: f64,
    /// Resistance of a resistor touching a blocked node (ohms)
    pub blocked_resistance: f64,
}

impl Default for ResistanceModel {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BLOCKED_THRESHOLD,
            open_resistance: DEFAULT_OPEN_RESISTANCE,
            blocked_resistance: DEFAULT_BLOCKED_RESISTANCE,
        }
    }
}

impl ResistanceModel {
    /// Resistance of one resistor of `grid`.
    pub fn resistance_of(&self, grid: &Grid, edge: EdgeId) -> Result<f64> {
        let pair = grid.topology().nodes_from_edge_id(edge)?;
        let blocked = grid.is_blocked(pair.first(), self.threshold)?
            || grid.is_blocked(pair.second(), self.threshold)?;

        Ok(if blocked {
            self.blocked_resistance
        } else {
            self.open_resistance
        })
    }

    /// Resistances of every resistor of `grid`, indexed by edge id.
    pub fn resistances(&self, grid: &Grid) -> Result<Vec<f64>> {
        (0..grid.topology().edge_count())
            .map(|id| self.resistance_of(grid, EdgeId(id)))
            .collect()
    }
}
