//! Resistor network bound to a grid.

use std::path::Path as FsPath;

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{NavigatorConfig, ResistanceModel};
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::solver::{DenseLuSolver, DenseMatrix, EquationSystem, LinearSolver};
use crate::topology::{EdgeId, NodeId, NodePair, Topology};
use crate::tracer::{self, Path};

/// Solved currents for one source/sink request.
///
/// Owns its own `A`, `b` and `x`; nothing is shared between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    system: EquationSystem,
    currents: Vec<f64>,
    substituted_pivots: usize,
}

impl Solution {
    /// Coefficient matrix `A`.
    pub fn matrix(&self) -> &DenseMatrix {
        self.system.matrix()
    }

    /// Right-hand side `b`.
    pub fn rhs(&self) -> &[f64] {
        self.system.rhs()
    }

    /// Branch currents `x`, indexed by resistor id.
    pub fn currents(&self) -> &[f64] {
        &self.currents
    }

    /// Current through one resistor.
    pub fn current(&self, edge: EdgeId) -> Result<f64> {
        self.currents
            .get(edge.0)
            .copied()
            .ok_or(GridError::OutOfRange {
                id: edge.0,
                count: self.currents.len(),
            })
    }

    /// The assembled equation system.
    pub fn system(&self) -> &EquationSystem {
        &self.system
    }

    pub fn source(&self) -> NodeId {
        self.system.source()
    }

    pub fn sink(&self) -> NodeId {
        self.system.sink()
    }

    /// Node whose conservation equation was dropped.
    pub fn redundant_node(&self) -> NodeId {
        self.system.redundant_node()
    }

    /// Zero pivots replaced by epsilon during the solve. Non-zero means the
    /// currents approximate an ill-conditioned system.
    pub fn substituted_pivots(&self) -> usize {
        self.substituted_pivots
    }

    /// True if the solve needed no epsilon substitution.
    pub fn is_exact(&self) -> bool {
        self.substituted_pivots == 0
    }
}

/// A grid of resistors ready for navigation requests.
///
/// The grid is immutable once loaded; every [`navigate`](Self::navigate)
/// call assembles and solves a fresh system.
#[derive(Debug, Clone)]
pub struct ResistorCircuit {
    grid: Grid,
    topology: Topology,
    config: NavigatorConfig,
    model: ResistanceModel,
    solver: DenseLuSolver,
}

impl ResistorCircuit {
    /// Bind a grid with the default configuration.
    pub fn load(grid: Grid) -> Self {
        let config = NavigatorConfig::default();
        Self {
            topology: grid.topology(),
            model: config.resistance_model(),
            solver: DenseLuSolver::new(config.solver_config()),
            config,
            grid,
        }
    }

    /// Bind a grid with a custom configuration.
    pub fn with_config(grid: Grid, config: NavigatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            topology: grid.topology(),
            model: config.resistance_model(),
            solver: DenseLuSolver::new(config.solver_config()),
            config,
            grid,
        })
    }

    /// Load a bitmap and bind it with the default configuration.
    pub fn from_image(path: impl AsRef<FsPath>) -> Result<Self> {
        Ok(Self::load(Grid::from_image(path)?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Resistance of one resistor.
    pub fn resistance_of(&self, edge: EdgeId) -> Result<f64> {
        self.model.resistance_of(&self.grid, edge)
    }

    /// Assemble and solve the network for a unit current from `source` to
    /// `sink`.
    pub fn navigate(&self, source: NodeId, sink: NodeId) -> Result<Solution> {
        let system = EquationSystem::assemble(&self.grid, &self.model, source, sink)?;
        let outcome = self.solver.solve(system.matrix(), system.rhs())?;

        debug!(
            "Solved {} -> {} ({} currents, {} substituted pivots)",
            source,
            sink,
            outcome.x.len(),
            outcome.substituted_pivots
        );

        Ok(Solution {
            system,
            currents: outcome.x,
            substituted_pivots: outcome.substituted_pivots,
        })
    }

    /// [`navigate`](Self::navigate) with source and sink given as
    /// `(row1, col1)` and `(row2, col2)`.
    pub fn navigate_coords(&self, request: &NodePair) -> Result<Solution> {
        let source = self.topology.node_id(request.first())?;
        let sink = self.topology.node_id(request.second())?;
        self.navigate(source, sink)
    }

    /// Run independent requests. Each one owns its buffers; with the
    /// `parallel` feature they are spread over the rayon pool.
    pub fn navigate_many(&self, requests: &[(NodeId, NodeId)]) -> Vec<Result<Solution>> {
        #[cfg(feature = "parallel")]
        let results = requests
            .par_iter()
            .map(|&(source, sink)| self.navigate(source, sink))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = requests
            .iter()
            .map(|&(source, sink)| self.navigate(source, sink))
            .collect();

        results
    }

    /// Trace the strongest-current path of a solution.
    pub fn trace_path(&self, solution: &Solution) -> Result<Path> {
        tracer::trace_path(
            &self.topology,
            solution.currents(),
            solution.source(),
            solution.sink(),
        )
    }

    /// Navigate and trace in one call.
    pub fn route(&self, source: NodeId, sink: NodeId) -> Result<Path> {
        let solution = self.navigate(source, sink)?;
        self.trace_path(&solution)
    }
}
