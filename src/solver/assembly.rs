//! Kirchhoff equation assembly for a resistor grid.

use log::debug;

use super::DenseMatrix;
use crate::circuit::{validate_request, ResistanceModel};
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::topology::{EdgeId, NodeId, Topology};

/// Choose the node whose conservation row is left out of the system.
///
/// Node 0 is dropped unless node 0 or the last node is a terminal; then the
/// lowest-numbered node from 1 upward that is neither source nor sink is
/// dropped. A two-node grid has no such node and drops the sink's row.
pub fn redundant_node(topology: &Topology, source: NodeId, sink: NodeId) -> NodeId {
    let is_terminal = |n: NodeId| n == source || n == sink;
    let first = NodeId(0);

    let corner_is_terminal = is_terminal(first) || topology.last_node().is_some_and(is_terminal);
    if !corner_is_terminal {
        return first;
    }

    (1..topology.node_count())
        .map(NodeId)
        .find(|&n| !is_terminal(n))
        .unwrap_or(sink)
}

/// The assembled system `Ax = b` for one source/sink request.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationSystem {
    matrix: DenseMatrix,
    rhs: Vec<f64>,
    topology: Topology,
    resistances: Vec<f64>,
    source: NodeId,
    sink: NodeId,
    redundant: NodeId,
}

impl EquationSystem {
    /// Build the current-conservation and mesh equations of `grid` with a
    /// unit current entering at `source` and leaving at `sink`.
    pub fn assemble(
        grid: &Grid,
        model: &ResistanceModel,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Self> {
        let topology = grid.topology();
        validate_request(&topology, source, sink)?;

        let resistances = model.resistances(grid)?;
        let redundant = redundant_node(&topology, source, sink);
        let size = topology.edge_count();

        let mut system = Self {
            matrix: DenseMatrix::zeros(size, size),
            rhs: vec![0.0; size],
            topology,
            resistances,
            source,
            sink,
            redundant,
        };

        system.stamp_conservation_rows()?;
        system.stamp_mesh_rows()?;

        if let Some(row) = system.node_row(source) {
            system.rhs[row] = 1.0;
        }
        if let Some(row) = system.node_row(sink) {
            system.rhs[row] = -1.0;
        }

        debug!(
            "Assembled {}x{} system for {} -> {} on {}x{} grid (dropped {})",
            size,
            size,
            source,
            sink,
            topology.rows(),
            topology.cols(),
            redundant
        );

        Ok(system)
    }

    /// One row per node except the redundant one: `+1` for resistors whose
    /// positive direction leaves the node, `-1` for those entering it.
    fn stamp_conservation_rows(&mut self) -> Result<()> {
        for n in 0..self.topology.node_count() {
            let node = NodeId(n);
            let Some(row) = self.node_row(node) else {
                continue;
            };
            for incidence in self.topology.incident_edges(node)? {
                self.matrix.set(row, incidence.edge.0, incidence.sign());
            }
        }
        Ok(())
    }

    /// One row per unit square, traversed clockwise from its top-left node:
    /// `R_top*x_top + R_right*x_right - R_bottom*x_bottom - R_left*x_left = 0`.
    fn stamp_mesh_rows(&mut self) -> Result<()> {
        let base = self.node_equation_count();
        let mesh_cols = self.topology.cols() - 1;

        for r in 0..self.topology.rows() - 1 {
            for c in 0..mesh_cols {
                let row = base + r * mesh_cols + c;
                let mesh = self.topology.mesh_edges(r, c)?;

                let loop_terms = [
                    (mesh.top, self.resistance(mesh.top)?),
                    (mesh.right, self.resistance(mesh.right)?),
                    (mesh.bottom, -self.resistance(mesh.bottom)?),
                    (mesh.left, -self.resistance(mesh.left)?),
                ];
                for (edge, coefficient) in loop_terms {
                    self.matrix.set(row, edge.0, coefficient);
                }
            }
        }
        Ok(())
    }

    /// Row holding `node`'s conservation equation, or `None` for the
    /// redundant node.
    pub fn node_row(&self, node: NodeId) -> Option<usize> {
        match node.0.cmp(&self.redundant.0) {
            std::cmp::Ordering::Less => Some(node.0),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(node.0 - 1),
        }
    }

    /// Conservation row of any node, including the dropped one.
    pub fn full_conservation_row(&self, node: NodeId) -> Result<Vec<f64>> {
        let mut row = vec![0.0; self.topology.edge_count()];
        for incidence in self.topology.incident_edges(node)? {
            row[incidence.edge.0] = incidence.sign();
        }
        Ok(row)
    }

    /// Net current leaving `node` through its resistors under `currents`.
    pub fn net_outflow(&self, node: NodeId, currents: &[f64]) -> Result<f64> {
        if currents.len() != self.topology.edge_count() {
            return Err(GridError::DanglingCurrents {
                expected: self.topology.edge_count(),
                found: currents.len(),
            });
        }
        Ok(self
            .topology
            .incident_edges(node)?
            .iter()
            .map(|incidence| incidence.sign() * currents[incidence.edge.0])
            .sum())
    }

    /// Resistance assigned to a resistor at assembly time.
    pub fn resistance(&self, edge: EdgeId) -> Result<f64> {
        self.resistances
            .get(edge.0)
            .copied()
            .ok_or(GridError::OutOfRange {
                id: edge.0,
                count: self.resistances.len(),
            })
    }

    /// Coefficient matrix `A`.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// Right-hand side `b`.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Node whose conservation equation was left out.
    pub fn redundant_node(&self) -> NodeId {
        self.redundant
    }

    /// Number of conservation rows, `R*C - 1`.
    pub fn node_equation_count(&self) -> usize {
        self.topology.node_count() - 1
    }

    /// Number of mesh rows, `(R-1)*(C-1)`.
    pub fn mesh_equation_count(&self) -> usize {
        self.topology.mesh_count()
    }
}
