//! Current-following path tracer.
//!
//! Starting at the source, the tracer repeatedly crosses the incident
//! resistor that carries the most current away from the current node,
//! never stepping straight back over the resistor it just used. Candidates
//! are examined in Up, Down, Left, Right order and a candidate only
//! replaces the best one so far if its current is strictly larger, so ties
//! go to the earliest direction in that order.
//!
//! With a consistent solve every step moves to a strictly lower node
//! potential, so the walk cannot cycle; the step limit only guards against
//! degenerate current vectors.

use log::debug;

use crate::circuit::validate_request;
use crate::error::{GridError, Result};
use crate::topology::{Coord, EdgeId, Incidence, NodeId, Topology};

/// Ordered node sequence from source to sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
    coords: Vec<Coord>,
}

impl Path {
    fn new(topology: &Topology, nodes: Vec<NodeId>) -> Result<Self> {
        let coords = nodes
            .iter()
            .map(|&n| topology.coord(n))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { nodes, coords })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Number of nodes on the path (steps + 1).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn sink(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// The incident resistor of `node` carrying the largest current away from
/// it, skipping `exclude`. `None` if nothing flows out.
pub fn strongest_outgoing(
    topology: &Topology,
    currents: &[f64],
    node: NodeId,
    exclude: Option<EdgeId>,
) -> Result<Option<Incidence>> {
    let mut best: Option<(Incidence, f64)> = None;

    for incidence in topology.incident_edges(node)? {
        if Some(incidence.edge) == exclude {
            continue;
        }
        let current = currents
            .get(incidence.edge.0)
            .copied()
            .ok_or(GridError::DanglingCurrents {
                expected: topology.edge_count(),
                found: currents.len(),
            })?;
        if !incidence.carries_away(current) {
            continue;
        }
        let magnitude = current.abs();
        if best.map_or(true, |(_, m)| magnitude > m) {
            best = Some((incidence, magnitude));
        }
    }

    Ok(best.map(|(incidence, _)| incidence))
}

/// Follow the strongest outgoing current from `source` until `sink`.
///
/// `currents` is indexed by resistor id, positive meaning flow from the
/// lower-numbered end node to the higher-numbered one.
pub fn trace_currents(
    topology: &Topology,
    currents: &[f64],
    source: NodeId,
    sink: NodeId,
) -> Result<Vec<NodeId>> {
    validate_request(topology, source, sink)?;
    if currents.len() != topology.edge_count() {
        return Err(GridError::DanglingCurrents {
            expected: topology.edge_count(),
            found: currents.len(),
        });
    }

    let limit = topology.node_count();
    let mut path = Vec::new();
    let mut node = source;
    let mut came_by = None;

    while node != sink {
        if path.len() >= limit {
            return Err(GridError::PathTooLong { limit });
        }
        let step = strongest_outgoing(topology, currents, node, came_by)?
            .ok_or(GridError::NoOutgoingEdge { node })?;

        path.push(node);
        node = step.neighbor;
        came_by = Some(step.edge);
    }
    path.push(sink);

    debug!("Traced {} -> {} in {} steps", source, sink, path.len() - 1);

    Ok(path)
}

/// [`trace_currents`] wrapped into a [`Path`].
pub fn trace_path(
    topology: &Topology,
    currents: &[f64],
    source: NodeId,
    sink: NodeId,
) -> Result<Path> {
    let nodes = trace_currents(topology, currents, source, sink)?;
    Path::new(topology, nodes)
}
