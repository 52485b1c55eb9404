//! Request validation.

use crate::error::{GridError, Result};
use crate::topology::{NodeId, Topology};

/// Validate a source/sink request against a grid topology.
///
/// Checks:
/// - The grid has at least one row and one column
/// - Source and sink differ
/// - Both nodes lie in `[0, R*C)`
pub fn validate_request(topology: &Topology, source: NodeId, sink: NodeId) -> Result<()> {
    if topology.is_empty() {
        return Err(GridError::NoGridLoaded {
            rows: topology.rows(),
            cols: topology.cols(),
        });
    }

    if source == sink {
        return Err(GridError::DegenerateRequest { node: source });
    }

    let count = topology.node_count();
    for node in [source, sink] {
        if node.0 >= count {
            return Err(GridError::NodeOutOfRange {
                node: node.0,
                count,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request() {
        let topo = Topology::new(2, 2);
        assert!(validate_request(&topo, NodeId(0), NodeId(3)).is_ok());
        assert!(matches!(
            validate_request(&topo, NodeId(1), NodeId(1)),
            Err(GridError::DegenerateRequest { node: NodeId(1) })
        ));
        assert!(matches!(
            validate_request(&topo, NodeId(0), NodeId(4)),
            Err(GridError::NodeOutOfRange { node: 4, count: 4 })
        ));
        assert!(matches!(
            validate_request(&Topology::new(0, 3), NodeId(0), NodeId(1)),
            Err(GridError::NoGridLoaded { rows: 0, cols: 3 })
        ));
    }
}
