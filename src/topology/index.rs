//! Resistor index bijection and incidence queries.

use super::types::{Coord, Direction, EdgeId, Incidence, MeshEdges, NodeId, NodePair};
use crate::error::{GridError, Result};

/// Shape of a resistor grid. Cheap to copy; carries no resistance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Topology {
    rows: usize,
    cols: usize,
}

impl Topology {
    /// Create the topology of a `rows x cols` node lattice.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if the grid has no nodes.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Number of nodes, `R * C`.
    pub fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of horizontal resistors, `R * (C - 1)`.
    pub fn horizontal_count(&self) -> usize {
        self.node_count().saturating_sub(self.rows)
    }

    /// Number of vertical resistors, `C * (R - 1)`.
    pub fn vertical_count(&self) -> usize {
        self.node_count().saturating_sub(self.cols)
    }

    /// Number of resistors, `E = 2RC - R - C`.
    pub fn edge_count(&self) -> usize {
        self.horizontal_count() + self.vertical_count()
    }

    /// Number of elementary squares, `(R - 1) * (C - 1)`.
    pub fn mesh_count(&self) -> usize {
        self.rows.saturating_sub(1) * self.cols.saturating_sub(1)
    }

    /// Width of one band of resistor ids.
    fn band_width(&self) -> usize {
        2 * self.cols - 1
    }

    fn check_coord(&self, coord: Coord) -> Result<()> {
        if coord.row < self.rows && coord.col < self.cols {
            Ok(())
        } else {
            Err(GridError::CoordOutOfRange {
                row: coord.row,
                col: coord.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node.0 < self.node_count() {
            Ok(())
        } else {
            Err(GridError::NodeOutOfRange {
                node: node.0,
                count: self.node_count(),
            })
        }
    }

    /// Node id of a coordinate.
    pub fn node_id(&self, coord: Coord) -> Result<NodeId> {
        self.check_coord(coord)?;
        Ok(NodeId(coord.row * self.cols + coord.col))
    }

    /// Coordinate of a node id.
    pub fn coord(&self, node: NodeId) -> Result<Coord> {
        self.check_node(node)?;
        Ok(Coord::new(node.0 / self.cols, node.0 % self.cols))
    }

    /// The last node, `R * C - 1`.
    pub fn last_node(&self) -> Option<NodeId> {
        self.node_count().checked_sub(1).map(NodeId)
    }

    // Callers guarantee (row, col) and (row, col + 1) are in bounds.
    fn horizontal_id(&self, row: usize, col: usize) -> EdgeId {
        EdgeId(row * self.band_width() + col)
    }

    // Callers guarantee (row, col) and (row + 1, col) are in bounds.
    fn vertical_id(&self, row: usize, col: usize) -> EdgeId {
        EdgeId(row * self.band_width() + (self.cols - 1) + col)
    }

    /// Resistor id connecting two adjacent nodes, in either order.
    ///
    /// Fails with [`GridError::InvalidTopology`] when the nodes are not
    /// exactly one step apart along one axis.
    pub fn edge_id(&self, row1: usize, col1: usize, row2: usize, col2: usize) -> Result<EdgeId> {
        let a = Coord::new(row1, col1);
        let b = Coord::new(row2, col2);
        self.check_coord(a)?;
        self.check_coord(b)?;

        let (lo, hi) = if b < a { (b, a) } else { (a, b) };

        if lo.row == hi.row && hi.col == lo.col + 1 {
            Ok(self.horizontal_id(lo.row, lo.col))
        } else if lo.col == hi.col && hi.row == lo.row + 1 {
            Ok(self.vertical_id(lo.row, lo.col))
        } else {
            Err(GridError::invalid_topology(row1, col1, row2, col2))
        }
    }

    /// Resistor id of a node pair.
    pub fn edge_id_of(&self, pair: &NodePair) -> Result<EdgeId> {
        self.edge_id(pair.row1, pair.col1, pair.row2, pair.col2)
    }

    /// Resistor id connecting two node ids.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        let a = self.coord(a)?;
        let b = self.coord(b)?;
        self.edge_id(a.row, a.col, b.row, b.col)
    }

    /// End nodes of a resistor, lower node first.
    pub fn nodes_from_edge_id(&self, edge: EdgeId) -> Result<NodePair> {
        if edge.0 >= self.edge_count() {
            return Err(GridError::OutOfRange {
                id: edge.0,
                count: self.edge_count(),
            });
        }

        let horizontal_in_band = self.cols - 1;
        let row = edge.0 / self.band_width();
        let pos = edge.0 % self.band_width();

        if pos < horizontal_in_band {
            Ok(NodePair::new(row, pos, row, pos + 1))
        } else {
            let col = pos - horizontal_in_band;
            Ok(NodePair::new(row, col, row + 1, col))
        }
    }

    /// End node ids of a resistor, lower node first.
    pub fn endpoints(&self, edge: EdgeId) -> Result<(NodeId, NodeId)> {
        let pair = self.nodes_from_edge_id(edge)?;
        Ok((self.node_id(pair.first())?, self.node_id(pair.second())?))
    }

    /// Resistors attached to `node`, in Up, Down, Left, Right order.
    ///
    /// Corners yield two entries, borders three and interior nodes four.
    pub fn incident_edges(&self, node: NodeId) -> Result<Vec<Incidence>> {
        let Coord { row, col } = self.coord(node)?;
        let mut incident = Vec::with_capacity(4);

        for direction in Direction::ALL {
            let entry = match direction {
                Direction::Up if row > 0 => Some(Incidence {
                    edge: self.vertical_id(row - 1, col),
                    neighbor: NodeId(node.0 - self.cols),
                    direction,
                    leaves: false,
                }),
                Direction::Down if row + 1 < self.rows => Some(Incidence {
                    edge: self.vertical_id(row, col),
                    neighbor: NodeId(node.0 + self.cols),
                    direction,
                    leaves: true,
                }),
                Direction::Left if col > 0 => Some(Incidence {
                    edge: self.horizontal_id(row, col - 1),
                    neighbor: NodeId(node.0 - 1),
                    direction,
                    leaves: false,
                }),
                Direction::Right if col + 1 < self.cols => Some(Incidence {
                    edge: self.horizontal_id(row, col),
                    neighbor: NodeId(node.0 + 1),
                    direction,
                    leaves: true,
                }),
                _ => None,
            };
            incident.extend(entry);
        }

        Ok(incident)
    }

    /// Number of resistors attached to `node`.
    pub fn degree(&self, node: NodeId) -> Result<usize> {
        Ok(self.incident_edges(node)?.len())
    }

    /// Resistors bounding the unit square whose top-left node is `(row, col)`.
    pub fn mesh_edges(&self, row: usize, col: usize) -> Result<MeshEdges> {
        self.check_coord(Coord::new(row + 1, col + 1))?;
        Ok(MeshEdges {
            top: self.horizontal_id(row, col),
            bottom: self.horizontal_id(row + 1, col),
            left: self.vertical_id(row, col),
            right: self.vertical_id(row, col + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: [(usize, usize); 7] = [(1, 2), (2, 1), (2, 2), (3, 4), (4, 3), (5, 5), (10, 10)];

    #[test]
    fn test_edge_count() {
        assert_eq!(Topology::new(2, 2).edge_count(), 4);
        assert_eq!(Topology::new(10, 10).edge_count(), 180);
        assert_eq!(Topology::new(3, 4).edge_count(), 2 * 12 - 3 - 4);
        assert_eq!(Topology::new(1, 5).edge_count(), 4);
        assert_eq!(Topology::new(0, 5).edge_count(), 0);
        assert_eq!(Topology::new(5, 0).edge_count(), 0);
    }

    #[test]
    fn test_known_ids_10x10() {
        let topo = Topology::new(10, 10);
        // band width 19: ids 0..9 horizontal in row 0, 9..19 vertical below it
        assert_eq!(topo.nodes_from_edge_id(EdgeId(0)).unwrap(), NodePair::new(0, 0, 0, 1));
        assert_eq!(topo.nodes_from_edge_id(EdgeId(13)).unwrap(), NodePair::new(0, 4, 1, 4));
        assert_eq!(topo.nodes_from_edge_id(EdgeId(19)).unwrap(), NodePair::new(1, 0, 1, 1));
        assert_eq!(topo.nodes_from_edge_id(EdgeId(38)).unwrap(), NodePair::new(2, 0, 2, 1));
        assert_eq!(topo.edge_id(1, 4, 0, 4).unwrap(), EdgeId(13));
    }

    #[test]
    fn test_edge_round_trip() {
        for (rows, cols) in SHAPES {
            let topo = Topology::new(rows, cols);
            for id in 0..topo.edge_count() {
                let pair = topo.nodes_from_edge_id(EdgeId(id)).unwrap();
                assert_eq!(topo.edge_id_of(&pair).unwrap(), EdgeId(id), "{rows}x{cols} id {id}");
            }
        }
    }

    #[test]
    fn test_pair_round_trip() {
        for (rows, cols) in SHAPES {
            let topo = Topology::new(rows, cols);
            for r in 0..rows {
                for c in 0..cols {
                    let here = Coord::new(r, c);
                    let neighbours = [(r + 1, c), (r, c + 1)];
                    for (r2, c2) in neighbours {
                        if r2 >= rows || c2 >= cols {
                            continue;
                        }
                        let pair = NodePair::from_coords(here, Coord::new(r2, c2));
                        let reversed = NodePair::from_coords(Coord::new(r2, c2), here);
                        let id = topo.edge_id_of(&reversed).unwrap();
                        assert!(topo.nodes_from_edge_id(id).unwrap().same_nodes(&pair));
                    }
                }
            }
        }
    }

    #[test]
    fn test_edge_id_rejects_non_adjacent() {
        let topo = Topology::new(3, 3);
        assert!(matches!(topo.edge_id(0, 0, 1, 1), Err(GridError::InvalidTopology { .. })));
        assert!(matches!(topo.edge_id(0, 0, 0, 2), Err(GridError::InvalidTopology { .. })));
        assert!(matches!(topo.edge_id(1, 1, 1, 1), Err(GridError::InvalidTopology { .. })));
        assert!(matches!(topo.edge_id(2, 2, 2, 3), Err(GridError::CoordOutOfRange { .. })));
    }

    #[test]
    fn test_nodes_from_edge_id_out_of_range() {
        let topo = Topology::new(3, 3);
        assert!(matches!(
            topo.nodes_from_edge_id(EdgeId(12)),
            Err(GridError::OutOfRange { id: 12, count: 12 })
        ));
    }

    #[test]
    fn test_degrees() {
        let topo = Topology::new(3, 4);
        assert_eq!(topo.degree(NodeId(0)).unwrap(), 2);
        assert_eq!(topo.degree(NodeId(3)).unwrap(), 2);
        assert_eq!(topo.degree(NodeId(11)).unwrap(), 2);
        assert_eq!(topo.degree(NodeId(1)).unwrap(), 3);
        assert_eq!(topo.degree(NodeId(4)).unwrap(), 3);
        assert_eq!(topo.degree(NodeId(5)).unwrap(), 4);
        assert_eq!(Topology::new(1, 3).degree(NodeId(1)).unwrap(), 2);
    }

    #[test]
    fn test_incident_edges_order_and_orientation() {
        let topo = Topology::new(3, 3);
        let center = topo.node_id(Coord::new(1, 1)).unwrap();
        let incident = topo.incident_edges(center).unwrap();
        let dirs: Vec<_> = incident.iter().map(|i| i.direction).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());

        for inc in &incident {
            let (lo, hi) = topo.endpoints(inc.edge).unwrap();
            if inc.leaves {
                assert_eq!((lo, hi), (center, inc.neighbor));
            } else {
                assert_eq!((lo, hi), (inc.neighbor, center));
            }
        }
    }

    #[test]
    fn test_mesh_edges() {
        let topo = Topology::new(2, 3);
        let mesh = topo.mesh_edges(0, 1).unwrap();
        assert_eq!(mesh.top, topo.edge_id(0, 1, 0, 2).unwrap());
        assert_eq!(mesh.bottom, topo.edge_id(1, 1, 1, 2).unwrap());
        assert_eq!(mesh.left, topo.edge_id(0, 1, 1, 1).unwrap());
        assert_eq!(mesh.right, topo.edge_id(0, 2, 1, 2).unwrap());
        assert!(topo.mesh_edges(1, 0).is_err());
    }
}
