//! Core types for grid topology.

use std::fmt;

/// A node of the grid graph: a lattice intersection, `row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A resistor in the canonical band enumeration of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Row/column position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The two end nodes of a resistor, or a source/sink request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePair {
    pub row1: usize,
    pub col1: usize,
    pub row2: usize,
    pub col2: usize,
}

impl NodePair {
    pub fn new(row1: usize, col1: usize, row2: usize, col2: usize) -> Self {
        Self {
            row1,
            col1,
            row2,
            col2,
        }
    }

    pub fn from_coords(first: Coord, second: Coord) -> Self {
        Self::new(first.row, first.col, second.row, second.col)
    }

    pub fn first(&self) -> Coord {
        Coord::new(self.row1, self.col1)
    }

    pub fn second(&self) -> Coord {
        Coord::new(self.row2, self.col2)
    }

    /// Same pair with the lexicographically smaller node first.
    pub fn normalized(&self) -> Self {
        if self.second() < self.first() {
            Self::from_coords(self.second(), self.first())
        } else {
            *self
        }
    }

    /// Order-independent equality.
    pub fn same_nodes(&self, other: &NodePair) -> bool {
        self.normalized() == other.normalized()
    }
}

impl fmt::Display for NodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first(), self.second())
    }
}

/// Direction of a neighbour as seen from a node.
///
/// The declaration order is the tie-break order used when several incident
/// resistors carry the same current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

/// One resistor attached to a node, seen from that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incidence {
    /// The resistor
    pub edge: EdgeId,
    /// Node on the other side of the resistor
    pub neighbor: NodeId,
    /// Where the neighbour lies
    pub direction: Direction,
    /// True when the resistor's positive direction (lower node to higher
    /// node) points away from this node.
    pub leaves: bool,
}

impl Incidence {
    /// Coefficient of this resistor in the node's conservation row: the row
    /// evaluates to the net current leaving the node.
    pub fn sign(&self) -> f64 {
        if self.leaves {
            1.0
        } else {
            -1.0
        }
    }

    /// True if `current` (signed, in the resistor's canonical orientation)
    /// flows away from this node.
    pub fn carries_away(&self, current: f64) -> bool {
        self.sign() * current > 0.0
    }
}

/// The four resistors bounding one elementary square of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshEdges {
    pub top: EdgeId,
    pub bottom: EdgeId,
    pub left: EdgeId,
    pub right: EdgeId,
}
