//! End-to-end navigation scenarios.

use approx::assert_relative_eq;
use resistor_grid::solver::Pivoting;
use resistor_grid::{Coord, Grid, GridError, NavigatorConfig, NodeId, ResistorCircuit, Solution};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn coords(path: &[(usize, usize)]) -> Vec<Coord> {
    path.iter().map(|&rc| Coord::from(rc)).collect()
}

/// Every node's full conservation row, including the dropped one, must
/// balance: +1 leaves the source, -1 leaves the sink, 0 elsewhere.
fn assert_conservation(circuit: &ResistorCircuit, solution: &Solution) {
    let topo = circuit.topology();
    for n in 0..topo.node_count() {
        let node = NodeId(n);
        let expected = if node == solution.source() {
            1.0
        } else if node == solution.sink() {
            -1.0
        } else {
            0.0
        };
        let outflow = solution.system().net_outflow(node, solution.currents()).unwrap();
        assert_relative_eq!(outflow, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_open_square() {
    init_logging();
    let circuit = ResistorCircuit::load(Grid::open(2, 2));
    let solution = circuit.navigate(NodeId(0), NodeId(3)).unwrap();

    assert_eq!(circuit.topology().edge_count(), 4);
    assert_eq!(solution.matrix().rows(), 4);
    assert_eq!(solution.matrix().cols(), 4);
    assert_eq!(solution.system().node_equation_count(), 3);
    assert_eq!(solution.system().mesh_equation_count(), 1);
    assert!(solution.is_exact());

    // Two equal halves: top/right and left/bottom
    for &x in solution.currents() {
        assert_relative_eq!(x, 0.5, epsilon = 1e-12);
    }
    assert_conservation(&circuit, &solution);

    let path = circuit.trace_path(&solution).unwrap();
    let valid = [
        coords(&[(0, 0), (0, 1), (1, 1)]),
        coords(&[(0, 0), (1, 0), (1, 1)]),
    ];
    assert!(valid.contains(&path.coords().to_vec()), "unexpected path {:?}", path.coords());
}

#[test]
fn test_blocked_square() {
    init_logging();
    let grid = Grid::open(2, 2).with_intensity(Coord::new(0, 1), 0.0).unwrap();
    let circuit = ResistorCircuit::load(grid);
    let solution = circuit.navigate(NodeId(0), NodeId(3)).unwrap();

    let topo = circuit.topology();
    let through_blocked = topo.edge_id(0, 0, 0, 1).unwrap();
    let through_open = topo.edge_id(0, 0, 1, 0).unwrap();
    assert!(solution.current(through_open).unwrap() > 0.99);
    assert!(solution.current(through_blocked).unwrap() < 1e-5);
    assert_conservation(&circuit, &solution);

    let path = circuit.trace_path(&solution).unwrap();
    assert_eq!(path.coords(), coords(&[(0, 0), (1, 0), (1, 1)]).as_slice());
}

#[test]
fn test_wall_with_gap() {
    init_logging();
    // Column 2 is a wall except for a gap at the bottom row
    let mut rows = vec![vec![1.0; 5]; 5];
    for row in rows.iter_mut().take(4) {
        row[2] = 0.0;
    }
    let circuit = ResistorCircuit::load(Grid::from_rows(&rows).unwrap());
    let source = circuit.topology().node_id(Coord::new(0, 0)).unwrap();
    let sink = circuit.topology().node_id(Coord::new(0, 4)).unwrap();

    let solution = circuit.navigate(source, sink).unwrap();
    assert_conservation(&circuit, &solution);

    let path = circuit.trace_path(&solution).unwrap();
    assert!(path.coords().contains(&Coord::new(4, 2)));
    for coord in path.coords() {
        assert!(coord.col != 2 || coord.row == 4, "path crosses the wall at {coord}");
    }
}

#[test]
fn test_conservation_for_every_redundant_choice() {
    init_logging();
    let circuit = ResistorCircuit::load(Grid::open(3, 4));
    let requests = [(0, 11), (11, 0), (5, 6), (0, 1), (1, 11), (3, 8)];

    for (source, sink) in requests {
        let solution = circuit.navigate(NodeId(source), NodeId(sink)).unwrap();
        assert_conservation(&circuit, &solution);

        let ax = solution.matrix().mul_vec(solution.currents()).unwrap();
        for (lhs, rhs) in ax.iter().zip(solution.rhs()) {
            assert_relative_eq!(*lhs, *rhs, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_deterministic() {
    let grid = Grid::from_rows(&[
        vec![1.0, 1.0, 0.2, 1.0],
        vec![1.0, 0.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0, 0.3],
    ])
    .unwrap();
    let circuit = ResistorCircuit::load(grid);

    let first = circuit.navigate(NodeId(0), NodeId(11)).unwrap();
    let second = circuit.navigate(NodeId(0), NodeId(11)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        circuit.trace_path(&first).unwrap(),
        circuit.trace_path(&second).unwrap()
    );
}

#[test]
fn test_boundary_errors() {
    let circuit = ResistorCircuit::load(Grid::open(3, 3));
    assert!(matches!(
        circuit.navigate(NodeId(4), NodeId(4)),
        Err(GridError::DegenerateRequest { .. })
    ));
    assert!(matches!(
        circuit.navigate(NodeId(0), NodeId(9)),
        Err(GridError::NodeOutOfRange { node: 9, count: 9 })
    ));
    assert!(matches!(
        circuit.route(NodeId(12), NodeId(0)),
        Err(GridError::NodeOutOfRange { .. })
    ));

    let empty = ResistorCircuit::load(Grid::open(0, 0));
    assert!(matches!(
        empty.navigate(NodeId(0), NodeId(1)),
        Err(GridError::NoGridLoaded { .. })
    ));
}

#[test]
fn test_trace_rejects_foreign_solution() {
    let small = ResistorCircuit::load(Grid::open(2, 2));
    let large = ResistorCircuit::load(Grid::open(3, 3));
    let solution = small.navigate(NodeId(0), NodeId(3)).unwrap();
    assert!(matches!(
        large.trace_path(&solution),
        Err(GridError::DanglingCurrents { expected: 12, found: 4 })
    ));
}

#[test]
fn test_pivoting_strategies_agree_on_square() {
    let grid = Grid::open(2, 2);
    let partial = ResistorCircuit::load(grid.clone());
    let disabled = ResistorCircuit::with_config(
        grid,
        NavigatorConfig::new().with_pivoting(Pivoting::Disabled),
    )
    .unwrap();

    let a = partial.navigate(NodeId(0), NodeId(3)).unwrap();
    let b = disabled.navigate(NodeId(0), NodeId(3)).unwrap();
    assert_eq!(b.substituted_pivots(), 0);
    for (x, y) in a.currents().iter().zip(b.currents()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn test_unpivoted_solve_approximates_small_grid() {
    init_logging();
    let config = NavigatorConfig::new().with_pivoting(Pivoting::Disabled);
    let circuit = ResistorCircuit::with_config(Grid::open(3, 3), config).unwrap();

    let solution = circuit.navigate(NodeId(0), NodeId(8)).unwrap();
    assert!(!solution.is_exact());
    assert!(solution.substituted_pivots() > 0);
    assert!(solution.currents().iter().all(|x| x.is_finite()));
}

#[test]
fn test_unpivoted_overflow_is_reported() {
    init_logging();
    let config = NavigatorConfig::new().with_pivoting(Pivoting::Disabled);
    let circuit = ResistorCircuit::with_config(Grid::open(5, 5), config).unwrap();

    assert!(matches!(
        circuit.navigate(NodeId(0), NodeId(24)),
        Err(GridError::IllConditioned { non_finite, .. }) if non_finite > 0
    ));
    assert!(matches!(
        circuit.route(NodeId(0), NodeId(24)),
        Err(GridError::IllConditioned { .. })
    ));

    // The default strategy solves the same request exactly
    let pivoted = ResistorCircuit::load(Grid::open(5, 5));
    assert!(pivoted.navigate(NodeId(0), NodeId(24)).unwrap().is_exact());
}

#[test]
fn test_fully_blocked_grid_still_routes() {
    init_logging();
    // Uniformly dark: every resistor is the blocked value, so currents match
    // the open grid's up to rounding.
    let circuit = ResistorCircuit::load(Grid::new(3, 3, vec![0.0; 9]).unwrap());
    let solution = circuit.navigate(NodeId(0), NodeId(8)).unwrap();
    assert!(solution.currents().iter().all(|x| x.is_finite()));
    assert_conservation(&circuit, &solution);

    let path = circuit.trace_path(&solution).unwrap();
    assert_eq!(path.sink(), Some(NodeId(8)));
}
