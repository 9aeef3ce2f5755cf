use cube_core::{CubeManager, FaceletLedger, Sense, Turn};
use cube_solver::{
    SearchStrategy, Solver, SolverConfig, StrategyKind,
    heuristic::{Heuristic, PlacementHeuristic},
};

#[test_log::test]
fn turn_and_undo_returns_heuristic_to_zero() {
    let manager = CubeManager::default();
    let solver = Solver::default();
    let x_plus = Turn::new(cube_core::AxisDirection::XPos, Sense::Clockwise).unwrap();

    manager.reset_state();
    manager.turn(x_plus);
    assert!(solver.estimate(&manager.ledger()) > 0);
    assert!(!solver.is_goal(&manager.ledger()));

    manager.turn(x_plus.inverse());
    assert_eq!(solver.estimate(&manager.ledger()), 0);
    assert!(solver.is_goal(&manager.ledger()));
}

#[test_log::test]
fn a_star_undoes_any_single_turn() {
    let solver = Solver::default();
    for turn in Turn::ALL {
        let start = FaceletLedger::solved().turned(turn);
        assert!(PlacementHeuristic.estimate(&start) > 0);
        assert_eq!(solver.solve(&start), Some(vec![turn.inverse()]), "{turn}");
    }
}

#[test_log::test]
fn a_star_solves_short_scrambles() {
    let mut rng = fastrand::Rng::with_seed(1234);
    let solver = Solver::default();
    for _ in 0..5 {
        let scramble = (0..3)
            .map(|_| Turn::ALL[rng.usize(..Turn::ALL.len())])
            .collect::<Vec<_>>();
        let mut ledger = FaceletLedger::solved();
        ledger.apply_turns(&scramble);

        let solution = solver.solve(&ledger).unwrap();
        ledger.apply_turns(&solution);
        assert!(ledger.is_solved(), "{}", Turn::format_sequence(&scramble));
    }
}

#[test_log::test]
fn iterative_deepening_finds_shortest_solution() {
    let solver = Solver::new(SearchStrategy::IterativeDeepening {
        min_depth: 0,
        max_depth: 3,
    });
    let scramble = Turn::parse_sequence("Z+ Z+ X-'").unwrap();
    let mut ledger = FaceletLedger::solved();
    ledger.apply_turns(&scramble);

    let solution = solver.solve(&ledger).unwrap();
    assert_eq!(solution.len(), 3);
    ledger.apply_turns(&solution);
    assert!(ledger.is_solved());
}

#[test_log::test]
fn configured_solvers_agree_on_easy_cases() {
    let start = FaceletLedger::solved().turned("Y-'".parse().unwrap());
    for strategy in [
        StrategyKind::AStar,
        StrategyKind::IterativeDeepening,
        StrategyKind::Staged,
    ] {
        let config = SolverConfig {
            strategy,
            ..SolverConfig::default()
        };
        let solution = config.build().unwrap().solve(&start);
        assert_eq!(solution, Some(Turn::parse_sequence("Y-").unwrap()), "{strategy:?}");
    }
}
