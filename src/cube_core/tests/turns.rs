use cube_core::{
    AxisDirection, CoreState, CubeManager, FaceletId, FaceletLedger, PositionCode, Turn,
};

fn random_turns(rng: &mut fastrand::Rng, count: usize) -> Vec<Turn> {
    (0..count).map(|_| Turn::ALL[rng.usize(..Turn::ALL.len())]).collect()
}

#[test_log::test]
fn links_hold_after_random_sequences() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..50 {
        let mut ledger = FaceletLedger::solved();
        for turn in random_turns(&mut rng, 40) {
            ledger.apply_turn(turn);
        }
        assert!(ledger.check_links());
        let cycles = ledger.cycles().unwrap();
        let moved = cycles.iter().map(Vec::len).sum::<usize>();
        assert_eq!(
            moved,
            ledger.iter().filter(|(id, f)| f.source != Some(*id)).count()
        );
    }
}

#[test_log::test]
fn reversed_inverse_sequence_restores_solved() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..20 {
        let scramble = random_turns(&mut rng, 25);
        let mut state = CoreState::new();
        for &turn in &scramble {
            state.apply_turn(turn);
        }
        for turn in scramble.iter().rev() {
            state.apply_turn(turn.inverse());
        }
        assert_eq!(state, CoreState::new());
    }
}

#[test_log::test]
fn every_turn_has_order_four() {
    for turn in Turn::ALL {
        let mut state = CoreState::new();
        for i in 0..4 {
            assert_eq!(state.ledger().is_solved(), i == 0);
            state.apply_turn(turn);
        }
        assert_eq!(state, CoreState::new());
    }
}

#[test_log::test]
fn opposite_faces_commute() {
    for face in [AxisDirection::XPos, AxisDirection::YPos, AxisDirection::ZPos] {
        for a in Turn::ALL.into_iter().filter(|t| t.face() == face) {
            for b in Turn::ALL.into_iter().filter(|t| t.face() == face.opposite()) {
                let ab = FaceletLedger::solved().turned(a).turned(b);
                let ba = FaceletLedger::solved().turned(b).turned(a);
                assert_eq!(ab, ba, "{a} {b}");
            }
        }
    }
}

#[test_log::test]
fn stickers_stay_on_their_cubie() {
    let mut rng = fastrand::Rng::with_seed(9);
    let mut state = CoreState::new();
    for turn in random_turns(&mut rng, 30) {
        state.apply_turn(turn);
    }

    // Each sticker shares its slot's cubie with the core now sitting there
    for (id, facelet) in state.ledger().iter() {
        let source = facelet.source.unwrap();
        let core = state
            .cores()
            .find(|(_, core)| core.position == id.cubie())
            .map(|(_, core)| *core)
            .unwrap();
        assert_eq!(core.home, source.cubie(), "{id}");
    }
}

#[test_log::test]
fn manager_matches_direct_application() {
    let manager = CubeManager::default();
    let mut rng = fastrand::Rng::with_seed(3);
    let scramble = manager.randomize(30, Turn::ALL.len(), &mut rng);

    let mut state = CoreState::new();
    for &turn in &scramble {
        state.apply_turn(turn);
    }
    assert_eq!(manager.snapshot(), state);

    let corner = FaceletId::new(AxisDirection::ZPos, PositionCode::from_signs(1, 1, 0)).unwrap();
    assert_eq!(manager.ledger().facelet(corner), state.ledger().facelet(corner));
}
