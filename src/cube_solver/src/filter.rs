use cube_core::Turn;

/// Prunes turns that cannot lead anywhere new given the turns before them.
pub trait MoveFilter: Send + Sync {
    fn is_legal(&self, candidate: Turn, history: &[Turn]) -> bool;
}

/// Rejects turns that undo the previous turn of the same face or make a
/// third consecutive quarter turn of it. Turns of the opposite face
/// commute with the candidate and are looked through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedundantTurns;

impl MoveFilter for NoRedundantTurns {
    fn is_legal(&self, candidate: Turn, history: &[Turn]) -> bool {
        let face = candidate.face();
        let mut seen_same_face = false;
        for previous in history.iter().rev() {
            if previous.face() == face {
                if seen_same_face || previous.sense() != candidate.sense() {
                    return false;
                }
                seen_same_face = true;
            } else if previous.face() != face.opposite() {
                return true;
            }
        }
        true
    }
}

/// Allows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyTurn;

impl MoveFilter for AnyTurn {
    fn is_legal(&self, _: Turn, _: &[Turn]) -> bool {
        true
    }
}
