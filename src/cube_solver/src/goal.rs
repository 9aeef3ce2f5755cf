use cube_core::{AxisDirection, FaceletId, FaceletLedger};

pub trait GoalTest: Send + Sync {
    fn is_goal(&self, ledger: &FaceletLedger) -> bool;
}

/// Every sticker is back in its own slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solved;

impl GoalTest for Solved {
    fn is_goal(&self, ledger: &FaceletLedger) -> bool {
        ledger.is_solved()
    }
}

/// Every sticker of one face is back in its own slot.
#[derive(Debug, Clone, Copy)]
pub struct FaceSolved {
    pub face: AxisDirection,
}

impl GoalTest for FaceSolved {
    fn is_goal(&self, ledger: &FaceletLedger) -> bool {
        FaceletId::on_face(self.face).all(|id| ledger.facelet(id).source == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::{Color, Turn};

    #[test]
    fn face_goal_is_weaker_than_solved() {
        let ledger = FaceletLedger::solved().turned("Y+".parse::<Turn>().unwrap());
        assert!(!Solved.is_goal(&ledger));
        assert!(FaceSolved { face: AxisDirection::YNeg }.is_goal(&ledger));
        assert!(!FaceSolved { face: AxisDirection::YPos }.is_goal(&ledger));
    }

    #[test]
    fn unlinked_cube_is_never_solved() {
        let ledger = FaceletLedger::blank(Color::GRAY);
        assert!(!Solved.is_goal(&ledger));
        assert!(!FaceSolved { face: AxisDirection::ZPos }.is_goal(&ledger));
    }
}
