use crate::{Axis, CoreId, FaceletId, Turn};

/// Something a renderer draws and can rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Core(CoreId),
    Facelet(FaceletId),
}

/// Rotate `target` about `axis` by `degrees` over the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationCommand {
    pub target: AnimationTarget,
    pub axis: Axis,
    pub degrees: f64,
}

/// Identifies one started turn so its completion can be matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnTicket(pub(crate) u64);

/// Work handed to whoever drives the animation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    /// Animate `rotations` over `duration_ms`, then report the ticket back
    /// through [`crate::CubeManager::complete_turn`].
    Start {
        ticket: TurnTicket,
        turn: Turn,
        rotations: Vec<RotationCommand>,
        duration_ms: f64,
    },
    /// `turn` was queued behind the turn in flight, with `pending` turns
    /// now waiting.
    Queued { turn: Turn, pending: usize },
    /// The turn was discarded by a reset. Snap everything back.
    Cancel { ticket: TurnTicket },
}
