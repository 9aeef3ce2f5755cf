use crate::{
    AxisDirection, Color, CubeMap, FaceletId, FaceletLedger, PositionCode, Turn,
    animation::{AnimationTarget, RotationCommand},
};
use std::fmt;

pub const CORE_COUNT: usize = 27;

/// One of the 27 physical sub-cubes, numbered by home position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoreId(u8);

impl CoreId {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Debug for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoreId({})", self.0)
    }
}

/// A sub-cube together with where it currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoreUnit {
    pub home: PositionCode,
    pub position: PositionCode,
}

/// The physical cube: 27 sub-cubes indexed by the layers they belong to,
/// plus the sticker ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreState {
    cores: [CoreUnit; CORE_COUNT],
    sides: CubeMap<CoreId>,
    ledger: FaceletLedger,
}

impl CoreState {
    /// A solved cube in the default scheme.
    #[must_use]
    pub fn new() -> Self {
        CoreState::with_ledger(FaceletLedger::solved())
    }

    /// A cube with every sticker painted `color` and no links.
    #[must_use]
    pub fn blank(color: Color) -> Self {
        CoreState::with_ledger(FaceletLedger::blank(color))
    }

    fn with_ledger(ledger: FaceletLedger) -> Self {
        let mut cores = [CoreUnit {
            home: PositionCode::CENTER,
            position: PositionCode::CENTER,
        }; CORE_COUNT];
        for (core, position) in cores.iter_mut().zip(PositionCode::grid()) {
            core.home = position;
            core.position = position;
        }

        let mut state = CoreState {
            cores,
            sides: CubeMap::new(),
            ledger,
        };
        state.index_sides();
        state
    }

    /// Files each core under every layer it belongs to, keyed by its
    /// position with that layer's direction removed. The center core sits
    /// alone under the center.
    fn index_sides(&mut self) {
        self.sides.clear();
        for (i, core) in self.cores.iter().enumerate() {
            let id = CoreId(i as u8);
            if core.position == PositionCode::CENTER {
                self.sides.insert(AxisDirection::Center, PositionCode::CENTER, id);
                continue;
            }
            for dir in core.position.directions() {
                self.sides.insert(dir, core.position.without(dir), id);
            }
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &FaceletLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut FaceletLedger {
        &mut self.ledger
    }

    #[must_use]
    pub fn core(&self, id: CoreId) -> &CoreUnit {
        &self.cores[id.index()]
    }

    pub fn cores(&self) -> impl Iterator<Item = (CoreId, &CoreUnit)> {
        self.cores
            .iter()
            .enumerate()
            .map(|(i, core)| (CoreId(i as u8), core))
    }

    /// The core filed under `face` at `key`.
    #[must_use]
    pub fn core_at(&self, face: AxisDirection, key: PositionCode) -> Option<CoreId> {
        self.sides.get(face, key).copied()
    }

    /// The cores in the layer of `face`.
    pub fn layer(&self, face: AxisDirection) -> impl Iterator<Item = CoreId> {
        self.sides.face(face).map(|(_, &id)| id)
    }

    /// Whether every core sits at its home position.
    #[must_use]
    pub fn cores_home(&self) -> bool {
        self.cores.iter().all(|core| core.home == core.position)
    }

    /// Commits `turn`, moving the layer's cores and the stickers with them.
    pub fn apply_turn(&mut self, turn: Turn) {
        let face = turn.face();
        let layer = self.layer(face).collect::<Vec<_>>();
        for id in layer {
            let core = &mut self.cores[id.index()];
            core.position = turn.turn_code(core.position.without(face)).with(face);
        }
        self.index_sides();
        self.ledger.apply_turn(turn);
    }

    /// Everything a renderer has to rotate to animate `turn`: the nine
    /// cores of the layer, the nine stickers of the face, and the twelve
    /// stickers around it.
    #[must_use]
    pub fn rotation_commands(&self, turn: Turn) -> Vec<RotationCommand> {
        let axis = turn.axis();
        let degrees = turn.degrees();
        let cores = self.layer(turn.face()).map(AnimationTarget::Core);
        let facelets = FaceletId::all()
            .filter(|id| id.cubie().contains(turn.face()))
            .map(AnimationTarget::Facelet);

        cores
            .chain(facelets)
            .map(|target| RotationCommand {
                target,
                axis,
                degrees,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        *self = CoreState::new();
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}
