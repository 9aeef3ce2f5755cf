use crate::{
    Axis, AxisDirection, FaceletId, PositionCode,
    axis::ParseAxisDirectionError,
    facelet::FACELET_COUNT,
};
use itertools::Itertools;
use std::{fmt, str::FromStr, sync::LazyLock};
use thiserror::Error;

/// Rotation sense of a quarter turn, as seen looking at the turned face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sense {
    CounterClockwise,
    Clockwise,
}

impl Sense {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Sense::CounterClockwise => Sense::Clockwise,
            Sense::Clockwise => Sense::CounterClockwise,
        }
    }

    /// `+1` for counterclockwise and `-1` for clockwise.
    fn factor(self) -> i32 {
        match self {
            Sense::CounterClockwise => 1,
            Sense::Clockwise => -1,
        }
    }
}

/// A quarter turn of one face layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Turn {
    face: AxisDirection,
    sense: Sense,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    #[error("The center is not a turnable layer")]
    CenterLayer,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnParseError {
    #[error(transparent)]
    Direction(#[from] ParseAxisDirectionError),
    #[error("Cannot turn `{0}`: {1}")]
    Turn(String, TurnError),
}

impl Turn {
    /// Every turn, faces in canonical order and counterclockwise first.
    pub const ALL: [Turn; 12] = {
        let mut all = [Turn {
            face: AxisDirection::XPos,
            sense: Sense::CounterClockwise,
        }; 12];
        let mut i = 0;
        while i < 12 {
            all[i] = Turn {
                face: AxisDirection::FACES[i / 2],
                sense: if i % 2 == 0 {
                    Sense::CounterClockwise
                } else {
                    Sense::Clockwise
                },
            };
            i += 1;
        }
        all
    };

    pub fn new(face: AxisDirection, sense: Sense) -> Result<Self, TurnError> {
        if face == AxisDirection::Center {
            Err(TurnError::CenterLayer)
        } else {
            Ok(Turn { face, sense })
        }
    }

    #[must_use]
    pub fn face(self) -> AxisDirection {
        self.face
    }

    #[must_use]
    pub fn sense(self) -> Sense {
        self.sense
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self.face {
            AxisDirection::XPos | AxisDirection::XNeg => Axis::X,
            AxisDirection::YPos | AxisDirection::YNeg => Axis::Y,
            AxisDirection::ZPos | AxisDirection::ZNeg => Axis::Z,
            AxisDirection::Center => unreachable!("turns are never built on the center"),
        }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Turn {
            face: self.face,
            sense: self.sense.inverse(),
        }
    }

    /// Position of this turn in [`Turn::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        (self.face.ordinal() - 1) * 2 + usize::from(self.sense == Sense::Clockwise)
    }

    /// Rotation about the turn axis in degrees, positive being
    /// counterclockwise when looking down the positive axis.
    #[must_use]
    pub fn degrees(self) -> f64 {
        f64::from(i32::from(self.face.sign()) * self.sense.factor() * 90)
    }

    /// Where `dir` points after this turn. Directions along the turn axis
    /// are fixed.
    #[must_use]
    pub fn turn_direction(self, dir: AxisDirection) -> AxisDirection {
        let (first, second) = self.other_axes();
        let sign = i32::from(self.face.sign()) * i32::from(dir.sign()) * self.sense.factor();
        match dir.axis() {
            Some(axis) if axis == first => {
                AxisDirection::from_axis_sign(second, sign).unwrap_or(dir)
            }
            Some(axis) if axis == second => {
                AxisDirection::from_axis_sign(first, -sign).unwrap_or(dir)
            }
            _ => dir,
        }
    }

    /// Rotates every direction contained in `code`.
    #[must_use]
    pub fn turn_code(self, code: PositionCode) -> PositionCode {
        PositionCode::encode(code.directions().map(|dir| Some(self.turn_direction(dir))))
    }

    fn other_axes(self) -> (Axis, Axis) {
        match self.axis() {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// The facelet slot permutation this turn performs.
    #[must_use]
    pub fn permutation(self) -> &'static FaceletPermutation {
        &TURN_TABLE[self.index()]
    }

    /// Parses whitespace separated turns such as `X+ Y-' Z+`.
    pub fn parse_sequence(s: &str) -> Result<Vec<Turn>, TurnParseError> {
        s.split_whitespace().map(str::parse).collect()
    }

    /// Formats turns the way [`Turn::parse_sequence`] reads them.
    pub fn format_sequence<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> String {
        turns.into_iter().join(" ")
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.face.mnemonic())?;
        if self.sense == Sense::CounterClockwise {
            f.write_str("'")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Turn({self})")
    }
}

impl FromStr for Turn {
    type Err = TurnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face, sense) = match s.strip_suffix('\'') {
            Some(face) => (face, Sense::CounterClockwise),
            None => (s, Sense::Clockwise),
        };
        Turn::new(face.parse()?, sense).map_err(|err| TurnParseError::Turn(s.to_owned(), err))
    }
}

/// A permutation of the 54 facelet slots together with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceletPermutation {
    forward: [FaceletId; FACELET_COUNT],
    inverse: [FaceletId; FACELET_COUNT],
}

impl FaceletPermutation {
    /// The slot the content of `from` moves to.
    #[must_use]
    pub fn forward(&self, from: FaceletId) -> FaceletId {
        self.forward[from.index()]
    }

    /// The slot whose content moves into `to`.
    #[must_use]
    pub fn inverse(&self, to: FaceletId) -> FaceletId {
        self.inverse[to.index()]
    }

    /// Slots whose content moves.
    pub fn moved(&self) -> impl Iterator<Item = FaceletId> + '_ {
        FaceletId::all().filter(|&id| self.forward(id) != id)
    }

    fn for_turn(turn: Turn) -> Self {
        let face = turn.face();
        let slot = |dir: AxisDirection, code: PositionCode| {
            FaceletId::new(dir, code).unwrap_or_else(|| unreachable!("{dir} has no slot {code}"))
        };

        let mut forward: [FaceletId; FACELET_COUNT] = std::array::from_fn(FaceletId::from_index);

        for id in FaceletId::on_face(face) {
            forward[id.index()] = slot(face, turn.turn_code(id.position()));
        }

        for &side in face.others() {
            let turned_side = turn.turn_direction(side);
            for id in FaceletId::on_face(side).filter(|id| id.position().contains(face)) {
                // Rotate in the plane of the turn, then swap the side
                // direction back out for the turned face.
                let planar = id.position().without(face).with(side);
                let position = turn.turn_code(planar).without(turned_side).with(face);
                forward[id.index()] = slot(turned_side, position);
            }
        }

        let mut inverse = forward;
        for id in FaceletId::all() {
            inverse[forward[id.index()].index()] = id;
        }
        debug_assert!(FaceletId::all().all(|id| inverse[forward[id.index()].index()] == id));
        debug_assert_eq!(forward.iter().unique().count(), FACELET_COUNT);

        FaceletPermutation { forward, inverse }
    }
}

static TURN_TABLE: LazyLock<[FaceletPermutation; 12]> =
    LazyLock::new(|| Turn::ALL.map(FaceletPermutation::for_turn));
