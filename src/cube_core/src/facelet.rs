use crate::{AxisDirection, Color, PositionCode};
use std::fmt;

pub const FACE_SIZE: usize = 9;
pub const FACELET_COUNT: usize = 6 * FACE_SIZE;

/// A fixed sticker slot: one face plus a position on that face.
///
/// Slots never move. Turning the cube moves the colors and provenance
/// links stored in them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceletId(u8);

impl FaceletId {
    /// Looks up the slot for `position` on `face`. The position may only
    /// contain directions perpendicular to the face.
    #[must_use]
    pub fn new(face: AxisDirection, position: PositionCode) -> Option<Self> {
        let (first, second) = face.other_axes()?;
        if position.component(face.axis()?).is_some() || !position.is_valid() {
            return None;
        }

        let offset = |axis| position.component(axis).map_or(0, AxisDirection::sign);
        let row = usize::try_from(offset(first) + 1).ok()?;
        let column = usize::try_from(offset(second) + 1).ok()?;
        let index = (face.ordinal() - 1) * FACE_SIZE + row * 3 + column;
        Some(FaceletId(u8::try_from(index).ok()?))
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < FACELET_COUNT);
        FaceletId(index as u8)
    }

    /// Every slot by face in canonical order.
    pub fn all() -> impl Iterator<Item = FaceletId> {
        (0..FACELET_COUNT as u8).map(FaceletId)
    }

    /// All nine slots of `face`.
    pub fn on_face(face: AxisDirection) -> impl Iterator<Item = FaceletId> {
        Self::all().filter(move |id| id.face() == face)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn face(self) -> AxisDirection {
        AxisDirection::FACES[self.index() / FACE_SIZE]
    }

    #[must_use]
    pub fn position(self) -> PositionCode {
        let face = self.face();
        let slot = self.index() % FACE_SIZE;
        let Some((first, second)) = face.other_axes() else {
            return PositionCode::CENTER;
        };
        #[allow(clippy::cast_possible_wrap)]
        let (row, column) = ((slot / 3) as i32 - 1, (slot % 3) as i32 - 1);
        PositionCode::encode([
            AxisDirection::from_axis_sign(first, row),
            AxisDirection::from_axis_sign(second, column),
        ])
    }

    /// The position of the cubie carrying this sticker.
    #[must_use]
    pub fn cubie(self) -> PositionCode {
        self.position().with(self.face())
    }

    #[must_use]
    pub fn is_face_center(self) -> bool {
        self.position() == PositionCode::CENTER
    }
}

impl fmt::Display for FaceletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.face(), self.position())
    }
}

impl fmt::Debug for FaceletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaceletId({self})")
    }
}

/// The color held by a slot together with its provenance links: where the
/// sticker currently here started out, and where the sticker that started
/// here is now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facelet {
    pub color: Color,
    pub source: Option<FaceletId>,
    pub destination: Option<FaceletId>,
}

impl Facelet {
    #[must_use]
    pub fn unlinked(color: Color) -> Self {
        Facelet {
            color,
            source: None,
            destination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_face_and_position() {
        let ids = FaceletId::all().collect::<Vec<_>>();
        assert_eq!(ids.len(), FACELET_COUNT);
        for id in ids {
            assert_eq!(FaceletId::new(id.face(), id.position()), Some(id));
            assert_eq!(id.cubie().order(), id.position().order() + 1);
        }
    }

    #[test]
    fn rejects_positions_off_the_face() {
        assert_eq!(
            FaceletId::new(AxisDirection::XPos, PositionCode::from_signs(1, 0, 0)),
            None
        );
        assert_eq!(
            FaceletId::new(AxisDirection::Center, PositionCode::CENTER),
            None
        );
        assert!(FaceletId::new(AxisDirection::XPos, PositionCode::from_signs(0, 1, -1)).is_some());
    }

    #[test]
    fn nine_per_face() {
        for face in AxisDirection::FACES {
            let ids = FaceletId::on_face(face).collect::<Vec<_>>();
            assert_eq!(ids.len(), FACE_SIZE);
            assert_eq!(ids.iter().filter(|id| id.is_face_center()).count(), 1);
        }
    }
}
