//! Provenance links between facelet slots.
//!
//! Every slot remembers the slot its current sticker started in (`source`)
//! and the slot the sticker that started here now occupies
//! (`destination`). On a consistent cube the two are mutually inverse
//! permutations of the 54 slots.

use crate::{AxisDirection, Color, FaceletId, FaceletLedger, PositionCode};
use log::{debug, trace};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkInferenceError {
    #[error("Face centers {0} and {1} share the color {2}")]
    DuplicateCenter(AxisDirection, AxisDirection, Color),
    #[error("{0} is painted {1}, which matches no face center")]
    UnknownColor(FaceletId, Color),
    #[error("The piece at {0} carries colors of opposite or repeated faces")]
    ImpossiblePiece(PositionCode),
    #[error("The pieces at {0} and {1} both claim to come from {2}")]
    DuplicatePiece(PositionCode, PositionCode, PositionCode),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    #[error("The destination chain starting at {0} is broken")]
    BrokenChain(FaceletId),
}

impl FaceletLedger {
    /// Whether the links of `id` agree with the links of its neighbors.
    #[must_use]
    pub fn check_link(&self, id: FaceletId) -> bool {
        let facelet = self.facelet(id);
        match (facelet.source, facelet.destination) {
            (None, None) => true,
            (Some(src), Some(dst)) if src == id || dst == id => src == id && dst == id,
            (Some(src), Some(dst)) => {
                self.facelet(src).destination == Some(id) && self.facelet(dst).source == Some(id)
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn check_links(&self) -> bool {
        FaceletId::all().all(|id| {
            let ok = self.check_link(id);
            if !ok {
                debug!(target: "links", "Inconsistent links at {id}");
            }
            ok
        })
    }

    /// Points the source of `id` at `source` and the destination of
    /// `source` back at `id`.
    pub fn set_source(&mut self, id: FaceletId, source: FaceletId) {
        self.facelet_mut(id).source = Some(source);
        self.facelet_mut(source).destination = Some(id);
    }

    /// Points the destination of `id` at `destination` and the source of
    /// `destination` back at `id`.
    pub fn set_destination(&mut self, id: FaceletId, destination: FaceletId) {
        self.facelet_mut(id).destination = Some(destination);
        self.facelet_mut(destination).source = Some(id);
    }

    /// Detaches `id`, clearing the back links of its former partners.
    pub fn set_link_none(&mut self, id: FaceletId) {
        let facelet = *self.facelet(id);
        if let Some(src) = facelet.source
            && self.facelet(src).destination == Some(id)
        {
            self.facelet_mut(src).destination = None;
        }
        if let Some(dst) = facelet.destination
            && self.facelet(dst).source == Some(id)
        {
            self.facelet_mut(dst).source = None;
        }
        let facelet = self.facelet_mut(id);
        facelet.source = None;
        facelet.destination = None;
    }

    /// Marks `id` as holding its own sticker.
    pub fn set_link_self(&mut self, id: FaceletId) {
        self.set_link_none(id);
        let facelet = self.facelet_mut(id);
        facelet.source = Some(id);
        facelet.destination = Some(id);
    }

    /// The nontrivial cycles of the destination permutation, each starting
    /// from its smallest slot. Slots without links are skipped.
    pub fn cycles(&self) -> Result<Vec<Vec<FaceletId>>, LinkError> {
        let mut visited = [false; crate::facelet::FACELET_COUNT];
        let mut cycles = Vec::new();

        for start in FaceletId::all() {
            if visited[start.index()] {
                continue;
            }
            let Some(first) = self.facelet(start).destination else {
                continue;
            };
            if first == start {
                visited[start.index()] = true;
                continue;
            }

            let mut cycle = vec![start];
            visited[start.index()] = true;
            let mut at = first;
            while at != start {
                if visited[at.index()] {
                    return Err(LinkError::BrokenChain(start));
                }
                visited[at.index()] = true;
                cycle.push(at);
                at = self
                    .facelet(at)
                    .destination
                    .ok_or(LinkError::BrokenChain(start))?;
            }
            trace!(target: "links", "Cycle of length {} from {start}", cycle.len());
            cycles.push(cycle);
        }

        Ok(cycles)
    }

    /// Rebuilds every link from the colors alone.
    ///
    /// Face centers name the faces. Each piece is then traced back to the
    /// home position spelled by its colors. This cannot tell twisted or
    /// otherwise unreachable arrangements from real ones. The ledger is
    /// only touched when every piece resolves.
    pub fn infer_links(&mut self) -> Result<(), LinkInferenceError> {
        let mut home_faces = HashMap::<Color, AxisDirection>::new();
        for face in AxisDirection::FACES {
            let center = FaceletId::new(face, PositionCode::CENTER)
                .unwrap_or_else(|| unreachable!("{face} has a center"));
            if let Some(other) = home_faces.insert(self.color(center), face) {
                return Err(LinkInferenceError::DuplicateCenter(
                    other,
                    face,
                    self.color(center),
                ));
            }
        }

        let mut sources = [None; crate::facelet::FACELET_COUNT];
        let mut claimed = HashMap::<PositionCode, PositionCode>::new();

        for piece in PositionCode::grid().filter(|piece| piece.order() > 1) {
            let mut home = 0;
            let mut stickers = Vec::with_capacity(3);
            for face in piece.directions() {
                let id = FaceletId::new(face, piece.without(face))
                    .unwrap_or_else(|| unreachable!("{piece} has a sticker facing {face}"));
                let color = self.color(id);
                let home_face = *home_faces
                    .get(&color)
                    .ok_or(LinkInferenceError::UnknownColor(id, color))?;
                home |= home_face.code();
                stickers.push((id, home_face));
            }

            let home = PositionCode::new(i32::from(home))
                .ok()
                .filter(|home| home.order() == piece.order())
                .ok_or(LinkInferenceError::ImpossiblePiece(piece))?;
            if let Some(other) = claimed.insert(home, piece) {
                return Err(LinkInferenceError::DuplicatePiece(other, piece, home));
            }

            for (id, home_face) in stickers {
                sources[id.index()] = FaceletId::new(home_face, home.without(home_face));
            }
        }

        for id in FaceletId::all().filter(|id| id.is_face_center()) {
            sources[id.index()] = Some(id);
        }

        for id in FaceletId::all() {
            let facelet = self.facelet_mut(id);
            facelet.source = sources[id.index()];
            facelet.destination = None;
        }
        for id in FaceletId::all() {
            if let Some(src) = sources[id.index()] {
                self.facelet_mut(src).destination = Some(id);
            }
        }

        debug!(target: "links", "Inferred links for {} pieces", claimed.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Facelet, Turn};

    fn id(face: AxisDirection, x: i32, y: i32, z: i32) -> FaceletId {
        FaceletId::new(face, PositionCode::from_signs(x, y, z)).unwrap()
    }

    #[test_log::test]
    fn links_stay_consistent_through_turns() {
        let mut ledger = FaceletLedger::solved();
        assert!(ledger.check_links());
        for turn in Turn::parse_sequence("X+ Y+ Z-' X-' Y- Z+ Z+ X+").unwrap() {
            ledger.apply_turn(turn);
            assert!(ledger.check_links(), "after {turn}");
        }
    }

    #[test]
    fn unlinked_slots_are_consistent() {
        let ledger = FaceletLedger::blank(Color::GRAY);
        assert!(ledger.check_links());
        assert_eq!(ledger.cycles(), Ok(vec![]));
    }

    #[test]
    fn half_linked_self_is_inconsistent() {
        let mut ledger = FaceletLedger::solved();
        let a = id(AxisDirection::XPos, 0, 1, 1);
        let b = id(AxisDirection::XPos, 0, -1, -1);
        ledger.facelet_mut(a).destination = Some(b);
        assert!(!ledger.check_link(a));
        assert!(!ledger.check_links());
    }

    #[test]
    fn editing_links() {
        let mut ledger = FaceletLedger::blank(Color::GRAY);
        let a = id(AxisDirection::YPos, 1, 0, 0);
        let b = id(AxisDirection::ZNeg, 0, -1, 0);
        ledger.set_source(a, b);
        assert_eq!(ledger.facelet(b).destination, Some(a));
        ledger.set_destination(a, b);
        assert_eq!(ledger.facelet(b).source, Some(a));
        assert!(ledger.check_links());
        assert_eq!(ledger.cycles(), Ok(vec![vec![a, b]]));

        ledger.set_link_none(a);
        assert_eq!(*ledger.facelet(a), Facelet::unlinked(Color::GRAY));
        assert_eq!(*ledger.facelet(b), Facelet::unlinked(Color::GRAY));

        ledger.set_link_self(b);
        assert!(ledger.check_link(b));
        assert_eq!(ledger.cycles(), Ok(vec![]));
    }

    #[test]
    fn cycles_of_a_quarter_turn() {
        let ledger = FaceletLedger::solved().turned("Z+".parse().unwrap());
        let cycles = ledger.cycles().unwrap();
        assert_eq!(cycles.len(), 5);
        assert!(cycles.iter().all(|cycle| cycle.len() == 4));
    }

    #[test]
    fn broken_chain_is_reported() {
        let mut ledger = FaceletLedger::blank(Color::GRAY);
        let a = id(AxisDirection::YPos, 1, 0, 0);
        let b = id(AxisDirection::ZNeg, 0, -1, 0);
        ledger.facelet_mut(a).destination = Some(b);
        assert_eq!(ledger.cycles(), Err(LinkError::BrokenChain(a)));
    }

    #[test_log::test]
    fn infer_links_recovers_turn_history() {
        let turns = Turn::parse_sequence("X+ Y-' Z+ X- Y+").unwrap();
        let mut expected = FaceletLedger::solved();
        expected.apply_turns(&turns);

        let mut inferred = expected.clone();
        inferred.set_colors(&expected.colors());
        assert!(inferred.iter().all(|(_, f)| f.source.is_none()));
        inferred.infer_links().unwrap();
        assert_eq!(inferred, expected);
    }

    #[test]
    fn infer_links_rejects_duplicate_centers() {
        let mut ledger = FaceletLedger::solved();
        let center = id(AxisDirection::XNeg, 0, 0, 0);
        ledger.facelet_mut(center).color = Color::RED;
        let before = ledger.clone();
        assert_eq!(
            ledger.infer_links(),
            Err(LinkInferenceError::DuplicateCenter(
                AxisDirection::XPos,
                AxisDirection::XNeg,
                Color::RED
            ))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn infer_links_rejects_bad_pieces() {
        let mut ledger = FaceletLedger::solved();
        let sticker = id(AxisDirection::XPos, 0, 1, 1);
        ledger.facelet_mut(sticker).color = Color::YELLOW;
        assert_eq!(
            ledger.infer_links(),
            Err(LinkInferenceError::ImpossiblePiece(PositionCode::from_signs(1, 1, 1)))
        );

        ledger.facelet_mut(sticker).color = Color::PURPLE;
        assert_eq!(
            ledger.infer_links(),
            Err(LinkInferenceError::UnknownColor(sticker, Color::PURPLE))
        );
    }

    #[test]
    fn infer_links_rejects_repeated_pieces() {
        let mut ledger = FaceletLedger::solved();
        // Give the X+Y+ edge the colors of the X+Y- edge
        ledger.facelet_mut(id(AxisDirection::YPos, 1, 0, 0)).color = Color::YELLOW;
        assert_eq!(
            ledger.infer_links(),
            Err(LinkInferenceError::DuplicatePiece(
                PositionCode::from_signs(1, -1, 0),
                PositionCode::from_signs(1, 1, 0),
                PositionCode::from_signs(1, -1, 0),
            ))
        );
    }
}
