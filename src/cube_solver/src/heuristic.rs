use cube_core::{AxisDirection, FaceletId, FaceletLedger};

/// Estimates how far a cube is from a goal. Lower is closer.
pub trait Heuristic: Send + Sync {
    fn estimate(&self, ledger: &FaceletLedger) -> u32;
}

/// Sums a per-sticker displacement score: nothing at home, one for the
/// right face in the wrong spot, two for the wrong face and three for the
/// opposite face. Stickers of unknown origin count as the worst case.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementHeuristic;

impl PlacementHeuristic {
    fn sticker_cost(id: FaceletId, source: Option<FaceletId>) -> u32 {
        match source {
            Some(source) if source == id => 0,
            Some(source) if source.face() == id.face() => 1,
            Some(source) if source.face() != id.face().opposite() => 2,
            _ => 3,
        }
    }
}

impl Heuristic for PlacementHeuristic {
    fn estimate(&self, ledger: &FaceletLedger) -> u32 {
        ledger
            .iter()
            .map(|(id, facelet)| Self::sticker_cost(id, facelet.source))
            .sum()
    }
}

/// Uniform cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &FaceletLedger) -> u32 {
        0
    }
}

/// Only looks at the stickers sitting on one face. Foreign stickers cost
/// 15, own corners in the wrong spot 5, and own edges in the wrong spot 10.
#[derive(Debug, Clone, Copy)]
pub struct FaceHeuristic {
    pub face: AxisDirection,
}

impl Heuristic for FaceHeuristic {
    fn estimate(&self, ledger: &FaceletLedger) -> u32 {
        FaceletId::on_face(self.face)
            .map(|id| match ledger.facelet(id).source {
                Some(source) if source == id => 0,
                Some(source) if source.face() == self.face => {
                    if source.position().order() > 1 { 5 } else { 10 }
                }
                _ => 15,
            })
            .sum()
    }
}
