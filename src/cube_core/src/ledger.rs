use crate::{
    AxisDirection, Color, CubeMap, Facelet, FaceletId, Turn,
    facelet::FACELET_COUNT,
};

/// The conventional scheme: X+ red, X- orange, Y+ white, Y- yellow, Z+
/// green and Z- blue.
#[must_use]
pub fn default_color(face: AxisDirection) -> Option<Color> {
    match face {
        AxisDirection::Center => None,
        AxisDirection::XPos => Some(Color::RED),
        AxisDirection::XNeg => Some(Color::ORANGE),
        AxisDirection::YPos => Some(Color::WHITE),
        AxisDirection::YNeg => Some(Color::YELLOW),
        AxisDirection::ZPos => Some(Color::GREEN),
        AxisDirection::ZNeg => Some(Color::BLUE),
    }
}

/// Color used for surfaces that carry no sticker.
pub const UNPAINTED: Color = Color::BLACK;

/// Every facelet painted in the default scheme.
#[must_use]
pub fn default_colors() -> CubeMap<Color> {
    FaceletId::all()
        .filter_map(|id| Some((id.face(), id.position(), default_color(id.face())?)))
        .collect()
}

/// The color and provenance of all 54 sticker slots.
///
/// Snapshots of the ledger are what the solvers search over, so it is a
/// flat array that clones, compares, and hashes cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceletLedger {
    facelets: [Facelet; FACELET_COUNT],
}

impl FaceletLedger {
    /// Every slot painted `color` with no links.
    #[must_use]
    pub fn blank(color: Color) -> Self {
        FaceletLedger {
            facelets: [Facelet::unlinked(color); FACELET_COUNT],
        }
    }

    /// The solved cube: default colors, every slot linked to itself.
    #[must_use]
    pub fn solved() -> Self {
        let mut ledger = FaceletLedger::blank(UNPAINTED);
        ledger.reset();
        ledger
    }

    pub fn reset(&mut self) {
        for id in FaceletId::all() {
            self.facelets[id.index()] = Facelet {
                color: default_color(id.face()).unwrap_or(UNPAINTED),
                source: Some(id),
                destination: Some(id),
            };
        }
    }

    #[must_use]
    pub fn facelet(&self, id: FaceletId) -> &Facelet {
        &self.facelets[id.index()]
    }

    pub(crate) fn facelet_mut(&mut self, id: FaceletId) -> &mut Facelet {
        &mut self.facelets[id.index()]
    }

    #[must_use]
    pub fn color(&self, id: FaceletId) -> Color {
        self.facelet(id).color
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceletId, &Facelet)> {
        FaceletId::all().zip(self.facelets.iter())
    }

    /// Current colors keyed by face and position.
    #[must_use]
    pub fn colors(&self) -> CubeMap<Color> {
        self.iter()
            .map(|(id, facelet)| (id.face(), id.position(), facelet.color))
            .collect()
    }

    /// Repaints the slots present in `colors`. Repainted slots lose their
    /// links, since the new color says nothing about where it came from.
    pub fn set_colors(&mut self, colors: &CubeMap<Color>) {
        for (face, position, &color) in colors.iter() {
            if let Some(id) = FaceletId::new(face, position) {
                self.facelets[id.index()] = Facelet::unlinked(color);
            }
        }
    }

    /// Paints every slot `color` and drops every link.
    pub fn fill(&mut self, color: Color) {
        self.facelets = [Facelet::unlinked(color); FACELET_COUNT];
    }

    /// Colors and links keyed by face and position.
    #[must_use]
    pub fn trios(&self) -> CubeMap<Facelet> {
        self.iter()
            .map(|(id, facelet)| (id.face(), id.position(), *facelet))
            .collect()
    }

    /// Overwrites the slots present in `trios` verbatim.
    pub fn set_trios(&mut self, trios: &CubeMap<Facelet>) {
        for (face, position, &facelet) in trios.iter() {
            if let Some(id) = FaceletId::new(face, position) {
                self.facelets[id.index()] = facelet;
            }
        }
    }

    /// Carries colors and links through `turn`.
    ///
    /// Colors and sources travel with the sticker, so each slot takes them
    /// from the slot that turns into it. Destinations stay with the origin
    /// slot and instead follow the sticker to wherever it lands.
    pub fn apply_turn(&mut self, turn: Turn) {
        let permutation = turn.permutation();
        let before = self.facelets;
        for id in FaceletId::all() {
            let moved_in = before[permutation.inverse(id).index()];
            let slot = &mut self.facelets[id.index()];
            slot.color = moved_in.color;
            slot.source = moved_in.source;
            slot.destination = before[id.index()]
                .destination
                .map(|dst| permutation.forward(dst));
        }
    }

    #[must_use]
    pub fn turned(&self, turn: Turn) -> Self {
        let mut next = self.clone();
        next.apply_turn(turn);
        next
    }

    pub fn apply_turns(&mut self, turns: &[Turn]) {
        for &turn in turns {
            self.apply_turn(turn);
        }
    }

    /// Whether every sticker is back where it started.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.iter().all(|(id, facelet)| facelet.source == Some(id))
    }
}

impl Default for FaceletLedger {
    fn default() -> Self {
        Self::solved()
    }
}
