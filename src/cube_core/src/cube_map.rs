use crate::{AxisDirection, PositionCode, position::CODE_LIMIT};
use std::fmt;

/// Dense two level map keyed by a face direction and a position code.
///
/// Reads and writes are plain array indexing, which keeps the turn and
/// search paths free of hashing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CubeMap<T> {
    entries: [[Option<T>; CODE_LIMIT]; 7],
}

impl<T> CubeMap<T> {
    #[must_use]
    pub fn new() -> Self {
        CubeMap {
            entries: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    fn slot(face: AxisDirection, key: PositionCode) -> (usize, usize) {
        (face.ordinal(), usize::from(key.bits()))
    }

    #[must_use]
    pub fn get(&self, face: AxisDirection, key: PositionCode) -> Option<&T> {
        let (outer, inner) = Self::slot(face, key);
        self.entries[outer][inner].as_ref()
    }

    pub fn get_mut(&mut self, face: AxisDirection, key: PositionCode) -> Option<&mut T> {
        let (outer, inner) = Self::slot(face, key);
        self.entries[outer][inner].as_mut()
    }

    /// Stores `value`, returning whatever was there before.
    pub fn insert(&mut self, face: AxisDirection, key: PositionCode, value: T) -> Option<T> {
        let (outer, inner) = Self::slot(face, key);
        self.entries[outer][inner].replace(value)
    }

    pub fn remove(&mut self, face: AxisDirection, key: PositionCode) -> Option<T> {
        let (outer, inner) = Self::slot(face, key);
        self.entries[outer][inner].take()
    }

    #[must_use]
    pub fn contains(&self, face: AxisDirection, key: PositionCode) -> bool {
        self.get(face, key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().flatten().for_each(|entry| *entry = None);
    }

    /// Entries under `face` by ascending position code.
    pub fn face(&self, face: AxisDirection) -> impl Iterator<Item = (PositionCode, &T)> {
        self.entries[face.ordinal()]
            .iter()
            .enumerate()
            .filter_map(|(bits, entry)| Some((code_of(bits), entry.as_ref()?)))
    }

    /// Every entry, grouped by face in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AxisDirection, PositionCode, &T)> {
        AxisDirection::ALL
            .into_iter()
            .flat_map(move |dir| self.face(dir).map(move |(key, value)| (dir, key, value)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().filter(|entry| entry.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn code_of(bits: usize) -> PositionCode {
    // Indices never exceed CODE_LIMIT
    PositionCode::from_raw(bits as u8)
}

impl<T> Default for CubeMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CubeMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(dir, key, value)| ((dir, key), value)))
            .finish()
    }
}

impl<T> FromIterator<(AxisDirection, PositionCode, T)> for CubeMap<T> {
    fn from_iter<I: IntoIterator<Item = (AxisDirection, PositionCode, T)>>(iter: I) -> Self {
        let mut map = CubeMap::new();
        for (dir, key, value) in iter {
            map.insert(dir, key, value);
        }
        map
    }
}
