use crate::{Axis, AxisDirection};
use std::fmt;
use thiserror::Error;

/// Number of distinct raw position codes.
pub const CODE_LIMIT: usize = 64;

/// A location on the 3x3x3 grid written as the OR of the direction codes it
/// lies in. `0` is the center, one bit is a face center, two bits an edge
/// and three bits a corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PositionCode(u8);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionCodeError {
    #[error("Position code {0} is outside of the six bit range")]
    OutOfRange(i32),
    #[error("Position code {0:#08b} holds both directions of one axis")]
    ConflictingAxis(u8),
}

impl PositionCode {
    pub const CENTER: PositionCode = PositionCode(0);

    /// Builds a code holding at most one direction per axis.
    pub fn new(bits: i32) -> Result<Self, PositionCodeError> {
        let raw = u8::try_from(bits)
            .ok()
            .filter(|&raw| usize::from(raw) < CODE_LIMIT)
            .ok_or(PositionCodeError::OutOfRange(bits))?;
        let code = PositionCode(raw);
        if code.is_valid() {
            Ok(code)
        } else {
            Err(PositionCodeError::ConflictingAxis(raw))
        }
    }

    pub(crate) fn from_raw(bits: u8) -> Self {
        debug_assert!(usize::from(bits) < CODE_LIMIT);
        PositionCode(bits)
    }

    /// ORs the given directions together. Repeats and the center add
    /// nothing. Opposite directions are kept, so check [`Self::is_valid`]
    /// when the input is untrusted.
    pub fn encode<I>(directions: I) -> Self
    where
        I: IntoIterator<Item = Option<AxisDirection>>,
    {
        PositionCode(
            directions
                .into_iter()
                .flatten()
                .fold(0, |bits, dir| bits | dir.code()),
        )
    }

    /// The position at integer offsets in `-1..=1` along X, Y, and Z.
    #[must_use]
    pub fn from_signs(x: i32, y: i32, z: i32) -> Self {
        Self::encode([
            AxisDirection::from_axis_sign(Axis::X, x),
            AxisDirection::from_axis_sign(Axis::Y, y),
            AxisDirection::from_axis_sign(Axis::Z, z),
        ])
    }

    /// The 27 grid positions with X varying slowest.
    pub fn grid() -> impl Iterator<Item = PositionCode> {
        (-1..=1).flat_map(|x| {
            (-1..=1).flat_map(move |y| (-1..=1).map(move |z| PositionCode::from_signs(x, y, z)))
        })
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            let [positive, negative] = axis.directions();
            self.0 & positive.code() == 0 || self.0 & negative.code() == 0
        })
    }

    /// Number of directions contained.
    #[must_use]
    pub fn order(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub fn contains(self, dir: AxisDirection) -> bool {
        dir.code() != 0 && self.0 & dir.code() == dir.code()
    }

    #[must_use]
    pub fn with(self, dir: AxisDirection) -> Self {
        PositionCode(self.0 | dir.code())
    }

    #[must_use]
    pub fn without(self, dir: AxisDirection) -> Self {
        PositionCode(self.0 & !dir.code())
    }

    /// The contained directions in canonical order.
    pub fn directions(self) -> impl Iterator<Item = AxisDirection> {
        AxisDirection::FACES
            .into_iter()
            .filter(move |&dir| self.contains(dir))
    }

    /// The contained direction along `axis`, if any.
    #[must_use]
    pub fn component(self, axis: Axis) -> Option<AxisDirection> {
        axis.directions().into_iter().find(|&dir| self.contains(dir))
    }

    /// Signed offsets along X, Y, and Z.
    #[must_use]
    pub fn sig_num(self) -> [i8; 3] {
        Axis::ALL.map(|axis| self.component(axis).map_or(0, AxisDirection::sign))
    }
}

impl TryFrom<i32> for PositionCode {
    type Error = PositionCodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        PositionCode::new(value)
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("C");
        }
        for dir in self.directions() {
            f.write_str(dir.mnemonic())?;
        }
        Ok(())
    }
}

impl fmt::Debug for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PositionCode({self})")
    }
}
