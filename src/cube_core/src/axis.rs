use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// One of the three coordinate axes of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The positive and negative direction along this axis, in that order.
    #[must_use]
    pub fn directions(self) -> [AxisDirection; 2] {
        match self {
            Axis::X => [AxisDirection::XPos, AxisDirection::XNeg],
            Axis::Y => [AxisDirection::YPos, AxisDirection::YNeg],
            Axis::Z => [AxisDirection::ZPos, AxisDirection::ZNeg],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}

/// A signed direction along one axis, or the center of the cube.
///
/// Every non-center direction owns one bit of a six bit code so that
/// positions on the cube can be expressed as the bitwise OR of the
/// directions they lie in. See [`crate::PositionCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AxisDirection {
    Center,
    XPos,
    XNeg,
    YPos,
    YNeg,
    ZPos,
    ZNeg,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown axis direction `{0}`")]
pub struct ParseAxisDirectionError(pub String);

impl AxisDirection {
    /// Every value, center first.
    pub const ALL: [AxisDirection; 7] = [
        AxisDirection::Center,
        AxisDirection::XPos,
        AxisDirection::XNeg,
        AxisDirection::YPos,
        AxisDirection::YNeg,
        AxisDirection::ZPos,
        AxisDirection::ZNeg,
    ];

    /// The six face directions in canonical order.
    pub const FACES: [AxisDirection; 6] = [
        AxisDirection::XPos,
        AxisDirection::XNeg,
        AxisDirection::YPos,
        AxisDirection::YNeg,
        AxisDirection::ZPos,
        AxisDirection::ZNeg,
    ];

    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AxisDirection::Center => 0,
            AxisDirection::XPos => 0b10_0000,
            AxisDirection::XNeg => 0b01_0000,
            AxisDirection::YPos => 0b00_1000,
            AxisDirection::YNeg => 0b00_0100,
            AxisDirection::ZPos => 0b00_0010,
            AxisDirection::ZNeg => 0b00_0001,
        }
    }

    /// Finds the direction owning exactly the bit `code`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.code() == code)
    }

    #[must_use]
    pub fn axis(self) -> Option<Axis> {
        match self {
            AxisDirection::Center => None,
            AxisDirection::XPos | AxisDirection::XNeg => Some(Axis::X),
            AxisDirection::YPos | AxisDirection::YNeg => Some(Axis::Y),
            AxisDirection::ZPos | AxisDirection::ZNeg => Some(Axis::Z),
        }
    }

    /// `+1`, `-1`, or `0` for the center.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            AxisDirection::Center => 0,
            AxisDirection::XPos | AxisDirection::YPos | AxisDirection::ZPos => 1,
            AxisDirection::XNeg | AxisDirection::YNeg | AxisDirection::ZNeg => -1,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            AxisDirection::Center => AxisDirection::Center,
            AxisDirection::XPos => AxisDirection::XNeg,
            AxisDirection::XNeg => AxisDirection::XPos,
            AxisDirection::YPos => AxisDirection::YNeg,
            AxisDirection::YNeg => AxisDirection::YPos,
            AxisDirection::ZPos => AxisDirection::ZNeg,
            AxisDirection::ZNeg => AxisDirection::ZPos,
        }
    }

    /// The directions lying on the other two axes, in canonical order. The
    /// center is perpendicular to everything and yields all six faces.
    #[must_use]
    pub fn others(self) -> &'static [AxisDirection] {
        const ACROSS_X: [AxisDirection; 4] = [
            AxisDirection::YPos,
            AxisDirection::YNeg,
            AxisDirection::ZPos,
            AxisDirection::ZNeg,
        ];
        const ACROSS_Y: [AxisDirection; 4] = [
            AxisDirection::XPos,
            AxisDirection::XNeg,
            AxisDirection::ZPos,
            AxisDirection::ZNeg,
        ];
        const ACROSS_Z: [AxisDirection; 4] = [
            AxisDirection::XPos,
            AxisDirection::XNeg,
            AxisDirection::YPos,
            AxisDirection::YNeg,
        ];

        match self.axis() {
            None => &Self::FACES,
            Some(Axis::X) => &ACROSS_X,
            Some(Axis::Y) => &ACROSS_Y,
            Some(Axis::Z) => &ACROSS_Z,
        }
    }

    /// The two remaining axes in cyclic order: X gives (Y, Z), Y gives
    /// (Z, X) and Z gives (X, Y). Turn handedness depends on this order.
    #[must_use]
    pub fn other_axes(self) -> Option<(Axis, Axis)> {
        self.axis().map(|axis| match axis {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        })
    }

    /// The direction along `axis` with the sign of `sign`, or `None` when
    /// `sign` is zero.
    #[must_use]
    pub fn from_axis_sign(axis: Axis, sign: i32) -> Option<Self> {
        let [positive, negative] = axis.directions();
        match sign.signum() {
            1 => Some(positive),
            -1 => Some(negative),
            _ => None,
        }
    }

    /// Lists the directions whose bits are set in `code`, in canonical
    /// order. Codes outside of `0..64` are rejected.
    #[must_use]
    pub fn decode(code: i32) -> Option<Vec<AxisDirection>> {
        let bits = u8::try_from(code).ok().filter(|&bits| bits < 64)?;
        Some(
            Self::FACES
                .into_iter()
                .filter(|dir| bits & dir.code() != 0)
                .collect(),
        )
    }

    /// The canonical mnemonic, e.g. `X+` or `C`.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        match self {
            AxisDirection::Center => "C",
            AxisDirection::XPos => "X+",
            AxisDirection::XNeg => "X-",
            AxisDirection::YPos => "Y+",
            AxisDirection::YNeg => "Y-",
            AxisDirection::ZPos => "Z+",
            AxisDirection::ZNeg => "Z-",
        }
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for AxisDirection {
    type Err = ParseAxisDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if matches!(upper.as_str(), "C" | "O" | "CENTER" | "ORIGIN") {
            return Ok(AxisDirection::Center);
        }

        let mut chars = upper.chars();
        let axis = match chars.next() {
            Some('X') => Axis::X,
            Some('Y') => Axis::Y,
            Some('Z') => Axis::Z,
            _ => return Err(ParseAxisDirectionError(s.to_owned())),
        };
        let rest = chars.as_str();
        let rest = rest.strip_prefix('_').unwrap_or(rest);
        let sign = match rest {
            "+" | "P" | "POS" | "PLUS" => 1,
            "-" | "M" | "N" | "NEG" | "MINUS" => -1,
            _ => return Err(ParseAxisDirectionError(s.to_owned())),
        };

        Self::from_axis_sign(axis, sign).ok_or_else(|| ParseAxisDirectionError(s.to_owned()))
    }
}

impl TryFrom<String> for AxisDirection {
    type Error = ParseAxisDirectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AxisDirection> for String {
    fn from(value: AxisDirection) -> Self {
        value.mnemonic().to_owned()
    }
}
