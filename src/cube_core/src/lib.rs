//! Geometry, state, and turn bookkeeping for a 3x3x3 twisty cube.
//!
//! Positions are written as OR-ed direction bits ([`PositionCode`]).
//! Stickers live in 54 fixed slots ([`FaceletId`]) whose colors and
//! provenance links are tracked by a [`FaceletLedger`]. A [`CoreState`]
//! adds the 27 physical sub-cubes, and a [`CubeManager`] serializes turn
//! requests against it.

#![warn(clippy::pedantic)]

mod animation;
mod axis;
mod color;
mod core_state;
mod cube_map;
mod facelet;
mod ledger;
mod links;
mod manager;
mod position;
mod turn;

pub use animation::{AnimationEvent, AnimationTarget, RotationCommand, TurnTicket};
pub use axis::{Axis, AxisDirection, ParseAxisDirectionError};
pub use color::{Color, ColorParseError};
pub use core_state::{CORE_COUNT, CoreId, CoreState, CoreUnit};
pub use cube_map::CubeMap;
pub use facelet::{FACE_SIZE, FACELET_COUNT, Facelet, FaceletId};
pub use ledger::{FaceletLedger, UNPAINTED, default_color, default_colors};
pub use links::{LinkError, LinkInferenceError};
pub use manager::{CubeManager, DEFAULT_DURATION_MS, ManagerError};
pub use position::{CODE_LIMIT, PositionCode, PositionCodeError};
pub use turn::{FaceletPermutation, Sense, Turn, TurnError, TurnParseError};
