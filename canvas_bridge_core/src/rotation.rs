// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display rotation sampling.
//!
//! The lifecycle controller compares the rotation seen at bind time with the
//! rotation seen at teardown to tell a rotation-driven surface recreation
//! apart from a genuine destroy.

/// Display rotation in quarter turns from the natural orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Natural orientation.
    #[default]
    Deg0,
    /// Rotated 90° counter-clockwise.
    Deg90,
    /// Upside down.
    Deg180,
    /// Rotated 270° counter-clockwise.
    Deg270,
}

impl Rotation {
    /// Maps a quarter-turn count onto a rotation, wrapping modulo four.
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Returns the number of quarter turns (0–3).
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }
}

/// Samples the current display rotation.
///
/// Any `Fn() -> Rotation` closure is a rotation source.
pub trait RotationSource {
    /// Returns the rotation of the display the surface lives on, right now.
    fn rotation(&self) -> Rotation;
}

impl<F: Fn() -> Rotation> RotationSource for F {
    fn rotation(&self) -> Rotation {
        self()
    }
}

/// A rotation source for displays that never rotate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRotation(pub Rotation);

impl RotationSource for FixedRotation {
    fn rotation(&self) -> Rotation {
        self.0
    }
}
