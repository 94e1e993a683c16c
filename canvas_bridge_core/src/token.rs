// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface identity types.
//!
//! [`SurfaceToken`] is the engine's capability for one surface instance. The
//! bridge never looks inside it: tokens are compared, tested against
//! [`SurfaceToken::NULL`], and passed by value to every [`Engine`] call.
//!
//! [`Engine`]: crate::engine::Engine

use core::fmt;

/// An opaque 64-bit capability identifying one engine-side surface.
///
/// Tokens are issued by [`Engine::create`](crate::engine::Engine::create) or
/// restored from a [`SavedSurface`]. The value `0` is reserved as
/// [`NULL`](Self::NULL), meaning "no token".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceToken(u64);

impl SurfaceToken {
    /// The reserved "no token" value.
    pub const NULL: Self = Self(0);

    /// Wraps a raw token value, e.g. one read back from persisted state.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value for persistence or FFI hand-off.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for [`NULL`](Self::NULL).
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for SurfaceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceToken({:#x})", self.0)
    }
}

/// Caller-assigned logical surface slot.
///
/// Distinguishes concurrent surfaces when a host shows more than one; hosts
/// with a single surface use `SurfaceSlot(0)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SurfaceSlot(pub u32);

impl fmt::Debug for SurfaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceSlot({})", self.0)
    }
}

/// State persisted across a process save/restore cycle.
///
/// Restoring hands `token` back to
/// [`SurfaceController::acquire_token`](crate::lifecycle::SurfaceController::acquire_token)
/// so the surface is re-adopted instead of re-created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SavedSurface {
    /// Slot the surface was created for.
    pub slot: SurfaceSlot,
    /// Token value at save time.
    pub token: SurfaceToken,
}
