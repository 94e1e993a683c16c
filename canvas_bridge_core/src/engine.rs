// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary contract with the rendering engine.
//!
//! The engine owns all per-surface state; the bridge addresses it only through
//! a [`SurfaceToken`]. Each platform integration provides an [`Engine`]
//! implementation (typically a thin FFI shim) and hands it to a
//! [`SurfaceController`](crate::lifecycle::SurfaceController), which decides
//! *when* each call is legal.
//!
//! # Call sequencing
//!
//! ```text
//!   create ──► bind ──► (touch_* | taps | text_input)* ──► release ──┐
//!                ▲                                                    │
//!                └────────────────── bind ◄───────────────────────────┘
//!                                                    ... ──► dispose
//! ```
//!
//! Touch, tap and text calls are only issued between a successful `bind` and
//! the following `release`. No call is issued on a token after `dispose`.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use crate::token::{SurfaceSlot, SurfaceToken};
use crate::touch::{PointerBatch, PointerId};

/// Flags passed to [`Engine::release`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReleaseFlags(u32);

impl ReleaseFlags {
    /// No flags: the surface is going away for good and GPU-side resources
    /// must be freed.
    pub const EMPTY: Self = Self(0);

    /// The surface is being torn down because the display rotated; the engine
    /// may keep GPU-side resources for the imminent re-bind.
    pub const ROTATING: Self = Self(0x0000_0001);

    /// Returns the raw bit pattern.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit in `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flag is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ReleaseFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ReleaseFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ReleaseFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::ROTATING) {
            write!(f, "ReleaseFlags(ROTATING)")
        } else {
            write!(f, "ReleaseFlags({:#x})", self.0)
        }
    }
}

/// Calls from the bridge into the rendering engine.
///
/// `Context` and `Window` are the platform's opaque application context and
/// native drawing surface (e.g. a JNI context reference and an
/// `ANativeWindow`). The bridge never inspects them.
///
/// Implementations are expected to be non-blocking dispatches into
/// engine-internal queues; the bridge defines no timeouts.
pub trait Engine {
    /// Platform application context passed through to [`bind`](Self::bind).
    type Context: ?Sized;
    /// Native drawing surface passed through to [`bind`](Self::bind).
    type Window: ?Sized;

    /// Allocates a new engine-side surface for `slot` and returns its token.
    fn create(&mut self, slot: SurfaceSlot) -> SurfaceToken;

    /// Attaches `token` to a live drawing surface. Returns `true` on success.
    fn bind(&mut self, token: SurfaceToken, context: &Self::Context, window: &Self::Window)
    -> bool;

    /// Detaches `token` from its drawing surface.
    fn release(&mut self, token: SurfaceToken, flags: ReleaseFlags);

    /// One or more pointers went down. The batch length is the touch count.
    fn touch_down(&mut self, token: SurfaceToken, batch: &PointerBatch);

    /// Active pointers moved.
    fn touch_move(&mut self, token: SurfaceToken, batch: &PointerBatch);

    /// One or more pointers went up.
    fn touch_up(&mut self, token: SurfaceToken, batch: &PointerBatch);

    /// All tracked pointers were aborted rather than completed.
    fn touches_cancel(&mut self, token: SurfaceToken);

    /// A confirmed single tap.
    fn single_tap(&mut self, token: SurfaceToken, x: i32, y: i32);

    /// A double tap by pointer `id`.
    fn double_tap(&mut self, token: SurfaceToken, x: i32, y: i32, id: PointerId);

    /// Committed text from the platform input method.
    fn text_input(&mut self, token: SurfaceToken, text: &str);

    /// The soft keyboard was dismissed.
    fn keyboard_hidden(&mut self, token: SurfaceToken);

    /// Requests an explicit redraw of a bound surface.
    fn refresh(&mut self, token: SurfaceToken) {
        _ = token;
    }

    /// Frees all engine-side state for `token`. Called once, last.
    fn dispose(&mut self, token: SurfaceToken) {
        _ = token;
    }
}
