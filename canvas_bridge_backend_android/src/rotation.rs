// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `Surface.ROTATION_*` decoding and a shared display-rotation cell.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use canvas_bridge_core::rotation::{Rotation, RotationSource};

/// `Surface.ROTATION_0`.
pub const ROTATION_0: i32 = 0;
/// `Surface.ROTATION_90`.
pub const ROTATION_90: i32 = 1;
/// `Surface.ROTATION_180`.
pub const ROTATION_180: i32 = 2;
/// `Surface.ROTATION_270`.
pub const ROTATION_270: i32 = 3;

/// Maps `Display.getRotation()` to a [`Rotation`]. Unknown values map to
/// [`Rotation::Deg0`].
#[must_use]
pub const fn rotation_from_surface(value: i32) -> Rotation {
    match value {
        ROTATION_90 => Rotation::Deg90,
        ROTATION_180 => Rotation::Deg180,
        ROTATION_270 => Rotation::Deg270,
        _ => Rotation::Deg0,
    }
}

/// Latest raw display rotation, written by the embedding app.
///
/// The app stores `Display.getRotation()` whenever its configuration changes;
/// the surface controller samples it at bind and unbind. Clones share the
/// same cell.
#[derive(Clone, Debug, Default)]
pub struct DisplayRotation(Arc<AtomicI32>);

impl DisplayRotation {
    /// Creates a cell holding `value`.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(Arc::new(AtomicI32::new(value)))
    }

    /// Records the current raw rotation.
    pub fn store(&self, value: i32) {
        self.0.store(value, Ordering::Relaxed);
    }
}

impl RotationSource for DisplayRotation {
    fn rotation(&self) -> Rotation {
        rotation_from_surface(self.0.load(Ordering::Relaxed))
    }
}
