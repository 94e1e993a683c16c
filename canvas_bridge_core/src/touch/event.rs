// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-neutral raw pointer notifications.

use alloc::vec::Vec;

use kurbo::Point;

use super::pointer::PointerId;
use crate::time::HostTime;

/// What happened in a [`MotionEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// The first pointer went down.
    Down,
    /// The last pointer went up.
    Up,
    /// An additional pointer went down while others are active.
    PointerDown,
    /// A pointer went up while others remain active.
    PointerUp,
    /// One or more active pointers moved (coalesced).
    Move,
    /// The gesture was aborted by the platform.
    Cancel,
    /// Any other platform action (hover, scroll, outside, …), carrying the
    /// raw platform code.
    Other(u32),
}

/// One row of the platform's pointer table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Stable pointer id.
    pub id: PointerId,
    /// Position in surface pixels, sub-pixel precision.
    pub position: Point,
}

/// A single raw pointer notification.
///
/// `pointers` lists every pointer active during the event in platform index
/// order. For [`PointerDown`](MotionAction::PointerDown) and
/// [`PointerUp`](MotionAction::PointerUp), `action_index` names the row of the
/// pointer that changed; it is `0` for every other action.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    /// The action kind.
    pub action: MotionAction,
    /// Index of the pointer the action applies to.
    pub action_index: usize,
    /// Active pointers in platform index order.
    pub pointers: Vec<PointerSample>,
    /// When the event happened.
    pub time: HostTime,
}

impl MotionEvent {
    /// Creates an event whose action applies to pointer index 0.
    #[must_use]
    pub fn new(action: MotionAction, pointers: Vec<PointerSample>, time: HostTime) -> Self {
        Self {
            action,
            action_index: 0,
            pointers,
            time,
        }
    }

    /// Sets the index of the pointer the action applies to.
    #[must_use]
    pub fn with_action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    /// Number of active pointers, including one that is going up.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns the pointer at platform index `index`.
    #[must_use]
    pub fn pointer(&self, index: usize) -> Option<&PointerSample> {
        self.pointers.get(index)
    }

    /// Returns the pointer the action applies to.
    #[must_use]
    pub fn action_pointer(&self) -> Option<&PointerSample> {
        self.pointer(self.action_index)
    }

    /// Returns the pointer at index 0, which is what single-pointer actions
    /// report.
    #[must_use]
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointer(0)
    }
}
