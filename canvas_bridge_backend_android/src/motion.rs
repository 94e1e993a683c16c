// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `AMotionEvent` decoding.
//!
//! Android packs the action kind and the index of the pointer it applies to
//! into one action word: the low byte is the action, bits 8..16 the pointer
//! index. The embedding app reads the raw words and pointer rows over JNI and
//! hands them to [`decode_action`] / [`MotionEventBuilder`].

use canvas_bridge_core::time::HostTime;
use canvas_bridge_core::touch::{MotionAction, MotionEvent, PointerId, PointerSample};
use kurbo::Point;

/// `AMOTION_EVENT_ACTION_MASK`.
pub const ACTION_MASK: i32 = 0xff;
/// `AMOTION_EVENT_ACTION_POINTER_INDEX_MASK`.
pub const ACTION_POINTER_INDEX_MASK: i32 = 0xff00;
/// `AMOTION_EVENT_ACTION_POINTER_INDEX_SHIFT`.
pub const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

/// `AMOTION_EVENT_ACTION_DOWN`.
pub const ACTION_DOWN: i32 = 0;
/// `AMOTION_EVENT_ACTION_UP`.
pub const ACTION_UP: i32 = 1;
/// `AMOTION_EVENT_ACTION_MOVE`.
pub const ACTION_MOVE: i32 = 2;
/// `AMOTION_EVENT_ACTION_CANCEL`.
pub const ACTION_CANCEL: i32 = 3;
/// `AMOTION_EVENT_ACTION_OUTSIDE`.
pub const ACTION_OUTSIDE: i32 = 4;
/// `AMOTION_EVENT_ACTION_POINTER_DOWN`.
pub const ACTION_POINTER_DOWN: i32 = 5;
/// `AMOTION_EVENT_ACTION_POINTER_UP`.
pub const ACTION_POINTER_UP: i32 = 6;

/// Splits an action word into its kind and pointer index.
///
/// The index is only meaningful for [`MotionAction::PointerDown`] and
/// [`MotionAction::PointerUp`]; it is reported as `0` for everything else.
#[must_use]
pub fn decode_action(action: i32) -> (MotionAction, usize) {
    let masked = action & ACTION_MASK;
    let index = usize::try_from((action & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT)
        .unwrap_or(0);
    let kind = match masked {
        ACTION_DOWN => MotionAction::Down,
        ACTION_UP => MotionAction::Up,
        ACTION_MOVE => MotionAction::Move,
        ACTION_CANCEL => MotionAction::Cancel,
        ACTION_POINTER_DOWN => return (MotionAction::PointerDown, index),
        ACTION_POINTER_UP => return (MotionAction::PointerUp, index),
        // Masked to one byte, so never negative.
        other => MotionAction::Other(other.unsigned_abs()),
    };
    (kind, 0)
}

/// Assembles a [`MotionEvent`] from raw `AMotionEvent` fields.
///
/// ```
/// use canvas_bridge_backend_android::motion::{MotionEventBuilder, ACTION_POINTER_DOWN};
/// use canvas_bridge_core::touch::MotionAction;
///
/// // Second finger (index 1) down.
/// let event = MotionEventBuilder::new(ACTION_POINTER_DOWN | (1 << 8), 5_000)
///     .pointer(0, 10.0, 10.0)
///     .pointer(1, 80.5, 40.25)
///     .build();
/// assert_eq!(event.action, MotionAction::PointerDown);
/// assert_eq!(event.action_index, 1);
/// ```
#[derive(Clone, Debug)]
pub struct MotionEventBuilder {
    event: MotionEvent,
}

impl MotionEventBuilder {
    /// Starts an event from its action word and `getEventTime` in nanoseconds.
    ///
    /// Negative times clamp to zero.
    #[must_use]
    pub fn new(action: i32, event_time_nanos: i64) -> Self {
        let (kind, index) = decode_action(action);
        let time = HostTime(u64::try_from(event_time_nanos).unwrap_or(0));
        Self {
            event: MotionEvent::new(kind, Vec::new(), time).with_action_index(index),
        }
    }

    /// Appends the next pointer row (`getPointerId`, `getX`, `getY`).
    #[must_use]
    pub fn pointer(mut self, id: i32, x: f32, y: f32) -> Self {
        self.event.pointers.push(PointerSample {
            id: PointerId(i64::from(id)),
            position: Point::new(f64::from(x), f64::from(y)),
        });
        self
    }

    /// Finishes the event.
    #[must_use]
    pub fn build(self) -> MotionEvent {
        self.event
    }
}
