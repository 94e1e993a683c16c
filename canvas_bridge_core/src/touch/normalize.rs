// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw event → canonical call translation.

use kurbo::Point;

use super::event::{MotionAction, MotionEvent, PointerSample};
use super::gesture::{Gesture, GestureRecognizer, TapDetector};
use super::pointer::{PointerBatch, PointerId};
use crate::engine::Engine;
use crate::time::HostTime;
use crate::token::SurfaceToken;

/// One normalized call into the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TouchCall {
    /// Pointer(s) went down.
    Down(PointerBatch),
    /// Active pointers moved.
    Move(PointerBatch),
    /// Pointer(s) went up.
    Up(PointerBatch),
    /// All active pointers were aborted.
    Cancel,
    /// A confirmed single tap.
    SingleTap {
        /// Horizontal pixel position.
        x: i32,
        /// Vertical pixel position.
        y: i32,
    },
    /// A double tap.
    DoubleTap {
        /// Horizontal pixel position.
        x: i32,
        /// Vertical pixel position.
        y: i32,
        /// Pointer that performed the tap.
        id: PointerId,
    },
}

impl TouchCall {
    /// Returns the batch carried by down/move/up calls.
    #[must_use]
    pub fn batch(&self) -> Option<&PointerBatch> {
        match self {
            Self::Down(batch) | Self::Move(batch) | Self::Up(batch) => Some(batch),
            Self::Cancel | Self::SingleTap { .. } | Self::DoubleTap { .. } => None,
        }
    }

    /// Issues this call against `engine` for `token`.
    pub fn deliver<E: Engine + ?Sized>(&self, engine: &mut E, token: SurfaceToken) {
        match self {
            Self::Down(batch) => engine.touch_down(token, batch),
            Self::Move(batch) => engine.touch_move(token, batch),
            Self::Up(batch) => engine.touch_up(token, batch),
            Self::Cancel => engine.touches_cancel(token),
            Self::SingleTap { x, y } => engine.single_tap(token, *x, *y),
            Self::DoubleTap { x, y, id } => engine.double_tap(token, *x, *y, *id),
        }
    }
}

impl From<Gesture> for TouchCall {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::SingleTapConfirmed { position } => {
                let (x, y) = to_pixels(position);
                Self::SingleTap { x, y }
            }
            Gesture::DoubleTap { position, id } => {
                let (x, y) = to_pixels(position);
                Self::DoubleTap { x, y, id }
            }
        }
    }
}

/// Truncates a sub-pixel position toward zero, saturating at the `i32` range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "pixel coordinates are truncated toward zero like the platform's integer getters"
)]
fn to_pixels(position: Point) -> (i32, i32) {
    (position.x as i32, position.y as i32)
}

fn single(sample: &PointerSample) -> PointerBatch {
    let (x, y) = to_pixels(sample.position);
    PointerBatch::single(x, y, sample.id)
}

/// Translates raw [`MotionEvent`]s into [`TouchCall`]s.
///
/// Each raw event yields at most one call:
///
/// 1. The gesture recognizer sees the event first; if it claims it, the tap
///    is the only output.
/// 2. Otherwise the action kind decides:
///
/// | Action | Output | Batch contents |
/// |---|---|---|
/// | `Down` / `Up` | `Down` / `Up` | pointer at index 0 |
/// | `PointerDown` / `PointerUp` | `Down` / `Up` | pointer at `action_index` |
/// | `Move` | `Move` | every pointer, index order |
/// | `Cancel` | `Cancel` | none |
/// | `Other(_)` | nothing | none |
///
/// Edge events report a batch of one even though the platform's pointer
/// count includes every resting finger; only the changed pointer matters.
#[derive(Clone, Debug, Default)]
pub struct TouchNormalizer<G = TapDetector> {
    recognizer: G,
}

impl<G: GestureRecognizer> TouchNormalizer<G> {
    /// Creates a normalizer with the given gesture recognizer.
    #[must_use]
    pub const fn new(recognizer: G) -> Self {
        Self { recognizer }
    }

    /// Returns the gesture recognizer.
    #[must_use]
    pub const fn recognizer(&self) -> &G {
        &self.recognizer
    }

    /// Returns the gesture recognizer mutably.
    pub fn recognizer_mut(&mut self) -> &mut G {
        &mut self.recognizer
    }

    /// Normalizes one raw event.
    ///
    /// Returns `None` for unrecognized actions, which are left to default
    /// platform handling, and for malformed events whose pointer table lacks
    /// the indexed pointer.
    pub fn normalize(&mut self, event: &MotionEvent) -> Option<TouchCall> {
        if let Some(gesture) = self.recognizer.on_motion(event) {
            return Some(gesture.into());
        }

        match event.action {
            MotionAction::Down => event.primary().map(|p| TouchCall::Down(single(p))),
            MotionAction::Up => event.primary().map(|p| TouchCall::Up(single(p))),
            MotionAction::PointerDown => event.action_pointer().map(|p| TouchCall::Down(single(p))),
            MotionAction::PointerUp => event.action_pointer().map(|p| TouchCall::Up(single(p))),
            MotionAction::Move => {
                let mut batch = PointerBatch::with_capacity(event.pointer_count());
                for sample in &event.pointers {
                    let (x, y) = to_pixels(sample.position);
                    batch.push(x, y, sample.id);
                }
                Some(TouchCall::Move(batch))
            }
            MotionAction::Cancel => Some(TouchCall::Cancel),
            MotionAction::Other(_) => None,
        }
    }

    /// Reports a time-confirmed gesture, if one became due by `now`.
    pub fn poll(&mut self, now: HostTime) -> Option<TouchCall> {
        self.recognizer.poll(now).map(TouchCall::from)
    }

    /// Forgets any gesture in progress.
    pub fn reset(&mut self) {
        self.recognizer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// Recognizer that claims nothing.
    #[derive(Default)]
    struct NoGestures;

    impl GestureRecognizer for NoGestures {
        fn on_motion(&mut self, _event: &MotionEvent) -> Option<Gesture> {
            None
        }
    }

    /// Recognizer that claims every event with a fixed gesture.
    struct Always(Gesture);

    impl GestureRecognizer for Always {
        fn on_motion(&mut self, _event: &MotionEvent) -> Option<Gesture> {
            Some(self.0)
        }
    }

    fn samples(rows: &[(i64, f64, f64)]) -> Vec<PointerSample> {
        rows.iter()
            .map(|&(id, x, y)| PointerSample {
                id: PointerId(id),
                position: Point::new(x, y),
            })
            .collect()
    }

    fn plain() -> TouchNormalizer<NoGestures> {
        TouchNormalizer::new(NoGestures)
    }

    #[test]
    fn down_uses_index_zero() {
        let event = MotionEvent::new(MotionAction::Down, samples(&[(5, 10.7, 20.2)]), HostTime(0));
        assert_eq!(
            plain().normalize(&event),
            Some(TouchCall::Down(PointerBatch::single(10, 20, PointerId(5))))
        );
    }

    #[test]
    fn additional_down_uses_action_index_and_count_one() {
        let event = MotionEvent::new(
            MotionAction::PointerDown,
            samples(&[(0, 1.0, 1.0), (1, 2.0, 2.0), (7, 300.0, 400.0)]),
            HostTime(0),
        )
        .with_action_index(2);

        let call = plain().normalize(&event);
        assert_eq!(
            call,
            Some(TouchCall::Down(PointerBatch::single(300, 400, PointerId(7))))
        );
        assert_eq!(call.as_ref().and_then(TouchCall::batch).map(PointerBatch::len), Some(1));
    }

    #[test]
    fn non_last_up_uses_action_index() {
        let event = MotionEvent::new(
            MotionAction::PointerUp,
            samples(&[(0, 1.0, 1.0), (3, 9.0, 8.0)]),
            HostTime(0),
        )
        .with_action_index(1);
        assert_eq!(
            plain().normalize(&event),
            Some(TouchCall::Up(PointerBatch::single(9, 8, PointerId(3))))
        );
    }

    #[test]
    fn move_emits_every_pointer_in_index_order() {
        let event = MotionEvent::new(
            MotionAction::Move,
            samples(&[(4, 1.0, 2.0), (2, 3.0, 4.0), (9, 5.0, 6.0)]),
            HostTime(0),
        );
        let Some(TouchCall::Move(batch)) = plain().normalize(&event) else {
            panic!("expected a move call");
        };
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.xs(), &[1, 3, 5]);
        assert_eq!(batch.ys(), &[2, 4, 6]);
        assert_eq!(batch.ids(), &[PointerId(4), PointerId(2), PointerId(9)]);
    }

    #[test]
    fn cancel_carries_no_coordinates() {
        let event = MotionEvent::new(
            MotionAction::Cancel,
            samples(&[(0, 1.0, 1.0), (1, 2.0, 2.0), (2, 3.0, 3.0)]),
            HostTime(0),
        );
        let call = plain().normalize(&event);
        assert_eq!(call, Some(TouchCall::Cancel));
        assert!(call.as_ref().and_then(TouchCall::batch).is_none());
    }

    #[test]
    fn unrecognized_action_emits_nothing() {
        let event = MotionEvent::new(MotionAction::Other(7), samples(&[(0, 1.0, 1.0)]), HostTime(0));
        assert_eq!(plain().normalize(&event), None);
    }

    #[test]
    fn claimed_event_yields_only_the_tap() {
        let mut normalizer = TouchNormalizer::new(Always(Gesture::SingleTapConfirmed {
            position: Point::new(100.0, 200.0),
        }));
        let event = MotionEvent::new(MotionAction::Up, samples(&[(0, 100.0, 200.0)]), HostTime(0));
        assert_eq!(
            normalizer.normalize(&event),
            Some(TouchCall::SingleTap { x: 100, y: 200 })
        );
    }

    #[test]
    fn double_tap_keeps_pointer_id() {
        let mut normalizer = TouchNormalizer::new(Always(Gesture::DoubleTap {
            position: Point::new(5.9, 6.1),
            id: PointerId(11),
        }));
        let event = MotionEvent::new(MotionAction::Down, samples(&[(11, 5.0, 6.0)]), HostTime(0));
        assert_eq!(
            normalizer.normalize(&event),
            Some(TouchCall::DoubleTap {
                x: 5,
                y: 6,
                id: PointerId(11)
            })
        );
    }

    #[test]
    fn tap_detector_double_tap_suppresses_second_down() {
        let mut normalizer = TouchNormalizer::<TapDetector>::default();
        let ms = 1_000_000;
        let at = |action, t: u64| MotionEvent::new(action, samples(&[(0, 40.0, 40.0)]), HostTime(t * ms));

        assert!(matches!(
            normalizer.normalize(&at(MotionAction::Down, 0)),
            Some(TouchCall::Down(_))
        ));
        assert!(matches!(
            normalizer.normalize(&at(MotionAction::Up, 60)),
            Some(TouchCall::Up(_))
        ));
        assert_eq!(
            normalizer.normalize(&at(MotionAction::Down, 150)),
            Some(TouchCall::DoubleTap {
                x: 40,
                y: 40,
                id: PointerId(0)
            })
        );
        assert!(matches!(
            normalizer.normalize(&at(MotionAction::Up, 200)),
            Some(TouchCall::Up(_))
        ));
    }

    #[test]
    fn poll_reports_confirmed_single_tap() {
        let mut normalizer = TouchNormalizer::<TapDetector>::default();
        let down = MotionEvent::new(MotionAction::Down, samples(&[(0, 100.0, 200.0)]), HostTime(0));
        let up = MotionEvent::new(MotionAction::Up, samples(&[(0, 100.0, 200.0)]), HostTime(50_000_000));
        _ = normalizer.normalize(&down);
        _ = normalizer.normalize(&up);
        assert_eq!(
            normalizer.poll(HostTime(400_000_000)),
            Some(TouchCall::SingleTap { x: 100, y: 200 })
        );
    }

    #[test]
    fn missing_pointer_row_yields_nothing() {
        let event = MotionEvent::new(MotionAction::Down, vec![], HostTime(0));
        assert_eq!(plain().normalize(&event), None);
    }
}
