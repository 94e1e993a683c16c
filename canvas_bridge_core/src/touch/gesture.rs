// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single- and double-tap recognition.
//!
//! A [`GestureRecognizer`] sees every raw [`MotionEvent`] before discrete
//! touch dispatch does. When it *claims* an event by returning a [`Gesture`],
//! the normalizer emits the tap and nothing else for that event.
//!
//! [`TapDetector`] follows the platform tap rules:
//!
//! ```text
//!   Down ──► Up ──(double_tap_timeout since Down elapses)──► SingleTapConfirmed
//!              │                                              (via poll)
//!              └──► Down within [min_time, timeout] of Up
//!                   and within double_tap_slop ──────────────► DoubleTap
//!                                                             (claims the Down)
//! ```
//!
//! A single tap cannot be confirmed on a raw event alone: it needs the
//! double-tap window to close without a second `Down`. Hosts therefore call
//! [`GestureRecognizer::poll`] from a timer armed at
//! [`TapDetector::next_deadline`]. If the window closes while the finger is
//! still down, confirmation is deferred to (and claims) the `Up`. A `Move` or
//! `Up` arriving after an unpolled deadline claims the overdue tap, but a
//! `Down` cannot: hosts poll at the `Down`'s time before passing it on.

use kurbo::Point;

use super::event::{MotionAction, MotionEvent};
use super::pointer::PointerId;
use crate::time::{Duration, HostTime};

/// A recognized tap gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// A tap that was not followed by a second tap in time.
    SingleTapConfirmed {
        /// Where the tap landed.
        position: Point,
    },
    /// Two taps in quick succession.
    DoubleTap {
        /// Where the first tap of the pair went down.
        position: Point,
        /// Pointer that performed the first tap.
        id: PointerId,
    },
}

/// Consumes raw events ahead of discrete touch dispatch.
pub trait GestureRecognizer {
    /// Observes `event`. Returning `Some` claims the event.
    fn on_motion(&mut self, event: &MotionEvent) -> Option<Gesture>;

    /// Reports a gesture whose confirmation depends only on time passing.
    fn poll(&mut self, now: HostTime) -> Option<Gesture> {
        _ = now;
        None
    }

    /// Forgets any gesture in progress.
    fn reset(&mut self) {}
}

/// Thresholds for [`TapDetector`], in surface pixels and nanoseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapConfig {
    /// Movement allowed before a press stops being a tap.
    pub touch_slop: f64,
    /// Movement allowed during the first tap for it to start a double tap.
    pub double_tap_touch_slop: f64,
    /// Maximum distance between the two downs of a double tap.
    pub double_tap_slop: f64,
    /// Window after which a tap is confirmed as single.
    pub double_tap_timeout: Duration,
    /// Minimum up-to-down gap for a double tap; shorter gaps are bounces.
    pub double_tap_min_time: Duration,
    /// Hold time after which a press is a long press rather than a tap.
    pub long_press_timeout: Duration,
}

impl TapConfig {
    /// Android `ViewConfiguration` defaults at density 1.
    #[must_use]
    pub const fn android() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_touch_slop: 8.0,
            double_tap_slop: 100.0,
            double_tap_timeout: Duration::from_millis(300),
            double_tap_min_time: Duration::from_millis(40),
            long_press_timeout: Duration::from_millis(500),
        }
    }

    /// Scales the distance thresholds by a display density factor.
    #[must_use]
    pub fn scaled(self, density: f64) -> Self {
        Self {
            touch_slop: self.touch_slop * density,
            double_tap_touch_slop: self.double_tap_touch_slop * density,
            double_tap_slop: self.double_tap_slop * density,
            ..self
        }
    }
}

impl Default for TapConfig {
    fn default() -> Self {
        Self::android()
    }
}

#[derive(Clone, Copy, Debug)]
struct Press {
    position: Point,
    id: PointerId,
    time: HostTime,
}

/// Platform-style single/double-tap recognizer.
#[derive(Clone, Debug)]
pub struct TapDetector {
    config: TapConfig,
    current_down: Option<Press>,
    previous_up: Option<Press>,
    /// Deadline of the pending single-tap confirmation, if armed.
    pending_tap: Option<HostTime>,
    still_down: bool,
    in_tap_region: bool,
    in_double_tap_region: bool,
    double_tapping: bool,
    in_long_press: bool,
    defer_confirm: bool,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}

impl TapDetector {
    /// Creates a detector with the given thresholds.
    #[must_use]
    pub const fn new(config: TapConfig) -> Self {
        Self {
            config,
            current_down: None,
            previous_up: None,
            pending_tap: None,
            still_down: false,
            in_tap_region: false,
            in_double_tap_region: false,
            double_tapping: false,
            in_long_press: false,
            defer_confirm: false,
        }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Returns the time at which [`poll`](GestureRecognizer::poll) next has
    /// something to do, if anything is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        let long_press = self
            .current_down
            .filter(|_| self.still_down && !self.in_long_press && self.in_tap_region)
            .map(|down| down.time.saturating_add(self.config.long_press_timeout));
        match (self.pending_tap, long_press) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn cancel_taps(&mut self) {
        self.pending_tap = None;
        self.double_tapping = false;
        self.in_tap_region = false;
        self.in_double_tap_region = false;
        self.defer_confirm = false;
        self.in_long_press = false;
    }

    /// Applies timer expiries that are due at `now`.
    fn advance(&mut self, now: HostTime) -> Option<Gesture> {
        let mut confirmed = None;
        if let Some(deadline) = self.pending_tap
            && now >= deadline
        {
            self.pending_tap = None;
            if self.still_down {
                self.defer_confirm = true;
            } else if let Some(down) = self.current_down {
                confirmed = Some(Gesture::SingleTapConfirmed {
                    position: down.position,
                });
            }
        }
        if self.still_down
            && !self.in_long_press
            && self.in_tap_region
            && let Some(down) = self.current_down
            && now >= down.time.saturating_add(self.config.long_press_timeout)
        {
            self.in_long_press = true;
            self.pending_tap = None;
            self.defer_confirm = false;
        }
        confirmed
    }

    fn is_double_tap(&self, first_down: &Press, first_up: &Press, second_down: &Press) -> bool {
        if !self.in_double_tap_region {
            return false;
        }
        let gap = second_down.time.saturating_duration_since(first_up.time);
        if second_down.time < first_up.time
            || gap > self.config.double_tap_timeout
            || gap < self.config.double_tap_min_time
        {
            return false;
        }
        let slop = self.config.double_tap_slop;
        (second_down.position - first_down.position).hypot2() < slop * slop
    }

    fn on_down(&mut self, press: Press) -> Option<Gesture> {
        let had_pending_tap = self.pending_tap.is_some_and(|deadline| press.time < deadline);
        self.pending_tap = None;

        let mut claimed = None;
        match (self.current_down, self.previous_up) {
            (Some(first_down), Some(first_up))
                if had_pending_tap && self.is_double_tap(&first_down, &first_up, &press) =>
            {
                self.double_tapping = true;
                claimed = Some(Gesture::DoubleTap {
                    position: first_down.position,
                    id: first_down.id,
                });
            }
            _ => {
                self.pending_tap = Some(press.time.saturating_add(self.config.double_tap_timeout));
            }
        }

        self.current_down = Some(press);
        self.in_tap_region = true;
        self.in_double_tap_region = true;
        self.still_down = true;
        self.in_long_press = false;
        self.defer_confirm = false;
        claimed
    }

    fn on_move(&mut self, position: Point) {
        if self.double_tapping || !self.in_tap_region {
            return;
        }
        let Some(down) = self.current_down else {
            return;
        };
        let distance2 = (position - down.position).hypot2();
        let touch_slop = self.config.touch_slop;
        if distance2 > touch_slop * touch_slop {
            self.in_tap_region = false;
            self.pending_tap = None;
            self.defer_confirm = false;
        }
        let double_tap_touch_slop = self.config.double_tap_touch_slop;
        if distance2 > double_tap_touch_slop * double_tap_touch_slop {
            self.in_double_tap_region = false;
        }
    }

    fn on_up(&mut self, press: Press) -> Option<Gesture> {
        self.still_down = false;
        let mut claimed = None;
        if !self.double_tapping
            && !self.in_long_press
            && self.in_tap_region
            && self.defer_confirm
        {
            claimed = Some(Gesture::SingleTapConfirmed {
                position: press.position,
            });
        }
        self.previous_up = Some(press);
        self.double_tapping = false;
        self.defer_confirm = false;
        claimed
    }
}

impl GestureRecognizer for TapDetector {
    fn on_motion(&mut self, event: &MotionEvent) -> Option<Gesture> {
        let press = event.primary().map(|p| Press {
            position: p.position,
            id: p.id,
            time: event.time,
        });

        match event.action {
            MotionAction::Down => {
                // An expired confirmation that was never polled is dropped
                // rather than swallowing this down.
                self.pending_tap = self.pending_tap.filter(|deadline| event.time < *deadline);
                press.and_then(|press| self.on_down(press))
            }
            MotionAction::Move => {
                let due = self.advance(event.time);
                if let Some(press) = press {
                    self.on_move(press.position);
                }
                due
            }
            MotionAction::Up => {
                let due = self.advance(event.time);
                let claimed = press.and_then(|press| self.on_up(press));
                due.or(claimed)
            }
            MotionAction::PointerDown => {
                self.cancel_taps();
                None
            }
            MotionAction::Cancel => {
                self.cancel_taps();
                self.still_down = false;
                None
            }
            MotionAction::PointerUp | MotionAction::Other(_) => None,
        }
    }

    fn poll(&mut self, now: HostTime) -> Option<Gesture> {
        self.advance(now)
    }

    fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}
