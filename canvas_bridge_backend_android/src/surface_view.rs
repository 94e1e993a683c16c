// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `SurfaceView` callback set.
//!
//! [`SurfaceView`] mirrors what an Android `SurfaceView` subclass receives:
//! `SurfaceHolder.Callback` (`surfaceCreated`, `surfaceChanged`,
//! `surfaceDestroyed`), `onTouchEvent`, input-method commits and activity
//! resume. Each JNI entry point in the embedding app maps to one method here.

use canvas_bridge_core::engine::Engine;
use canvas_bridge_core::lifecycle::{BindObserver, SurfaceController};
use canvas_bridge_core::rotation::RotationSource;
use canvas_bridge_core::time::HostTime;
use canvas_bridge_core::token::{SavedSurface, SurfaceSlot, SurfaceToken};
use canvas_bridge_core::touch::{
    GestureRecognizer, MotionAction, MotionEvent, TapDetector, TouchNormalizer,
};

/// A surface controller plus touch normalizer, driven by view callbacks.
#[derive(Debug)]
pub struct SurfaceView<E, R, G = TapDetector> {
    controller: SurfaceController<E, R>,
    normalizer: TouchNormalizer<G>,
}

impl<E: Engine, R: RotationSource> SurfaceView<E, R, TapDetector> {
    /// Creates a view using the platform tap detector.
    ///
    /// `saved` is the token persisted by a previous instance, if any; it is
    /// adopted instead of creating a new engine surface.
    pub fn new(engine: E, rotation: R, slot: SurfaceSlot, saved: Option<SurfaceToken>) -> Self {
        Self::with_recognizer(engine, rotation, slot, saved, TapDetector::default())
    }

    /// When the pending single tap (if any) becomes due.
    ///
    /// The app schedules [`on_gesture_timeout`](Self::on_gesture_timeout) on
    /// its looper for this time.
    #[must_use]
    pub fn next_gesture_deadline(&self) -> Option<HostTime> {
        self.normalizer.recognizer().next_deadline()
    }
}

impl<E: Engine, R: RotationSource, G: GestureRecognizer> SurfaceView<E, R, G> {
    /// Creates a view with a custom gesture recognizer.
    pub fn with_recognizer(
        engine: E,
        rotation: R,
        slot: SurfaceSlot,
        saved: Option<SurfaceToken>,
        recognizer: G,
    ) -> Self {
        let mut controller = SurfaceController::new(engine, rotation, slot);
        controller.acquire_token(saved.unwrap_or(SurfaceToken::NULL));
        Self {
            controller,
            normalizer: TouchNormalizer::new(recognizer),
        }
    }

    /// Registers the bind observer.
    pub fn set_observer(&mut self, observer: impl BindObserver + 'static) {
        self.controller.set_observer(observer);
    }

    /// `surfaceCreated`: binds the token to the new surface.
    pub fn surface_created(&mut self, context: &E::Context, window: &E::Window) -> bool {
        self.controller.surface_created(context, window)
    }

    /// `surfaceChanged`: the engine tracks size itself, so nothing happens.
    pub fn surface_changed(&mut self, format: i32, width: i32, height: i32) {
        _ = (format, width, height);
    }

    /// `surfaceDestroyed`.
    pub fn surface_destroyed(&mut self) {
        self.controller.surface_destroyed();
        self.normalizer.reset();
    }

    /// `onTouchEvent`.
    ///
    /// Returns `true` when the event was consumed; `false` for actions the
    /// view does not handle, which the app passes to the default handler.
    /// Consumed events are still dropped while the surface is not bound.
    ///
    /// A gesture that fell due before `event.time` is delivered first, so a
    /// timer queued behind the event on the looper loses nothing.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if let Some(due) = self.normalizer.poll(event.time) {
            self.controller.dispatch(&due);
        }
        match self.normalizer.normalize(event) {
            Some(call) => {
                self.controller.dispatch(&call);
                true
            }
            None => !matches!(event.action, MotionAction::Other(_)),
        }
    }

    /// Delivers a time-confirmed gesture, if one is due by `now`.
    pub fn on_gesture_timeout(&mut self, now: HostTime) -> bool {
        match self.normalizer.poll(now) {
            Some(call) => self.controller.dispatch(&call),
            None => false,
        }
    }

    /// Cancels all engine-side touches, e.g. on activity resume.
    pub fn clear_touches(&mut self) -> bool {
        self.normalizer.reset();
        self.controller.clear_touches()
    }

    /// Forwards committed IME text.
    pub fn on_text_input(&mut self, text: &str) -> bool {
        self.controller.text_input(text)
    }

    /// Forwards a soft-keyboard dismissal.
    pub fn on_keyboard_hidden(&mut self) -> bool {
        self.controller.keyboard_hidden()
    }

    /// Requests a redraw.
    pub fn refresh(&mut self) -> bool {
        self.controller.refresh()
    }

    /// State for `onSaveInstanceState`.
    #[must_use]
    pub fn saved_state(&self) -> Option<SavedSurface> {
        self.controller.saved_state()
    }

    /// Releases the token for good (activity finishing).
    pub fn release(&mut self) {
        self.normalizer.reset();
        self.controller.release_token();
    }

    /// The underlying controller.
    #[must_use]
    pub fn controller(&self) -> &SurfaceController<E, R> {
        &self.controller
    }

    /// The underlying controller, mutably.
    pub fn controller_mut(&mut self) -> &mut SurfaceController<E, R> {
        &mut self.controller
    }
}
