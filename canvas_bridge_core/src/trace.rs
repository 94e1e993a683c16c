// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for surface lifecycle and input forwarding.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`SurfaceController`](crate::lifecycle::SurfaceController) calls at each
//! boundary crossing. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed [`TraceSink`]. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing and installing a sink
//! just drops it. When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Sinks that must be inspected after installation can be shared through
//! `Rc<RefCell<_>>`, which implements [`TraceSink`] by forwarding.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::engine::ReleaseFlags;
use crate::lifecycle::LifecyclePhase;
use crate::rotation::Rotation;
use crate::token::{SurfaceSlot, SurfaceToken};
use crate::touch::TouchCall;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a controller came to hold its token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenOrigin {
    /// Freshly allocated by the engine.
    Created,
    /// Adopted from saved state.
    Restored,
}

/// A lifecycle callback the controller can receive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Callback {
    /// Token acquisition.
    AcquireToken,
    /// The drawing surface became available.
    SurfaceCreated,
    /// The drawing surface is going away.
    SurfaceDestroyed,
    /// Token release.
    ReleaseToken,
}

/// Kind of input forwarded to (or withheld from) the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pointer(s) down.
    TouchDown,
    /// Pointer(s) moved.
    TouchMove,
    /// Pointer(s) up.
    TouchUp,
    /// All pointers cancelled.
    TouchCancel,
    /// Single tap.
    SingleTap,
    /// Double tap.
    DoubleTap,
    /// Committed text.
    TextInput,
    /// Soft keyboard dismissed.
    KeyboardHidden,
    /// Redraw request.
    Refresh,
}

impl From<&TouchCall> for InputKind {
    fn from(call: &TouchCall) -> Self {
        match call {
            TouchCall::Down(_) => Self::TouchDown,
            TouchCall::Move(_) => Self::TouchMove,
            TouchCall::Up(_) => Self::TouchUp,
            TouchCall::Cancel => Self::TouchCancel,
            TouchCall::SingleTap { .. } => Self::SingleTap,
            TouchCall::DoubleTap { .. } => Self::DoubleTap,
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a controller starts holding a token.
#[derive(Clone, Copy, Debug)]
pub struct TokenEvent {
    /// Slot the token belongs to.
    pub slot: SurfaceSlot,
    /// The token.
    pub token: SurfaceToken,
    /// Whether the token was created or restored.
    pub origin: TokenOrigin,
}

/// Emitted when the engine returns a null token from `create`.
#[derive(Clone, Copy, Debug)]
pub struct TokenCreateFailedEvent {
    /// Slot the token was requested for.
    pub slot: SurfaceSlot,
}

/// Emitted after every bind attempt.
#[derive(Clone, Copy, Debug)]
pub struct BindEvent {
    /// Token being bound.
    pub token: SurfaceToken,
    /// Rotation sampled at bind time.
    pub rotation: Rotation,
    /// Whether the engine accepted the surface.
    pub bound: bool,
}

/// Emitted when a bound surface is released.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseEvent {
    /// Token being released.
    pub token: SurfaceToken,
    /// Flags passed to the engine.
    pub flags: ReleaseFlags,
    /// Rotation sampled at release time.
    pub rotation: Rotation,
}

/// Emitted when a token is disposed.
#[derive(Clone, Copy, Debug)]
pub struct TokenDisposedEvent {
    /// The disposed token.
    pub token: SurfaceToken,
}

/// Emitted when a lifecycle callback arrives in a phase where it does
/// nothing (destroy without create, double release, …).
#[derive(Clone, Copy, Debug)]
pub struct StaleCallbackEvent {
    /// Token held at the time, possibly null.
    pub token: SurfaceToken,
    /// Which callback was ignored.
    pub callback: Callback,
    /// Phase the controller was in.
    pub phase: LifecyclePhase,
}

/// Emitted when input is forwarded to the engine.
#[derive(Clone, Copy, Debug)]
pub struct TouchDispatchEvent {
    /// Receiving token.
    pub token: SurfaceToken,
    /// Kind of call.
    pub kind: InputKind,
    /// Number of pointers carried; zero for calls without a batch.
    pub count: usize,
}

/// Emitted when input is withheld because the surface is not usable.
#[derive(Clone, Copy, Debug)]
pub struct InputDroppedEvent {
    /// Kind of input dropped.
    pub kind: InputKind,
    /// Phase the controller was in.
    pub phase: LifecyclePhase,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a surface controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a token is created or restored.
    fn on_token(&mut self, e: &TokenEvent) {
        _ = e;
    }

    /// Called when the engine fails to create a token.
    fn on_token_create_failed(&mut self, e: &TokenCreateFailedEvent) {
        _ = e;
    }

    /// Called after a bind attempt.
    fn on_bind(&mut self, e: &BindEvent) {
        _ = e;
    }

    /// Called after a release.
    fn on_release(&mut self, e: &ReleaseEvent) {
        _ = e;
    }

    /// Called after a token is disposed.
    fn on_token_disposed(&mut self, e: &TokenDisposedEvent) {
        _ = e;
    }

    /// Called when a lifecycle callback was ignored.
    fn on_stale_callback(&mut self, e: &StaleCallbackEvent) {
        _ = e;
    }

    /// Called when input reaches the engine.
    fn on_touch_dispatch(&mut self, e: &TouchDispatchEvent) {
        _ = e;
    }

    /// Called when input is dropped.
    fn on_input_dropped(&mut self, e: &InputDroppedEvent) {
        _ = e;
    }
}

impl<T: TraceSink + ?Sized> TraceSink for Rc<RefCell<T>> {
    fn on_token(&mut self, e: &TokenEvent) {
        self.borrow_mut().on_token(e);
    }

    fn on_token_create_failed(&mut self, e: &TokenCreateFailedEvent) {
        self.borrow_mut().on_token_create_failed(e);
    }

    fn on_bind(&mut self, e: &BindEvent) {
        self.borrow_mut().on_bind(e);
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        self.borrow_mut().on_release(e);
    }

    fn on_token_disposed(&mut self, e: &TokenDisposedEvent) {
        self.borrow_mut().on_token_disposed(e);
    }

    fn on_stale_callback(&mut self, e: &StaleCallbackEvent) {
        self.borrow_mut().on_stale_callback(e);
    }

    fn on_touch_dispatch(&mut self, e: &TouchDispatchEvent) {
        self.borrow_mut().on_touch_dispatch(e);
    }

    fn on_input_dropped(&mut self, e: &InputDroppedEvent) {
        self.borrow_mut().on_input_dropped(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! emit {
    ($(#[$doc:meta])* $name:ident, $event:ty, $method:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        let mut tracer = Self::none();
        tracer.set_sink(Some(sink));
        tracer
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Replaces the sink, returning the previous one.
    ///
    /// Without the `trace` feature the new sink is dropped and `None` is
    /// returned.
    pub fn set_sink(&mut self, sink: Option<Box<dyn TraceSink>>) -> Option<Box<dyn TraceSink>> {
        #[cfg(feature = "trace")]
        {
            core::mem::replace(&mut self.sink, sink)
        }
        #[cfg(not(feature = "trace"))]
        {
            drop(sink);
            None
        }
    }

    emit!(
        /// Emits a [`TokenEvent`].
        token,
        TokenEvent,
        on_token
    );
    emit!(
        /// Emits a [`TokenCreateFailedEvent`].
        token_create_failed,
        TokenCreateFailedEvent,
        on_token_create_failed
    );
    emit!(
        /// Emits a [`BindEvent`].
        bind,
        BindEvent,
        on_bind
    );
    emit!(
        /// Emits a [`ReleaseEvent`].
        release,
        ReleaseEvent,
        on_release
    );
    emit!(
        /// Emits a [`TokenDisposedEvent`].
        token_disposed,
        TokenDisposedEvent,
        on_token_disposed
    );
    emit!(
        /// Emits a [`StaleCallbackEvent`].
        stale_callback,
        StaleCallbackEvent,
        on_stale_callback
    );
    emit!(
        /// Emits a [`TouchDispatchEvent`].
        touch_dispatch,
        TouchDispatchEvent,
        on_touch_dispatch
    );
    emit!(
        /// Emits an [`InputDroppedEvent`].
        input_dropped,
        InputDroppedEvent,
        on_input_dropped
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
