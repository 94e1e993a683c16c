// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface lifecycle state machine.
//!
//! A [`SurfaceController`] keeps exactly one [`SurfaceToken`] consistent with
//! at most one live platform drawing surface:
//!
//! ```text
//!   Created ──acquire_token──► Unbound ──surface_created (ok)──► Bound
//!      ▲                        ▲   │                            │
//!      │                        │   └──surface_created (fail)──┐ │
//!      │                        └─────────surface_destroyed────┼─┘
//!      │                                                       ▼
//!      └─ acquire_token ◄── Released ◄──release_token── (any phase)
//! ```
//!
//! Platforms deliver destroy-without-create and duplicate create callbacks,
//! so every transition is guarded and stale callbacks are absorbed as no-ops.
//! Input is only forwarded while [`Bound`](BindingState::Bound).

use alloc::boxed::Box;

use crate::engine::{Engine, ReleaseFlags};
use crate::rotation::{Rotation, RotationSource};
use crate::token::{SavedSurface, SurfaceSlot, SurfaceToken};
use crate::touch::TouchCall;
use crate::trace::{
    BindEvent, Callback, InputDroppedEvent, InputKind, ReleaseEvent, StaleCallbackEvent,
    TokenCreateFailedEvent, TokenDisposedEvent, TokenEvent, TokenOrigin, TouchDispatchEvent,
    TraceSink, Tracer,
};

/// Whether the held token is attached to a live drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingState {
    /// A token is held but no surface is attached.
    Unbound,
    /// The token is attached; input may be forwarded.
    Bound,
    /// No usable token (never acquired, or released).
    Invalid,
}

/// Fine-grained controller phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// No token acquired yet.
    #[default]
    Created,
    /// Token held, no surface attached.
    Unbound,
    /// Token attached to a live surface.
    Bound,
    /// Token released; terminal until a new token is acquired.
    Released,
}

impl LifecyclePhase {
    /// Collapses the phase to the three-valued [`BindingState`].
    #[must_use]
    pub const fn binding_state(self) -> BindingState {
        match self {
            Self::Unbound => BindingState::Unbound,
            Self::Bound => BindingState::Bound,
            Self::Created | Self::Released => BindingState::Invalid,
        }
    }
}

/// Receives the outcome of every bind.
///
/// Called synchronously from
/// [`SurfaceController::surface_created`] before it returns, so the owner can
/// chain work (a scene load, say) on a confirmed bind.
pub trait BindObserver {
    /// `bound` is `true` when the surface is ready for use.
    fn on_surface_bind(&mut self, token: SurfaceToken, bound: bool);
}

impl<F: FnMut(SurfaceToken, bool)> BindObserver for F {
    fn on_surface_bind(&mut self, token: SurfaceToken, bound: bool) {
        self(token, bound);
    }
}

/// Bind/release sequencing for one surface slot.
///
/// Generic over the [`Engine`] receiving boundary calls and the
/// [`RotationSource`] sampled at bind and unbind. All methods are
/// synchronous and expect to be called from the platform UI thread in
/// callback arrival order.
pub struct SurfaceController<E, R> {
    engine: E,
    rotation: R,
    slot: SurfaceSlot,
    token: SurfaceToken,
    phase: LifecyclePhase,
    last_rotation: Rotation,
    observer: Option<Box<dyn BindObserver>>,
    tracer: Tracer,
}

impl<E: core::fmt::Debug, R> core::fmt::Debug for SurfaceController<E, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SurfaceController")
            .field("engine", &self.engine)
            .field("slot", &self.slot)
            .field("token", &self.token)
            .field("phase", &self.phase)
            .field("last_rotation", &self.last_rotation)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl<E: Engine, R: RotationSource> SurfaceController<E, R> {
    /// Creates a controller for `slot` with no token.
    pub fn new(engine: E, rotation: R, slot: SurfaceSlot) -> Self {
        Self {
            engine,
            rotation,
            slot,
            token: SurfaceToken::NULL,
            phase: LifecyclePhase::Created,
            last_rotation: Rotation::Deg0,
            observer: None,
            tracer: Tracer::none(),
        }
    }

    /// Registers the bind observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl BindObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the bind observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Installs a trace sink. Without the `trace` feature this is a no-op.
    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) {
        _ = self.tracer.set_sink(Some(Box::new(sink)));
    }

    /// Makes sure a token is held and returns it.
    ///
    /// A non-null `prior` (from saved state) is adopted without any engine
    /// call; a null `prior` asks the engine to create one. If a token is
    /// already held it is returned unchanged.
    ///
    /// When the engine hands back a null token the phase is left as it was
    /// and [`SurfaceToken::NULL`] is returned; a later call may retry.
    pub fn acquire_token(&mut self, prior: SurfaceToken) -> SurfaceToken {
        if self.holds_token() {
            self.stale(Callback::AcquireToken);
            return self.token;
        }

        let origin = if prior.is_null() {
            let created = self.engine.create(self.slot);
            if created.is_null() {
                self.tracer
                    .token_create_failed(&TokenCreateFailedEvent { slot: self.slot });
                return SurfaceToken::NULL;
            }
            self.token = created;
            TokenOrigin::Created
        } else {
            self.token = prior;
            TokenOrigin::Restored
        };
        self.phase = LifecyclePhase::Unbound;
        self.tracer.token(&TokenEvent {
            slot: self.slot,
            token: self.token,
            origin,
        });
        self.token
    }

    /// Binds the held token to a newly created drawing surface.
    ///
    /// Returns the bind result, which is also reported to the observer before
    /// returning. Without a token nothing is called and `false` is returned;
    /// a duplicate create while bound is absorbed and reported as success.
    pub fn surface_created(&mut self, context: &E::Context, window: &E::Window) -> bool {
        match self.phase {
            LifecyclePhase::Created | LifecyclePhase::Released => {
                self.stale(Callback::SurfaceCreated);
                false
            }
            LifecyclePhase::Bound => {
                self.stale(Callback::SurfaceCreated);
                self.notify(true);
                true
            }
            LifecyclePhase::Unbound => {
                self.last_rotation = self.rotation.rotation();
                let bound = self.engine.bind(self.token, context, window);
                if bound {
                    self.phase = LifecyclePhase::Bound;
                }
                self.tracer.bind(&BindEvent {
                    token: self.token,
                    rotation: self.last_rotation,
                    bound,
                });
                self.notify(bound);
                bound
            }
        }
    }

    /// Detaches the token from a drawing surface that is going away.
    ///
    /// No-op unless bound. The release carries
    /// [`ReleaseFlags::ROTATING`] when the display rotation changed since the
    /// bind.
    pub fn surface_destroyed(&mut self) {
        if self.phase != LifecyclePhase::Bound {
            self.stale(Callback::SurfaceDestroyed);
            return;
        }

        let rotation = self.rotation.rotation();
        let flags = if rotation == self.last_rotation {
            ReleaseFlags::EMPTY
        } else {
            ReleaseFlags::ROTATING
        };
        self.engine.release(self.token, flags);
        self.last_rotation = rotation;
        self.phase = LifecyclePhase::Unbound;
        self.tracer.release(&ReleaseEvent {
            token: self.token,
            flags,
            rotation,
        });
    }

    /// Gives up the token for good.
    ///
    /// A still-bound surface is released first as a genuine teardown, then
    /// the engine disposes the token. Repeated calls do nothing.
    pub fn release_token(&mut self) {
        if !self.holds_token() {
            self.stale(Callback::ReleaseToken);
            return;
        }

        if self.phase == LifecyclePhase::Bound {
            self.engine.release(self.token, ReleaseFlags::EMPTY);
            self.tracer.release(&ReleaseEvent {
                token: self.token,
                flags: ReleaseFlags::EMPTY,
                rotation: self.last_rotation,
            });
        }
        self.engine.dispose(self.token);
        self.tracer.token_disposed(&TokenDisposedEvent { token: self.token });
        self.token = SurfaceToken::NULL;
        self.phase = LifecyclePhase::Released;
    }

    /// Forwards a normalized touch call. Returns whether it reached the engine.
    pub fn dispatch(&mut self, call: &TouchCall) -> bool {
        let kind = InputKind::from(call);
        if !self.gate(kind) {
            return false;
        }
        call.deliver(&mut self.engine, self.token);
        self.tracer.touch_dispatch(&TouchDispatchEvent {
            token: self.token,
            kind,
            count: call.batch().map_or(0, |batch| batch.len()),
        });
        true
    }

    /// Cancels every tracked pointer, used when the host resumes.
    pub fn clear_touches(&mut self) -> bool {
        self.dispatch(&TouchCall::Cancel)
    }

    /// Forwards committed text.
    pub fn text_input(&mut self, text: &str) -> bool {
        if !self.gate(InputKind::TextInput) {
            return false;
        }
        self.engine.text_input(self.token, text);
        self.dispatched(InputKind::TextInput);
        true
    }

    /// Forwards a keyboard-dismissed notification.
    ///
    /// Unlike other input this only needs a live token, not a bound surface.
    pub fn keyboard_hidden(&mut self) -> bool {
        if !self.holds_token() {
            self.tracer.input_dropped(&InputDroppedEvent {
                kind: InputKind::KeyboardHidden,
                phase: self.phase,
            });
            return false;
        }
        self.engine.keyboard_hidden(self.token);
        self.dispatched(InputKind::KeyboardHidden);
        true
    }

    /// Requests a redraw of the bound surface.
    pub fn refresh(&mut self) -> bool {
        if !self.gate(InputKind::Refresh) {
            return false;
        }
        self.engine.refresh(self.token);
        self.dispatched(InputKind::Refresh);
        true
    }

    /// The held token, or [`SurfaceToken::NULL`].
    #[must_use]
    pub fn token(&self) -> SurfaceToken {
        self.token
    }

    /// The slot this controller manages.
    #[must_use]
    pub fn slot(&self) -> SurfaceSlot {
        self.slot
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Current binding state.
    #[must_use]
    pub fn binding_state(&self) -> BindingState {
        self.phase.binding_state()
    }

    /// Returns `true` while input may be forwarded.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.phase == LifecyclePhase::Bound
    }

    /// Rotation sampled at the latest bind or unbind.
    #[must_use]
    pub fn last_rotation(&self) -> Rotation {
        self.last_rotation
    }

    /// State to persist across a process save/restore, if a token is held.
    #[must_use]
    pub fn saved_state(&self) -> Option<SavedSurface> {
        self.holds_token().then_some(SavedSurface {
            slot: self.slot,
            token: self.token,
        })
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn holds_token(&self) -> bool {
        matches!(self.phase, LifecyclePhase::Unbound | LifecyclePhase::Bound)
    }

    fn notify(&mut self, bound: bool) {
        if let Some(observer) = &mut self.observer {
            observer.on_surface_bind(self.token, bound);
        }
    }

    fn gate(&mut self, kind: InputKind) -> bool {
        if self.is_bound() {
            return true;
        }
        self.tracer.input_dropped(&InputDroppedEvent {
            kind,
            phase: self.phase,
        });
        false
    }

    fn dispatched(&mut self, kind: InputKind) {
        self.tracer.touch_dispatch(&TouchDispatchEvent {
            token: self.token,
            kind,
            count: 0,
        });
    }

    fn stale(&mut self, callback: Callback) {
        self.tracer.stale_callback(&StaleCallbackEvent {
            token: self.token,
            callback,
            phase: self.phase,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::testing::{Call, RecordingEngine};
    use crate::touch::{PointerBatch, PointerId};

    const SLOT: SurfaceSlot = SurfaceSlot(3);

    /// Rotation the test can change between callbacks.
    struct SharedRotation(Rc<Cell<Rotation>>);

    impl RotationSource for SharedRotation {
        fn rotation(&self) -> Rotation {
            self.0.get()
        }
    }

    type Controller = SurfaceController<RecordingEngine, SharedRotation>;

    fn controller() -> (Controller, Rc<Cell<Rotation>>) {
        let rotation = Rc::new(Cell::new(Rotation::Deg0));
        let source = SharedRotation(Rc::clone(&rotation));
        let controller = SurfaceController::new(RecordingEngine::default(), source, SLOT);
        (controller, rotation)
    }

    fn bound() -> (Controller, Rc<Cell<Rotation>>, SurfaceToken) {
        let (mut c, rotation) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        assert!(c.surface_created(&(), &()));
        c.engine_mut().take_calls();
        (c, rotation, token)
    }

    fn calls(c: &mut Controller) -> Vec<Call> {
        c.engine_mut().take_calls()
    }

    #[test]
    fn fresh_controller_is_invalid() {
        let (c, _) = controller();
        assert_eq!(c.phase(), LifecyclePhase::Created);
        assert_eq!(c.binding_state(), BindingState::Invalid);
        assert!(c.token().is_null());
        assert_eq!(c.saved_state(), None);
    }

    #[test]
    fn null_prior_creates_token() {
        let (mut c, _) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        assert!(!token.is_null());
        assert_eq!(calls(&mut c), vec![Call::Create(SLOT)]);
        assert_eq!(c.binding_state(), BindingState::Unbound);
    }

    #[test]
    fn null_create_leaves_controller_without_token() {
        let (mut c, _) = controller();
        c.engine_mut().fail_next_create();
        assert!(c.acquire_token(SurfaceToken::NULL).is_null());
        assert_eq!(c.phase(), LifecyclePhase::Created);
        assert_eq!(c.saved_state(), None);

        assert!(!c.surface_created(&(), &()), "nothing to bind");
        let batch = PointerBatch::single(1, 1, PointerId(0));
        assert!(!c.dispatch(&TouchCall::Down(batch)));
        assert!(!c.keyboard_hidden());
        assert_eq!(calls(&mut c), vec![Call::Create(SLOT)]);

        let token = c.acquire_token(SurfaceToken::NULL);
        assert!(!token.is_null(), "retry succeeds");
        assert!(c.surface_created(&(), &()));
        assert_eq!(calls(&mut c), vec![Call::Create(SLOT), Call::Bind(token)]);
    }

    #[test]
    fn null_create_after_release_stays_released() {
        let (mut c, _, _) = bound();
        c.release_token();
        c.engine_mut().fail_next_create();
        assert!(c.acquire_token(SurfaceToken::NULL).is_null());
        assert_eq!(c.phase(), LifecyclePhase::Released);
        assert_eq!(c.binding_state(), BindingState::Invalid);
    }

    #[test]
    fn saved_prior_is_adopted_without_engine_call() {
        let (mut c, _) = controller();
        let prior = SurfaceToken::from_raw(0xdead);
        assert_eq!(c.acquire_token(prior), prior);
        assert!(calls(&mut c).is_empty());
        assert_eq!(
            c.saved_state(),
            Some(SavedSurface {
                slot: SLOT,
                token: prior
            })
        );
    }

    #[test]
    fn acquire_while_holding_returns_held_token() {
        let (mut c, _) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        assert_eq!(c.acquire_token(SurfaceToken::NULL), token);
        assert_eq!(c.acquire_token(SurfaceToken::from_raw(9)), token);
        assert_eq!(calls(&mut c), vec![Call::Create(SLOT)]);
    }

    #[test]
    fn create_binds_and_notifies_before_returning() {
        let (mut c, _) = controller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        c.set_observer(move |token: SurfaceToken, bound: bool| {
            log.borrow_mut().push((token, bound));
        });

        let token = c.acquire_token(SurfaceToken::NULL);
        assert!(c.surface_created(&(), &()));
        assert_eq!(c.binding_state(), BindingState::Bound);
        assert_eq!(*seen.borrow(), vec![(token, true)]);
        assert_eq!(calls(&mut c), vec![Call::Create(SLOT), Call::Bind(token)]);
    }

    #[test]
    fn failed_bind_is_reported_to_observer() {
        let (mut c, _) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        let seen = Rc::new(Cell::new(None));
        let log = Rc::clone(&seen);
        c.set_observer(move |t: SurfaceToken, bound: bool| log.set(Some((t, bound))));
        c.engine_mut().fail_next_bind();

        assert!(!c.surface_created(&(), &()));
        assert_eq!(seen.get(), Some((token, false)));
        assert_eq!(c.binding_state(), BindingState::Unbound);
    }

    #[test]
    fn failed_bind_drops_input_until_retry_succeeds() {
        let (mut c, _) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        c.engine_mut().fail_next_bind();
        assert!(!c.surface_created(&(), &()));
        calls(&mut c);

        assert!(!c.dispatch(&TouchCall::Down(PointerBatch::single(1, 1, PointerId(0)))));
        assert!(!c.text_input("a"));
        assert!(calls(&mut c).is_empty());

        assert!(c.surface_created(&(), &()));
        assert_eq!(calls(&mut c), vec![Call::Bind(token)]);
        assert!(c.text_input("a"));
    }

    #[test]
    fn create_without_token_calls_nothing() {
        let (mut c, _) = controller();
        assert!(!c.surface_created(&(), &()));
        assert!(calls(&mut c).is_empty());
        assert_eq!(c.phase(), LifecyclePhase::Created);
    }

    #[test]
    fn duplicate_create_is_absorbed() {
        let (mut c, _, token) = bound();
        let seen = Rc::new(Cell::new(0_u32));
        let count = Rc::clone(&seen);
        c.set_observer(move |_: SurfaceToken, bound: bool| {
            assert!(bound);
            count.set(count.get() + 1);
        });

        assert!(c.surface_created(&(), &()));
        assert!(calls(&mut c).is_empty());
        assert_eq!(seen.get(), 1);
        assert_eq!(c.token(), token);
    }

    #[test]
    fn destroy_releases_and_unbinds() {
        let (mut c, _, token) = bound();
        c.surface_destroyed();
        assert_eq!(calls(&mut c), vec![Call::Release(token, ReleaseFlags::EMPTY)]);
        assert_eq!(c.binding_state(), BindingState::Unbound);
    }

    #[test]
    fn destroy_while_unbound_makes_no_calls() {
        let (mut c, _, _) = bound();
        c.surface_destroyed();
        calls(&mut c);

        c.surface_destroyed();
        c.surface_destroyed();
        assert!(calls(&mut c).is_empty());
        assert_eq!(c.binding_state(), BindingState::Unbound);
    }

    #[test]
    fn destroy_before_any_token_makes_no_calls() {
        let (mut c, _) = controller();
        c.surface_destroyed();
        assert!(calls(&mut c).is_empty());
        assert_eq!(c.phase(), LifecyclePhase::Created);
    }

    #[test]
    fn rotation_change_sets_rotating_flag() {
        let (mut c, rotation, token) = bound();
        rotation.set(Rotation::Deg90);
        c.surface_destroyed();
        assert_eq!(calls(&mut c), vec![Call::Release(token, ReleaseFlags::ROTATING)]);
        assert_eq!(c.last_rotation(), Rotation::Deg90);

        assert!(c.surface_created(&(), &()));
        c.surface_destroyed();
        assert_eq!(
            calls(&mut c),
            vec![Call::Bind(token), Call::Release(token, ReleaseFlags::EMPTY)]
        );
    }

    #[test]
    fn rotating_flag_compares_against_bind_time_rotation() {
        let (mut c, rotation) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        rotation.set(Rotation::Deg270);
        assert!(c.surface_created(&(), &()));
        rotation.set(Rotation::Deg0);
        rotation.set(Rotation::Deg270);
        c.surface_destroyed();
        assert_eq!(
            calls(&mut c).last(),
            Some(&Call::Release(token, ReleaseFlags::EMPTY))
        );
    }

    #[test]
    fn bound_never_repeats_without_unbind() {
        let (mut c, rotation) = controller();
        c.acquire_token(SurfaceToken::NULL);
        calls(&mut c);
        let mut previous = c.binding_state();
        for step in 0..24_u8 {
            if step % 3 == 0 {
                rotation.set(Rotation::from_quarter_turns(step / 3));
                c.surface_destroyed();
            } else {
                c.surface_created(&(), &());
            }
            let now = c.binding_state();
            assert_ne!(now, BindingState::Invalid, "step {step}");
            if previous == BindingState::Bound && now == BindingState::Unbound {
                assert_eq!(step % 3, 0, "only destroy may unbind");
            }
            previous = now;
        }

        // Every bind after the first is preceded by a release.
        let mut bound = false;
        let mut binds = 0;
        let mut releases = 0;
        for call in calls(&mut c) {
            match call {
                Call::Bind(_) => {
                    assert!(!bound, "bound twice without an intervening unbind");
                    bound = true;
                    binds += 1;
                }
                Call::Release(..) => {
                    assert!(bound, "release without a bind");
                    bound = false;
                    releases += 1;
                }
                other => panic!("unexpected call {other:?}"),
            }
        }
        assert_eq!(binds, 8);
        assert_eq!(releases, 7);
    }

    #[test]
    fn release_token_tears_down_bound_surface() {
        let (mut c, _, token) = bound();
        c.release_token();
        assert_eq!(
            calls(&mut c),
            vec![Call::Release(token, ReleaseFlags::EMPTY), Call::Dispose(token)]
        );
        assert_eq!(c.phase(), LifecyclePhase::Released);
        assert_eq!(c.binding_state(), BindingState::Invalid);
        assert!(c.token().is_null());
    }

    #[test]
    fn release_token_is_idempotent() {
        let (mut c, _) = controller();
        let token = c.acquire_token(SurfaceToken::NULL);
        c.release_token();
        c.release_token();
        assert_eq!(calls(&mut c), vec![Call::Create(SLOT), Call::Dispose(token)]);
    }

    #[test]
    fn acquire_after_release_creates_fresh_token() {
        let (mut c, _) = controller();
        let first = c.acquire_token(SurfaceToken::NULL);
        c.release_token();
        let second = c.acquire_token(SurfaceToken::NULL);
        assert_ne!(first, second);
        assert_eq!(
            calls(&mut c),
            vec![Call::Create(SLOT), Call::Dispose(first), Call::Create(SLOT)]
        );
    }

    #[test]
    fn input_is_forwarded_only_while_bound() {
        let (mut c, _, token) = bound();
        let batch = PointerBatch::single(4, 5, PointerId(1));
        assert!(c.dispatch(&TouchCall::Move(batch.clone())));
        assert!(c.dispatch(&TouchCall::SingleTap { x: 4, y: 5 }));
        assert!(c.text_input("hi"));
        assert!(c.refresh());
        assert!(c.clear_touches());
        assert_eq!(
            calls(&mut c),
            vec![
                Call::TouchMove(token, batch.clone()),
                Call::SingleTap(token, 4, 5),
                Call::TextInput(token, "hi".into()),
                Call::Refresh(token),
                Call::TouchesCancel(token),
            ]
        );

        c.surface_destroyed();
        calls(&mut c);
        assert!(!c.dispatch(&TouchCall::Move(batch)));
        assert!(!c.text_input("hi"));
        assert!(!c.refresh());
        assert!(!c.clear_touches());
        assert!(calls(&mut c).is_empty());
    }

    #[test]
    fn keyboard_hidden_needs_only_a_token() {
        let (mut c, _) = controller();
        assert!(!c.keyboard_hidden());

        let token = c.acquire_token(SurfaceToken::NULL);
        calls(&mut c);
        assert!(c.keyboard_hidden());
        assert_eq!(calls(&mut c), vec![Call::KeyboardHidden(token)]);

        c.release_token();
        calls(&mut c);
        assert!(!c.keyboard_hidden());
        assert!(calls(&mut c).is_empty());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_sink_sees_stale_destroy() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Stale(Vec<Callback>);
        impl TraceSink for Stale {
            fn on_stale_callback(&mut self, e: &StaleCallbackEvent) {
                self.0.push(e.callback);
            }
        }

        let sink = Rc::new(RefCell::new(Stale::default()));
        let (mut c, _) = controller();
        c.set_trace_sink(Rc::clone(&sink));
        c.surface_destroyed();
        c.release_token();
        assert_eq!(
            sink.borrow().0,
            vec![Callback::SurfaceDestroyed, Callback::ReleaseToken]
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_sink_sees_failed_create() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Failed(Vec<SurfaceSlot>);
        impl TraceSink for Failed {
            fn on_token_create_failed(&mut self, e: &TokenCreateFailedEvent) {
                self.0.push(e.slot);
            }
        }

        let sink = Rc::new(RefCell::new(Failed::default()));
        let (mut c, _) = controller();
        c.set_trace_sink(Rc::clone(&sink));
        c.engine_mut().fail_next_create();
        c.acquire_token(SurfaceToken::NULL);
        assert_eq!(sink.borrow().0, vec![SLOT]);
    }
}
