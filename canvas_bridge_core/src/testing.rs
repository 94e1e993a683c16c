// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the unit tests.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::engine::{Engine, ReleaseFlags};
use crate::token::{SurfaceSlot, SurfaceToken};
use crate::touch::{PointerBatch, PointerId};

/// One recorded boundary call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Create(SurfaceSlot),
    Bind(SurfaceToken),
    Release(SurfaceToken, ReleaseFlags),
    TouchDown(SurfaceToken, PointerBatch),
    TouchMove(SurfaceToken, PointerBatch),
    TouchUp(SurfaceToken, PointerBatch),
    TouchesCancel(SurfaceToken),
    SingleTap(SurfaceToken, i32, i32),
    DoubleTap(SurfaceToken, i32, i32, PointerId),
    TextInput(SurfaceToken, String),
    KeyboardHidden(SurfaceToken),
    Refresh(SurfaceToken),
    Dispose(SurfaceToken),
}

/// Engine that logs every call and hands out sequential tokens.
///
/// Binds succeed unless a scripted result is queued with
/// [`fail_next_bind`](Self::fail_next_bind); creates succeed unless
/// [`fail_next_create`](Self::fail_next_create) was called.
#[derive(Debug)]
pub(crate) struct RecordingEngine {
    pub(crate) calls: Vec<Call>,
    next_token: u64,
    bind_results: VecDeque<bool>,
    create_results: VecDeque<bool>,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            next_token: 0x100,
            bind_results: VecDeque::new(),
            create_results: VecDeque::new(),
        }
    }
}

impl RecordingEngine {
    pub(crate) fn fail_next_bind(&mut self) {
        self.bind_results.push_back(false);
    }

    pub(crate) fn fail_next_create(&mut self) {
        self.create_results.push_back(false);
    }

    pub(crate) fn take_calls(&mut self) -> Vec<Call> {
        core::mem::take(&mut self.calls)
    }
}

impl Engine for RecordingEngine {
    type Context = ();
    type Window = ();

    fn create(&mut self, slot: SurfaceSlot) -> SurfaceToken {
        self.calls.push(Call::Create(slot));
        if !self.create_results.pop_front().unwrap_or(true) {
            return SurfaceToken::NULL;
        }
        let token = SurfaceToken::from_raw(self.next_token);
        self.next_token += 1;
        token
    }

    fn bind(&mut self, token: SurfaceToken, _context: &(), _window: &()) -> bool {
        self.calls.push(Call::Bind(token));
        self.bind_results.pop_front().unwrap_or(true)
    }

    fn release(&mut self, token: SurfaceToken, flags: ReleaseFlags) {
        self.calls.push(Call::Release(token, flags));
    }

    fn touch_down(&mut self, token: SurfaceToken, batch: &PointerBatch) {
        self.calls.push(Call::TouchDown(token, batch.clone()));
    }

    fn touch_move(&mut self, token: SurfaceToken, batch: &PointerBatch) {
        self.calls.push(Call::TouchMove(token, batch.clone()));
    }

    fn touch_up(&mut self, token: SurfaceToken, batch: &PointerBatch) {
        self.calls.push(Call::TouchUp(token, batch.clone()));
    }

    fn touches_cancel(&mut self, token: SurfaceToken) {
        self.calls.push(Call::TouchesCancel(token));
    }

    fn single_tap(&mut self, token: SurfaceToken, x: i32, y: i32) {
        self.calls.push(Call::SingleTap(token, x, y));
    }

    fn double_tap(&mut self, token: SurfaceToken, x: i32, y: i32, id: PointerId) {
        self.calls.push(Call::DoubleTap(token, x, y, id));
    }

    fn text_input(&mut self, token: SurfaceToken, text: &str) {
        self.calls.push(Call::TextInput(token, text.into()));
    }

    fn keyboard_hidden(&mut self, token: SurfaceToken) {
        self.calls.push(Call::KeyboardHidden(token));
    }

    fn refresh(&mut self, token: SurfaceToken) {
        self.calls.push(Call::Refresh(token));
    }

    fn dispose(&mut self, token: SurfaceToken) {
        self.calls.push(Call::Dispose(token));
    }
}
