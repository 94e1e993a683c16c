// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use canvas_bridge_core::trace::{
    BindEvent, Callback, InputDroppedEvent, InputKind, ReleaseEvent, StaleCallbackEvent,
    TokenCreateFailedEvent, TokenDisposedEvent, TokenEvent, TokenOrigin, TouchDispatchEvent,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub(crate) fn callback_name(callback: Callback) -> &'static str {
    match callback {
        Callback::AcquireToken => "acquire_token",
        Callback::SurfaceCreated => "surface_created",
        Callback::SurfaceDestroyed => "surface_destroyed",
        Callback::ReleaseToken => "release_token",
    }
}

pub(crate) fn input_name(kind: InputKind) -> &'static str {
    match kind {
        InputKind::TouchDown => "down",
        InputKind::TouchMove => "move",
        InputKind::TouchUp => "up",
        InputKind::TouchCancel => "cancel",
        InputKind::SingleTap => "tap",
        InputKind::DoubleTap => "double_tap",
        InputKind::TextInput => "text",
        InputKind::KeyboardHidden => "keyboard_hidden",
        InputKind::Refresh => "refresh",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_token(&mut self, e: &TokenEvent) {
        let origin = match e.origin {
            TokenOrigin::Created => "created",
            TokenOrigin::Restored => "restored",
        };
        let _ = writeln!(
            self.writer,
            "[token] slot={} token={:#x} {origin}",
            e.slot.0,
            e.token.raw(),
        );
    }

    fn on_token_create_failed(&mut self, e: &TokenCreateFailedEvent) {
        let _ = writeln!(self.writer, "[token] slot={} create FAILED", e.slot.0);
    }

    fn on_bind(&mut self, e: &BindEvent) {
        let result = if e.bound { "ok" } else { "FAILED" };
        let _ = writeln!(
            self.writer,
            "[bind] token={:#x} rotation={}° {result}",
            e.token.raw(),
            u32::from(e.rotation.quarter_turns()) * 90,
        );
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        let _ = writeln!(
            self.writer,
            "[release] token={:#x} rotation={}° flags={:?}",
            e.token.raw(),
            u32::from(e.rotation.quarter_turns()) * 90,
            e.flags,
        );
    }

    fn on_token_disposed(&mut self, e: &TokenDisposedEvent) {
        let _ = writeln!(self.writer, "[dispose] token={:#x}", e.token.raw());
    }

    fn on_stale_callback(&mut self, e: &StaleCallbackEvent) {
        let _ = writeln!(
            self.writer,
            "[stale] {} ignored in {:?} token={:#x}",
            callback_name(e.callback),
            e.phase,
            e.token.raw(),
        );
    }

    fn on_touch_dispatch(&mut self, e: &TouchDispatchEvent) {
        let _ = writeln!(
            self.writer,
            "[input] {} count={} token={:#x}",
            input_name(e.kind),
            e.count,
            e.token.raw(),
        );
    }

    fn on_input_dropped(&mut self, e: &InputDroppedEvent) {
        let _ = writeln!(
            self.writer,
            "[drop] {} in {:?}",
            input_name(e.kind),
            e.phase,
        );
    }
}
