// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] collects controller events as they happen and
//! [`ChromeTraceSink::export`] writes them as [Chrome Trace Event
//! Format][spec] JSON. Bound periods become duration slices; everything else
//! is an instant event.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};
use std::time::Instant;

use serde_json::{Value, json};

use canvas_bridge_core::trace::{
    BindEvent, InputDroppedEvent, ReleaseEvent, StaleCallbackEvent, TokenCreateFailedEvent,
    TokenDisposedEvent, TokenEvent, TokenOrigin, TouchDispatchEvent, TraceSink,
};

use crate::pretty::{callback_name, input_name};

/// Collects trace events for Chrome Trace Event Format export.
///
/// Timestamps are microseconds since the sink was created.
#[derive(Debug)]
pub struct ChromeTraceSink {
    origin: Instant,
    events: Vec<Value>,
}

impl Default for ChromeTraceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromeTraceSink {
    /// Creates an empty sink whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            events: Vec::new(),
        }
    }

    /// The collected events, in arrival order.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a JSON array.
    ///
    /// The output is suitable for loading into `chrome://tracing` or
    /// [Perfetto](https://ui.perfetto.dev/).
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn now_us(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000_000.0
    }

    fn push(&mut self, ph: &str, name: &str, cat: &str, token: u64, args: Value) {
        let mut event = json!({
            "ph": ph,
            "name": name,
            "cat": cat,
            "ts": self.now_us(),
            "pid": 0,
            "tid": token,
            "args": args,
        });
        if ph == "i" {
            event["s"] = json!("t");
        }
        self.events.push(event);
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_token(&mut self, e: &TokenEvent) {
        let origin = match e.origin {
            TokenOrigin::Created => "created",
            TokenOrigin::Restored => "restored",
        };
        self.push(
            "i",
            "Token",
            "Lifecycle",
            e.token.raw(),
            json!({ "slot": e.slot.0, "origin": origin }),
        );
    }

    fn on_token_create_failed(&mut self, e: &TokenCreateFailedEvent) {
        self.push(
            "i",
            "TokenCreateFailed",
            "Lifecycle",
            0,
            json!({ "slot": e.slot.0 }),
        );
    }

    fn on_bind(&mut self, e: &BindEvent) {
        let rotation = e.rotation.quarter_turns();
        if e.bound {
            self.push(
                "B",
                "Bound",
                "Lifecycle",
                e.token.raw(),
                json!({ "quarter_turns": rotation }),
            );
        } else {
            self.push(
                "i",
                "BindFailed",
                "Lifecycle",
                e.token.raw(),
                json!({ "quarter_turns": rotation }),
            );
        }
    }

    fn on_release(&mut self, e: &ReleaseEvent) {
        self.push(
            "E",
            "Bound",
            "Lifecycle",
            e.token.raw(),
            json!({
                "flags": e.flags.bits(),
                "quarter_turns": e.rotation.quarter_turns(),
            }),
        );
    }

    fn on_token_disposed(&mut self, e: &TokenDisposedEvent) {
        self.push("i", "Dispose", "Lifecycle", e.token.raw(), json!({}));
    }

    fn on_stale_callback(&mut self, e: &StaleCallbackEvent) {
        self.push(
            "i",
            "StaleCallback",
            "Lifecycle",
            e.token.raw(),
            json!({
                "callback": callback_name(e.callback),
                "phase": format!("{:?}", e.phase),
            }),
        );
    }

    fn on_touch_dispatch(&mut self, e: &TouchDispatchEvent) {
        self.push(
            "i",
            input_name(e.kind),
            "Input",
            e.token.raw(),
            json!({ "count": e.count }),
        );
    }

    fn on_input_dropped(&mut self, e: &InputDroppedEvent) {
        self.push(
            "i",
            "InputDropped",
            "Input",
            0,
            json!({
                "kind": input_name(e.kind),
                "phase": format!("{:?}", e.phase),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_bridge_core::engine::ReleaseFlags;
    use canvas_bridge_core::rotation::Rotation;
    use canvas_bridge_core::token::{SurfaceSlot, SurfaceToken};

    const TOKEN: SurfaceToken = SurfaceToken::from_raw(0x100);

    #[test]
    fn export_produces_valid_json() {
        let mut sink = ChromeTraceSink::new();
        sink.on_token(&TokenEvent {
            slot: SurfaceSlot(0),
            token: TOKEN,
            origin: TokenOrigin::Created,
        });
        sink.on_bind(&BindEvent {
            token: TOKEN,
            rotation: Rotation::Deg0,
            bound: true,
        });
        sink.on_release(&ReleaseEvent {
            token: TOKEN,
            flags: ReleaseFlags::ROTATING,
            rotation: Rotation::Deg90,
        });

        let mut out = Vec::new();
        sink.export(&mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Token");
        assert_eq!(parsed[0]["args"]["origin"], "created");

        // Bound slice opens on bind and closes on release.
        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "Bound");
        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["args"]["flags"], 1);
        assert_eq!(parsed[2]["tid"], 0x100);
    }

    #[test]
    fn failed_bind_is_an_instant() {
        let mut sink = ChromeTraceSink::default();
        sink.on_bind(&BindEvent {
            token: TOKEN,
            rotation: Rotation::Deg270,
            bound: false,
        });
        let event = &sink.events()[0];
        assert_eq!(event["ph"], "i");
        assert_eq!(event["name"], "BindFailed");
        assert_eq!(event["s"], "t");
        assert_eq!(event["args"]["quarter_turns"], 3);
    }

    #[test]
    fn failed_create_is_an_instant_on_thread_zero() {
        let mut sink = ChromeTraceSink::new();
        sink.on_token_create_failed(&TokenCreateFailedEvent {
            slot: SurfaceSlot(2),
        });
        let event = &sink.events()[0];
        assert_eq!(event["ph"], "i");
        assert_eq!(event["name"], "TokenCreateFailed");
        assert_eq!(event["tid"], 0);
        assert_eq!(event["args"]["slot"], 2);
    }

    #[test]
    fn export_empty_trace() {
        let mut out = Vec::new();
        ChromeTraceSink::new().export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
