// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and Chrome trace export for canvas_bridge diagnostics.
//!
//! This crate provides [`TraceSink`](canvas_bridge_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`chrome::ChromeTraceSink`]: collects events and writes Chrome Trace
//!   Event Format JSON.
//!
//! Depending on this crate turns on the core crate's `trace` feature, so
//! installed sinks actually receive events.

pub mod chrome;
pub mod pretty;
