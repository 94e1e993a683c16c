// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface lifecycle and touch normalization for native rendering engines.
//!
//! `canvas_bridge_core` sits between a platform's windowing/input layer and a
//! rendering engine that is only reachable through an opaque per-surface
//! token. It is `no_std` compatible (with `alloc`) and performs no locking:
//! every platform callback is expected on the UI thread, in arrival order.
//!
//! # Architecture
//!
//! ```text
//!   surface create/destroy           raw pointer events
//!           │                                │
//!           ▼                                ▼
//!   SurfaceController ◄── dispatch ── TouchNormalizer
//!     (token, binding,                (gesture pre-pass,
//!      rotation)                       action classification)
//!           │
//!           ▼
//!   Engine (create / bind / release / touch_* / taps / text input)
//! ```
//!
//! **[`token`]**: [`SurfaceToken`](token::SurfaceToken), the opaque engine
//! capability, plus slot ids and persisted state.
//!
//! **[`engine`]**: The [`Engine`](engine::Engine) trait, with every boundary
//! call into the rendering engine.
//!
//! **[`lifecycle`]**: [`SurfaceController`](lifecycle::SurfaceController),
//! the bind/release state machine with rotation-aware teardown.
//!
//! **[`rotation`]**: Display rotation values and the
//! [`RotationSource`](rotation::RotationSource) sampling seam.
//!
//! **[`touch`]**: Pointer batches, the platform-neutral
//! [`MotionEvent`](touch::MotionEvent), tap recognition and the
//! [`TouchNormalizer`](touch::TouchNormalizer).
//!
//! **[`time`]**: Monotonic nanosecond host time used for gesture timing.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! lifecycle and input instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod engine;
pub mod lifecycle;
pub mod rotation;
pub mod time;
pub mod token;
pub mod touch;
pub mod trace;

#[cfg(test)]
pub(crate) mod testing;
