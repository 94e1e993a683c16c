// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Android glue for canvas_bridge.
//!
//! This crate maps the Android view callbacks onto the platform-neutral core:
//!
//! - [`motion`] decodes `AMotionEvent` action words and pointer rows into
//!   [`MotionEvent`](canvas_bridge_core::touch::MotionEvent)s.
//! - [`rotation`] decodes `Surface.ROTATION_*` and provides a shared
//!   [`DisplayRotation`](rotation::DisplayRotation) cell the app updates.
//! - [`time`] reads `CLOCK_MONOTONIC`, the clock `MotionEvent` times use.
//! - [`surface_view`] combines a surface controller and touch normalizer
//!   behind one method per `SurfaceView` callback.
//!
//! JNI entry points live in the embedding app; everything here is plain Rust
//! and builds on any Unix host.

pub mod motion;
pub mod rotation;
pub mod surface_view;
pub mod time;

pub use surface_view::SurfaceView;
