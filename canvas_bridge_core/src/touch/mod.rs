// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input model and normalization.
//!
//! Platforms report pointer input as a stream of [`MotionEvent`]s: one
//! notification per action, carrying the whole table of currently active
//! pointers. The engine instead wants a canonical call stream:
//!
//! - **Discrete edges**: a pointer went down or up. Only the pointer that
//!   changed is reported, so the batch always holds exactly one entry even
//!   when other fingers are resting on the screen.
//! - **Coalesced moves**: every active pointer, in platform index order.
//! - **Cancel**: all active pointers are aborted, with no coordinates.
//! - **Taps**: single/double taps recognized from the same raw stream.
//!
//! [`TouchNormalizer`] performs that translation, one [`TouchCall`] per raw
//! event at most. Pointer identity is carried by [`PointerId`], which stays
//! stable across a finger's down → move → up lifetime.

mod event;
mod gesture;
mod normalize;
mod pointer;

pub use event::{MotionAction, MotionEvent, PointerSample};
pub use gesture::{Gesture, GestureRecognizer, TapConfig, TapDetector};
pub use normalize::{TouchCall, TouchNormalizer};
pub use pointer::{PointerBatch, PointerId};
