// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer identity and index-aligned coordinate batches.

use alloc::vec::Vec;
use core::fmt;

/// Stable identity of one touch contact.
///
/// Assigned by the platform when the pointer goes down and kept until it goes
/// up; unique among concurrently active pointers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub i64);

impl fmt::Debug for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerId({})", self.0)
    }
}

/// An ordered set of `(x, y, id)` triples in pixel coordinates.
///
/// Stored as three parallel arrays, which is the layout engine touch entry
/// points consume. The arrays are index-aligned by construction: the only
/// way to grow a batch is [`push`](Self::push), which appends a full triple.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerBatch {
    xs: Vec<i32>,
    ys: Vec<i32>,
    ids: Vec<PointerId>,
}

impl PointerBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
            ids: Vec::new(),
        }
    }

    /// Creates an empty batch with room for `capacity` triples.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Creates a batch holding a single pointer.
    #[must_use]
    pub fn single(x: i32, y: i32, id: PointerId) -> Self {
        let mut batch = Self::with_capacity(1);
        batch.push(x, y, id);
        batch
    }

    /// Appends one triple.
    pub fn push(&mut self, x: i32, y: i32, id: PointerId) {
        self.xs.push(x);
        self.ys.push(y);
        self.ids.push(id);
    }

    /// Number of triples; this is the touch count reported to the engine.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the batch holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// X coordinates, index-aligned with [`ys`](Self::ys) and [`ids`](Self::ids).
    #[must_use]
    pub fn xs(&self) -> &[i32] {
        &self.xs
    }

    /// Y coordinates.
    #[must_use]
    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    /// Pointer ids.
    #[must_use]
    pub fn ids(&self) -> &[PointerId] {
        &self.ids
    }

    /// Iterates the batch as `(x, y, id)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, PointerId)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.ids)
            .map(|((&x, &y), &id)| (x, y, id))
    }
}
