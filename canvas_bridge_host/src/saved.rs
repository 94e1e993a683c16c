// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saved-instance persistence for a surface.
//!
//! The host stores a [`SavedSurface`] when the platform asks it to save
//! instance state, and restores it when the view is recreated, so the new
//! controller adopts the existing engine surface instead of creating one.
//! The encoding is a small JSON object:
//!
//! ```json
//! {"surface_slot": 7, "surface_token": 3735928559}
//! ```

use std::fmt;

use canvas_bridge_core::token::{SavedSurface, SurfaceSlot, SurfaceToken};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// On-disk shape of a [`SavedSurface`].
#[derive(Serialize, Deserialize)]
struct SavedWire {
    surface_slot: u32,
    surface_token: u64,
}

/// Errors from [`decode`].
#[derive(Debug)]
pub enum SavedStateError {
    /// The input is not JSON, or a field is absent or out of range.
    Json(serde_json::Error),
    /// The input is JSON but not an object.
    NotAnObject,
    /// The saved token is null, so there is nothing to restore.
    NullToken,
}

impl fmt::Display for SavedStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "saved state is not valid: {err}"),
            Self::NotAnObject => f.write_str("saved state is not a JSON object"),
            Self::NullToken => f.write_str("saved state holds a null surface token"),
        }
    }
}

impl core::error::Error for SavedStateError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SavedStateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<&SavedSurface> for SavedWire {
    fn from(saved: &SavedSurface) -> Self {
        Self {
            surface_slot: saved.slot.0,
            surface_token: saved.token.raw(),
        }
    }
}

/// Encodes `saved` as a JSON object.
pub fn to_value(saved: &SavedSurface) -> Result<Value, SavedStateError> {
    Ok(serde_json::to_value(SavedWire::from(saved))?)
}

/// Encodes `saved` as a JSON string.
pub fn encode(saved: &SavedSurface) -> Result<String, SavedStateError> {
    Ok(serde_json::to_string(&SavedWire::from(saved))?)
}

/// Decodes a JSON object produced by [`to_value`].
pub fn from_value(value: &Value) -> Result<SavedSurface, SavedStateError> {
    if !value.is_object() {
        return Err(SavedStateError::NotAnObject);
    }
    restore(SavedWire::deserialize(value)?)
}

/// Decodes a JSON string produced by [`encode`].
pub fn decode(text: &str) -> Result<SavedSurface, SavedStateError> {
    let value: Value = serde_json::from_str(text)?;
    from_value(&value)
}

fn restore(wire: SavedWire) -> Result<SavedSurface, SavedStateError> {
    let token = SurfaceToken::from_raw(wire.surface_token);
    if token.is_null() {
        return Err(SavedStateError::NullToken);
    }
    Ok(SavedSurface {
        slot: SurfaceSlot(wire.surface_slot),
        token,
    })
}
