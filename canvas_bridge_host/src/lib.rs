// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side collaborators for canvas_bridge.
//!
//! The surface controller only sequences bind/release and input. The app
//! around it also has to:
//!
//! - set up the engine runtime once per process ([`runtime`]);
//! - load the initial scene once the surface is bound, off the UI thread
//!   ([`load`]);
//! - persist the surface token across instance save/restore ([`saved`]).
//!
//! A typical fresh start wires them together like this:
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::sync::mpsc::channel;
//!
//! use canvas_bridge_core::token::SurfaceToken;
//! use canvas_bridge_host::load::{HostEvent, LoadOnBind, SceneLoader};
//! use canvas_bridge_core::lifecycle::BindObserver;
//!
//! let loader: Arc<dyn SceneLoader> = Arc::new(|_: SurfaceToken, _: &Path| true);
//! let (events, rx) = channel();
//! let mut observer = LoadOnBind::new(loader, Some("scene.hsf".into()), events);
//!
//! // The controller calls this from `surface_created`.
//! observer.on_surface_bind(SurfaceToken::from_raw(1), true);
//! assert_eq!(rx.recv(), Ok(HostEvent::LoadStarted));
//! assert_eq!(rx.recv(), Ok(HostEvent::LoadFinished(true)));
//! ```

pub mod load;
pub mod runtime;
pub mod saved;
