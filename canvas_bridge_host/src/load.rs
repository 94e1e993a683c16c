// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background scene loading.
//!
//! A scene load is a single long-running engine call made with a bound
//! surface's token. [`LoadTask::spawn`] runs it on a worker thread and reports
//! the result through a completion callback.
//!
//! # Cancellation
//!
//! [`LoadHandle::cancel`] only suppresses the completion callback. The engine
//! call is not interruptible, so the load itself always runs to completion
//! and its effects on the scene remain. Releasing the token while a load is
//! in flight is a race the engine must tolerate; callers that care should
//! [`join`](LoadHandle::join) first.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use canvas_bridge_core::lifecycle::BindObserver;
use canvas_bridge_core::token::SurfaceToken;

/// Engine entry point for loading a scene file into a surface.
pub trait SceneLoader: Send + Sync {
    /// Loads `path` into the scene owned by `token`. Returns `true` on
    /// success.
    fn load_file(&self, token: SurfaceToken, path: &Path) -> bool;
}

impl<F: Fn(SurfaceToken, &Path) -> bool + Send + Sync> SceneLoader for F {
    fn load_file(&self, token: SurfaceToken, path: &Path) -> bool {
        self(token, path)
    }
}

/// Spawns scene loads.
#[derive(Debug)]
pub struct LoadTask;

impl LoadTask {
    /// Starts loading `path` into `token` on a new thread.
    ///
    /// `on_complete` runs on the worker thread with the load result, unless
    /// the returned handle was cancelled first.
    pub fn spawn<C>(
        loader: Arc<dyn SceneLoader>,
        token: SurfaceToken,
        path: impl Into<PathBuf>,
        on_complete: C,
    ) -> LoadHandle
    where
        C: FnOnce(bool) + Send + 'static,
    {
        let path = path.into();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let worker = thread::spawn(move || {
            let loaded = loader.load_file(token, &path);
            if !flag.load(Ordering::Acquire) {
                on_complete(loaded);
            }
            loaded
        });
        LoadHandle {
            cancelled,
            worker: Some(worker),
        }
    }
}

/// Handle to an in-flight load.
///
/// Dropping the handle detaches the worker; the load and its callback still
/// run.
pub struct LoadHandle {
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<bool>>,
}

impl fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadHandle")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

impl LoadHandle {
    /// Suppresses the completion callback if it has not run yet. Does not
    /// stop the load.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns `true` once the worker has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the load and returns its result, cancelled or not.
    ///
    /// Returns `None` if the loader or the callback panicked.
    pub fn join(mut self) -> Option<bool> {
        self.worker.take()?.join().ok()
    }
}

/// Notification from [`LoadOnBind`] to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// The engine refused the surface.
    BindFailed,
    /// A scene load began.
    LoadStarted,
    /// The scene load finished.
    LoadFinished(bool),
}

/// Starts the initial scene load once the surface is bound.
///
/// Register as the controller's [`BindObserver`]. A load is started on the
/// first successful bind only when one is pending: a fresh start has one, a
/// restored instance does not since its scene survived in the engine.
/// Rebinds after rotation never load again.
pub struct LoadOnBind {
    loader: Arc<dyn SceneLoader>,
    pending: Option<PathBuf>,
    events: Sender<HostEvent>,
    handle: Option<LoadHandle>,
}

impl fmt::Debug for LoadOnBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOnBind")
            .field("pending", &self.pending)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl LoadOnBind {
    /// Creates an observer that will load `pending` (if any) on bind.
    pub fn new(
        loader: Arc<dyn SceneLoader>,
        pending: Option<PathBuf>,
        events: Sender<HostEvent>,
    ) -> Self {
        Self {
            loader,
            pending,
            events,
            handle: None,
        }
    }

    /// Returns `true` while a load is still to be started.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The started load, if any.
    pub fn take_handle(&mut self) -> Option<LoadHandle> {
        self.handle.take()
    }
}

impl BindObserver for LoadOnBind {
    fn on_surface_bind(&mut self, token: SurfaceToken, bound: bool) {
        if !bound {
            _ = self.events.send(HostEvent::BindFailed);
            return;
        }
        let Some(path) = self.pending.take() else {
            return;
        };

        _ = self.events.send(HostEvent::LoadStarted);
        let events = self.events.clone();
        self.handle = Some(LoadTask::spawn(
            Arc::clone(&self.loader),
            token,
            path,
            move |loaded| {
                _ = events.send(HostEvent::LoadFinished(loaded));
            },
        ));
    }
}
