// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide engine runtime setup.
//!
//! The engine's global state outlives every activity instance: it is set up
//! once per process, the first time any view is created, and never torn
//! down. [`init`] runs the setup behind a process-wide gate; later calls
//! return the first call's [`RuntimeInfo`] without touching the runtime.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Native libraries whose presence enables the optional import extensions.
pub const DEFAULT_EXTENSION_LIBRARIES: &[&str] = &["libA3DLIBS.so", "libhps_sprk_exchange.so"];

/// Directories and probes for runtime setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding the app's native libraries.
    pub library_dir: PathBuf,
    /// Font directory, if the app ships fonts.
    pub font_dir: Option<PathBuf>,
    /// Materials directory, if the app ships materials.
    pub materials_dir: Option<PathBuf>,
    /// File names that must all exist in `library_dir` for extensions to be
    /// available.
    pub extension_libraries: Vec<String>,
}

impl RuntimeConfig {
    /// Creates a config for `library_dir` probing the default extension
    /// libraries.
    #[must_use]
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: library_dir.into(),
            font_dir: None,
            materials_dir: None,
            extension_libraries: DEFAULT_EXTENSION_LIBRARIES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    /// Sets the font directory.
    #[must_use]
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dir = Some(dir.into());
        self
    }

    /// Sets the materials directory.
    #[must_use]
    pub fn with_materials_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.materials_dir = Some(dir.into());
        self
    }

    /// Returns `true` if every extension library exists in `library_dir`.
    ///
    /// An empty list counts as available.
    #[must_use]
    pub fn extensions_available(&self) -> bool {
        self.extension_libraries
            .iter()
            .all(|name| self.library_dir.join(name).is_file())
    }
}

/// What [`init`] found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// Whether the optional import extensions can be used.
    pub extensions_available: bool,
}

/// Process-wide engine entry points.
pub trait EngineRuntime {
    /// Where the engine loads native plugins from.
    fn set_library_directory(&mut self, dir: &Path);

    /// Where the engine finds fonts.
    fn set_font_directory(&mut self, dir: &Path) {
        _ = dir;
    }

    /// Where the engine finds materials.
    fn set_materials_directory(&mut self, dir: &Path) {
        _ = dir;
    }

    /// Tears the runtime down. Hosts are not required to call this.
    fn shutdown(&mut self) {}
}

/// A run-once gate for runtime setup.
///
/// [`init`] uses a process-wide instance; tests and embedders that manage
/// several engines can own their own.
#[derive(Debug, Default)]
pub struct RuntimeGate {
    info: OnceLock<RuntimeInfo>,
}

impl RuntimeGate {
    /// Creates a closed gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            info: OnceLock::new(),
        }
    }

    /// Runs setup the first time; afterwards returns the recorded info.
    pub fn init(&self, config: &RuntimeConfig, runtime: &mut dyn EngineRuntime) -> RuntimeInfo {
        *self.info.get_or_init(|| {
            let info = RuntimeInfo {
                extensions_available: config.extensions_available(),
            };
            runtime.set_library_directory(&config.library_dir);
            if let Some(dir) = &config.font_dir {
                runtime.set_font_directory(dir);
            }
            if let Some(dir) = &config.materials_dir {
                runtime.set_materials_directory(dir);
            }
            info
        })
    }

    /// Returns `true` once setup has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.info.get().is_some()
    }

    /// Info recorded by the first [`init`](Self::init), if any.
    #[must_use]
    pub fn info(&self) -> Option<RuntimeInfo> {
        self.info.get().copied()
    }
}

static GATE: RuntimeGate = RuntimeGate::new();

/// Sets up the engine runtime once per process.
pub fn init(config: &RuntimeConfig, runtime: &mut dyn EngineRuntime) -> RuntimeInfo {
    GATE.init(config, runtime)
}

/// Returns `true` once [`init`] has run in this process.
#[must_use]
pub fn is_initialized() -> bool {
    GATE.is_initialized()
}
