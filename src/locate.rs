// src/locate.rs

//! Locating the browser-sync executable.
//!
//! The project-local npm install location is preferred over anything on
//! `PATH`; the `PATH` search itself (including Windows executable suffix
//! handling) is delegated to the `which` crate.

use std::path::{Path, PathBuf};

use crate::errors::{Result, ServeError};

/// Conventional location of a project-local browser-sync install.
pub const DEFAULT_BROWSERSYNC_PATH: &str = "node_modules/.bin/browser-sync";

/// Find the browser-sync executable, relative to the current directory.
///
/// The local path is returned unmodified when it exists. No side effects.
pub fn locate() -> Result<PathBuf> {
    let local = Path::new(DEFAULT_BROWSERSYNC_PATH);
    if local.is_file() {
        return Ok(local.to_path_buf());
    }

    search_path()
}

/// Find the browser-sync executable for a project rooted at `project_root`.
pub fn locate_in(project_root: &Path) -> Result<PathBuf> {
    let local = project_root.join(DEFAULT_BROWSERSYNC_PATH);
    if local.is_file() {
        return Ok(local);
    }

    search_path()
}

fn search_path() -> Result<PathBuf> {
    which::which("browser-sync").map_err(|_| ServeError::BinaryNotFound)
}
