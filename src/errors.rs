// src/errors.rs

//! Error types for binary resolution, option validation and process spawn.
//!
//! Everything here is fatal and aborts the run before (or at) the moment a
//! server process would exist. Failures after streaming has started are not
//! errors in this sense and are handled inside the supervisor.

use thiserror::Error;

/// Fatal errors raised while preparing or starting a serve session.
#[derive(Debug, Error)]
pub enum ServeError {
    /// No candidate browser-sync executable was found.
    #[error("unable to locate browser-sync binary")]
    BinaryNotFound,

    /// Pre-spawn validation failed; no process was created.
    #[error("{0}")]
    Validation(String),

    /// The OS refused to create the child process or its pseudo-terminal.
    #[error("failed to spawn browser-sync: {0}")]
    Spawn(String),
}

/// Result type for the resolution and spawn layers.
pub type Result<T> = std::result::Result<T, ServeError>;
