//! Error types for pystrap operations.
//!
//! This module defines [`PystrapError`], the primary error type, and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Only fatal bootstrap conditions become errors: a failed installer
//! download or a runtime that is still absent after an install attempt.
//! Soft conditions (package install failure, windowless launch failure)
//! are compensated in the pipeline and surface as warning events instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pystrap operations.
#[derive(Debug, Error)]
pub enum PystrapError {
    /// Installer download failed (transfer error, HTTP failure, or
    /// checksum mismatch). Fatal, never retried.
    #[error("Failed to download runtime installer from {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// The runtime was still not reachable after running its installer.
    #[error("Runtime '{runtime}' is still not reachable after installation")]
    RuntimeStillAbsent { runtime: String },

    /// An external command could not be spawned at all.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Failed to parse the optional config override file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pystrap operations.
pub type Result<T> = std::result::Result<T, PystrapError>;
