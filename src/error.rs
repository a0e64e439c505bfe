//! Error types for steprunner operations.
//!
//! This module defines [`StepRunnerError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Resolution and configuration problems get distinct variants so callers
//!   can tell "bad input" apart from "a step failed"
//! - Use `anyhow::Error` (via `StepRunnerError::Other`) for unexpected errors
//! - The orchestrator never lets these escape a run; they become log
//!   messages and a failed verdict

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for steprunner operations.
#[derive(Debug, Error)]
pub enum StepRunnerError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Two steps in one run share an identity.
    #[error("Duplicate step '{step}'")]
    DuplicateStep { step: String },

    /// An ordering constraint names a step that is not part of the run.
    #[error("Step '{step}' references unknown step dependency '{dependency}'")]
    UnknownDependency { step: String, dependency: String },

    /// Ordering constraints form a cycle or contradict each other.
    #[error("Cyclic or unsatisfiable dependency: {cycle}")]
    CircularDependency { cycle: String },

    /// The script a step points at does not exist.
    #[error("Step file not found: {path}")]
    StepNotFound { path: PathBuf },

    /// Step execution failed.
    #[error("Step '{step}' failed: {message}")]
    StepExecutionError { step: String, message: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StepRunnerError {
    /// Whether this error comes from ordering resolution.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateStep { .. }
                | Self::UnknownDependency { .. }
                | Self::CircularDependency { .. }
        )
    }
}

/// Result type alias for steprunner operations.
pub type Result<T> = std::result::Result<T, StepRunnerError>;
