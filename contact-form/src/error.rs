//! Error types for the contact form.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single control failed validation.
///
/// These are user-correctable states. They are surfaced inline at the failing
/// control and never abort the workflow. The `Display` text is meant for logs;
/// user-facing wording comes from [`Messages`](crate::messages::Messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ValidationFailure {
    /// A required field is empty or whitespace-only, or a required checkbox is unticked.
    #[error("a value is required")]
    MissingRequiredValue,

    /// An email field holds a non-empty value that is not shaped like an address.
    #[error("malformed email address")]
    MalformedEmail,

    /// The consent control was not ticked at submit time.
    #[error("consent not given")]
    ConsentNotGiven,
}

/// Errors returned by a [`SubmissionBackend`](crate::backend::SubmissionBackend).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The backend received the submission and refused it.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The submission never reached the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend did not answer within the configured bound.
    #[error("submission timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
