//! Error handling utilities for the asoka application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that can reach the process boundary, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Most failures inside the state manager never get this far: storage parse
//! failures fall back to defaults, rejected audio starts reset the player and
//! AI tip failures return a fixed tip. The types here cover what remains.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when reading or writing the
/// durable key-value store.
///
/// # Examples
///
/// ```
/// use asoka::errors::StorageError;
///
/// let error = StorageError::InvalidKey("../escape".to_string());
/// assert!(format!("{}", error).contains("../escape"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be mapped to a storage slot.
    #[error("Invalid storage key '{0}': keys may only contain ASCII letters, digits, '_' and '-'")]
    InvalidKey(String),

    /// A value could not be serialized or deserialized.
    #[error("Failed to (de)serialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored collection carries a format version this build does not understand.
    #[error("Unsupported storage format version {0}")]
    UnsupportedVersion(u32),

    /// The storage lock could not be acquired.
    #[error("Failed to lock storage at {path}: {source}")]
    Lock {
        /// Path of the lock file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The temporary file holding a new value could not be moved into place.
    #[error("Failed to persist value for key '{key}': {source}")]
    Persist {
        /// The key being written
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur when talking to the
/// generative-AI service.
///
/// # Examples
///
/// ```
/// use asoka::errors::AIError;
///
/// let error = AIError::MissingApiKey;
/// assert!(format!("{}", error).contains("API_KEY"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// No API key is configured.
    #[error("No API key configured. Set API_KEY to enable generated content.")]
    MissingApiKey,

    /// The service is not reachable.
    #[error("Generative AI service unreachable: {0}")]
    Offline(#[source] reqwest::Error),

    /// The service answered with something we cannot use.
    #[error("Invalid response from generative AI service: {0}")]
    InvalidResponse(String),
}

/// Errors raised by an audio backend when starting or controlling playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The backend refused to start playback (e.g. autoplay policy).
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// The source could not be opened.
    #[error("Audio source unavailable: {0}")]
    Unavailable(String),
}

/// Represents all possible errors that can occur in the asoka application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use asoka::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use asoka::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to the durable key-value store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors related to the generative-AI collaborator.
    #[error("AI error: {0}")]
    AI(#[from] AIError),

    /// Errors raised by the audio backend.
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Errors from the static file host.
    #[error("Server error: {0}")]
    Server(String),

    /// A requested item (reminder, article) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
