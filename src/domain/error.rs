//! Error types for the findy front end.
//!
//! This module defines the centralized error type [`FindyError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! None of these errors are fatal to an interactive session: the worker converts
//! every failure into a [`WorkerResponse`](crate::worker::WorkerResponse) variant,
//! and the event handler turns those into visible (or silently degraded) UI states.

use thiserror::Error;

/// The main error type for findy operations.
///
/// Consolidates every failure that can occur while talking to the search API,
/// persisting preferences, or loading configuration. Variants carrying a `String`
/// hold a human-readable description; `Io` wraps the underlying error directly.
///
/// # Examples
///
/// ```
/// use findy::FindyError;
///
/// fn validate_page_size(size: u32) -> Result<(), FindyError> {
///     if size == 0 {
///         return Err(FindyError::Config("page_size must be greater than 0".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum FindyError {
    /// Reading or writing the preferences file failed.
    ///
    /// The string contains a description of what went wrong (parse failure,
    /// serialization failure).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP transport failed or the server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered, but the body did not match the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The worker could not accept or answer a request.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FindyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FindyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for findy operations.
pub type Result<T> = std::result::Result<T, FindyError>;
