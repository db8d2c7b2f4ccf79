//! Error types for reqtui.
//!
//! This module defines the centralized error type [`ReqError`] and a type alias
//! [`Result`] used throughout the crate. Errors fall into three classes that the
//! UI treats differently:
//!
//! - **Invalid input**: local validation failures, shown inline next to the
//!   text being edited.
//! - **Not found**: the target vanished between selection and action. Soft; the
//!   view refreshes to the current truth.
//! - **Infrastructure**: storage, I/O, network or worker failures. Surfaced as a
//!   transient banner and never retried automatically.

use thiserror::Error;

/// The main error type for reqtui operations.
#[derive(Debug, Error)]
pub enum ReqError {
    /// A name, id or other user-supplied value failed validation.
    ///
    /// The string is a human-readable message suitable for inline display.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Resource kind, e.g. `"collection"`.
        kind: &'static str,
        /// Identifier that failed to resolve.
        id: i64,
    },

    /// Storage operation failed.
    ///
    /// Occurs when reading, parsing or writing the backing store fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background workers failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReqError {
    /// Builds an [`ReqError::InvalidInput`] from anything string-like.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns `true` for [`ReqError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`ReqError::InvalidInput`].
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns `true` for errors that originate below the domain layer.
    ///
    /// These are the errors shown as a banner rather than inline or silently.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        !self.is_not_found() && !self.is_invalid_input()
    }
}

impl From<reqwest::Error> for ReqError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// A specialized `Result` type for reqtui operations.
pub type Result<T> = std::result::Result<T, ReqError>;
