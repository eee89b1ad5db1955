//! Error types for launchfeed
//!
//! Provides standardized error handling across the crate.

use thiserror::Error;

/// Errors that can occur while talking to the launch provider.
///
/// Variants carry owned data rather than wrapping transport errors directly:
/// a fetch failure is published inside [`LoadState::Failed`] and therefore
/// has to be cloneable.
///
/// [`LoadState::Failed`]: crate::core::controller::LoadState::Failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LaunchError {
    /// The request could not be built (malformed base URL or parameters).
    /// Raised before any I/O is attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connectivity failure (DNS, connect, timeout, aborted transfer).
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-2xx status.
    #[error("http error: status {0}")]
    Http(u16),

    /// The response body did not match the expected schema.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type alias for launchfeed operations
pub type LaunchResult<T> = Result<T, LaunchError>;
