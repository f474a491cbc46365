//! Error types for the companion client.

use thiserror::Error;

/// Fixed user-facing message shown whenever the backend could not be reached
/// at all. Raw transport messages (connection refused, timeouts, DNS) must
/// never leak into the UI; this string replaces them verbatim.
pub const BACKEND_UNREACHABLE_MSG: &str =
    "Cannot reach the backend. Start the server and try again.";

/// A shared error type for the companion client.
///
/// The taxonomy mirrors what the UI needs to distinguish:
/// - `Unreachable`: no response was obtained from the backend at all
/// - `Rejected`: the backend responded with an error status
/// - `InvalidResponse`: the backend responded but the body was not usable
#[derive(Error, Debug, Clone)]
pub enum CompanionError {
    /// No response reached the client (connection refused, timeout, DNS).
    #[error("backend unreachable")]
    Unreachable,

    /// The backend responded with an error status.
    #[error("request rejected: {detail}")]
    Rejected { detail: String },

    /// The backend responded but the payload could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error (should not happen in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompanionError {
    /// Creates a `Rejected` error with the given detail.
    pub fn rejected(detail: impl Into<String>) -> Self {
        Self::Rejected {
            detail: detail.into(),
        }
    }

    /// Creates an `InvalidResponse` error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an `Unreachable` error.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }

    /// Renders the message shown to the user for this failure.
    ///
    /// `Unreachable` always maps to [`BACKEND_UNREACHABLE_MSG`]. A `Rejected`
    /// error surfaces its server-supplied detail when present. Anything else
    /// falls back to the caller-supplied description.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Unreachable => BACKEND_UNREACHABLE_MSG.to_string(),
            Self::Rejected { detail } if !detail.trim().is_empty() => detail.clone(),
            Self::InvalidResponse(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// A type alias for `Result<T, CompanionError>`.
pub type Result<T> = std::result::Result<T, CompanionError>;
