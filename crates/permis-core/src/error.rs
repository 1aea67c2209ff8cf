//! Oracle error types.
//!
//! These error types represent failures when consulting a scoring oracle.
//! Defined in `permis-core` so the scoring engine can log and classify them
//! without string matching. None of them is fatal to a submission: the
//! engine turns every one into an unavailable outcome.

use thiserror::Error;

/// Errors that can occur when consulting a scoring oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle is not usable with the current configuration.
    #[error("oracle not configured: {0}")]
    NotConfigured(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested backend model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The oracle returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The oracle answered, but not with a usable payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Every candidate backend model was tried without success.
    #[error("no backend model available after {tried} attempt(s), last error: {last}")]
    Exhausted { tried: usize, last: String },
}

impl OracleError {
    /// Returns `true` if the next candidate model should be tried.
    pub fn is_model_not_found(&self) -> bool {
        matches!(self, OracleError::ModelNotFound(_))
    }
}
