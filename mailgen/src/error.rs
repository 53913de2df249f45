//! Error types for account provisioning and inbox polling.
//!
//! Only conditions that terminate a job appear here. Retryable creation
//! responses (address conflict, rate limiting) are in-band variants of
//! [`crate::api::CreateOutcome`] and never surface as errors.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that terminate a provisioning or polling job.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection refused, timeout, DNS, ...).
    ///
    /// The provisioner retries these internally after a fixed delay; the
    /// domain resolver propagates them and aborts the job.
    #[error("network error: {0}")]
    Network(String),

    /// The domain list request returned no usable domains.
    #[error("no usable mail domains available")]
    NoDomains,

    /// Account creation answered with a status that is neither success,
    /// conflict, nor rate limiting. Never retried.
    #[error("account creation failed with status {status}: {body}")]
    Fatal {
        /// HTTP status code of the response.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Login answered with anything other than HTTP 200. Never retried.
    ///
    /// Transport failures during login are reported with status 0.
    #[error("login failed with status {status}: {body}")]
    Auth {
        /// HTTP status code of the response (0 for transport failures).
        status: u16,
        /// Response body text or transport error description.
        body: String,
    },

    /// The owning job's stop flag was set.
    #[error("operation cancelled")]
    Cancelled,

    /// Batch size outside the allowed `1..=50` range, rejected before any
    /// network call.
    #[error("requested count {0} is outside 1..=50")]
    InvalidCount(u32),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl Error {
    /// Returns `true` if the provisioning loop retries this error
    /// internally instead of surfacing it.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}
