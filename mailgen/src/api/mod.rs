//! Remote mail API abstraction.
//!
//! The control loops (provisioning, polling) talk to the remote service
//! through the [`MailApi`] trait so they can be exercised against a scripted
//! implementation in tests. [`HttpMailApi`] is the production reqwest-backed
//! implementation.

pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
pub use http::HttpMailApi;
pub use types::{Account, AuthToken, Message, MessageSummary};

/// Classified result of an account-creation request.
///
/// Conflict and rate limiting are in-band retry signals, not errors: the
/// provisioner handles them transparently and they are never surfaced to
/// the caller.
#[derive(Debug)]
pub enum CreateOutcome {
    /// The account was created (HTTP 200/201).
    Created(Account),
    /// The address is already taken (HTTP 422); retry with fresh credentials.
    Conflict,
    /// The service is rate limiting (HTTP 429); back off and retry.
    RateLimited,
    /// Any other non-success status; aborts the job, never retried.
    Fatal {
        /// HTTP status code of the response.
        status: u16,
        /// Response body text.
        body: String,
    },
}

/// Operations offered by the remote mail service.
#[async_trait]
pub trait MailApi: Send + Sync {
    /// List the usable mail domains.
    ///
    /// Transport failures map to [`crate::Error::Network`], non-2xx
    /// responses to [`crate::Error::NoDomains`].
    async fn list_domains(&self) -> Result<Vec<String>>;

    /// Create an account, classifying the response into a [`CreateOutcome`].
    ///
    /// Only transport failures are returned as errors.
    async fn create_account(&self, address: &str, password: &str) -> Result<CreateOutcome>;

    /// Exchange credentials for a bearer token.
    ///
    /// Anything other than HTTP 200, including transport failure, is
    /// [`crate::Error::Auth`].
    async fn login(&self, address: &str, password: &str) -> Result<AuthToken>;

    /// List message summaries for the authenticated mailbox.
    ///
    /// Non-200 responses are treated as an empty inbox.
    async fn list_messages(&self, token: &AuthToken) -> Result<Vec<MessageSummary>>;

    /// Fetch the full record of one message.
    ///
    /// Non-200 responses are treated as the message being missing.
    async fn fetch_message(&self, token: &AuthToken, id: &str) -> Result<Option<Message>>;
}
