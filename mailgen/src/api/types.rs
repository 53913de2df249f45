//! Wire types for the remote mail API.
//!
//! Collection payloads arrive wrapped in a `hydra:member` field. Message
//! fields that may be absent deserialize as `Option` so malformed records
//! degrade to placeholder text downstream instead of failing.

use serde::{Deserialize, Serialize};

/// Generic collection payload; the API nests lists under `hydra:member`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct HydraCollection<T> {
    /// The collection items.
    #[serde(rename = "hydra:member", default)]
    pub member: Vec<T>,
}

/// One entry of the domain list response.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainRecord {
    /// The mail domain hostname.
    pub domain: String,
}

/// A freshly generated username/password pair, discarded on conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Local part of the future address.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// A successfully provisioned account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Full email address.
    pub address: String,
    /// Account password.
    pub password: String,
}

/// Body of the account-creation and login requests.
#[derive(Debug, Serialize)]
pub struct CredentialsPayload<'a> {
    /// Full email address.
    pub address: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Opaque bearer token obtained from login; no refresh logic.
#[derive(Debug, Clone)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token for the Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Login response payload.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub token: String,
}

/// Summary entry from the message list; only the id is needed to fetch the
/// full record.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSummary {
    /// Message identifier.
    pub id: String,
}

/// Sender information of a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sender {
    /// Sender email address.
    #[serde(default)]
    pub address: String,
}

/// Full message record fetched by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier.
    #[serde(default)]
    pub id: String,
    /// Subject line; the verification code is extracted from here.
    #[serde(default)]
    pub subject: Option<String>,
    /// Sender information.
    #[serde(default)]
    pub from: Option<Sender>,
    /// ISO 8601 creation timestamp.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    /// Plain-text body.
    #[serde(default)]
    pub text: Option<String>,
}
