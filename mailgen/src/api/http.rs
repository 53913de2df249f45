//! reqwest-backed implementation of [`MailApi`].
//!
//! Each method performs exactly one request and classifies the response by
//! status code; all retry and backoff decisions live in the control loops,
//! not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use super::types::{
    Account, AuthToken, CredentialsPayload, DomainRecord, HydraCollection, Message,
    MessageSummary, TokenResponse,
};
use super::{CreateOutcome, MailApi};
use crate::config::Config;
use crate::error::{Error, Result};

/// HTTP client for the remote mail service.
pub struct HttpMailApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpMailApi {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn body_text(resp: Response) -> String {
        resp.text().await.unwrap_or_default()
    }
}

#[async_trait]
impl MailApi for HttpMailApi {
    async fn list_domains(&self) -> Result<Vec<String>> {
        let resp = self
            .client
            .get(self.url("/domains"))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "domain_list_failed");
            return Err(Error::NoDomains);
        }

        let collection: HydraCollection<DomainRecord> = resp.json().await?;
        let domains: Vec<String> = collection.member.into_iter().map(|d| d.domain).collect();

        debug!(count = domains.len(), "domain_list_fetched");
        Ok(domains)
    }

    async fn create_account(&self, address: &str, password: &str) -> Result<CreateOutcome> {
        let payload = CredentialsPayload { address, password };

        let resp = self
            .client
            .post(self.url("/accounts"))
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let outcome = match status {
            200 | 201 => CreateOutcome::Created(Account {
                address: address.to_string(),
                password: password.to_string(),
            }),
            422 => CreateOutcome::Conflict,
            429 => CreateOutcome::RateLimited,
            _ => CreateOutcome::Fatal {
                status,
                body: Self::body_text(resp).await,
            },
        };

        debug!(status = status, "account_create_response");
        Ok(outcome)
    }

    async fn login(&self, address: &str, password: &str) -> Result<AuthToken> {
        let payload = CredentialsPayload { address, password };

        let resp = self
            .client
            .post(self.url("/token"))
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Auth {
                status: 0,
                body: e.to_string(),
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::Auth {
                status: status.as_u16(),
                body: Self::body_text(resp).await,
            });
        }

        let token: TokenResponse = resp.json().await.map_err(|e| Error::Auth {
            status: status.as_u16(),
            body: e.to_string(),
        })?;

        Ok(AuthToken::new(token.token))
    }

    async fn list_messages(&self, token: &AuthToken) -> Result<Vec<MessageSummary>> {
        let resp = self
            .client
            .get(self.url("/messages"))
            .timeout(self.timeout)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            // Non-200 list responses count as an empty inbox
            warn!(status = status.as_u16(), "message_list_non_ok");
            return Ok(Vec::new());
        }

        let collection: HydraCollection<MessageSummary> = resp.json().await?;
        Ok(collection.member)
    }

    async fn fetch_message(&self, token: &AuthToken, id: &str) -> Result<Option<Message>> {
        let resp = self
            .client
            .get(self.url(&format!("/messages/{}", id)))
            .timeout(self.timeout)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            // Non-200 detail responses count as the message being missing
            warn!(status = status.as_u16(), id = id, "message_fetch_non_ok");
            return Ok(None);
        }

        let message: Message = resp.json().await?;
        Ok(Some(message))
    }
}
