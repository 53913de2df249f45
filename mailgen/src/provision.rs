//! Single-account provisioning.
//!
//! Resolves a mail domain once, then loops: generate credentials, submit a
//! creation request, and classify the response. Conflicts retry immediately
//! with fresh credentials, rate limiting backs off exponentially, transport
//! failures retry after a fixed delay, anything else is fatal.

use std::time::Duration;

use rand::seq::SliceRandom;
use tracing::{error, info, warn};

use crate::api::types::Account;
use crate::api::{CreateOutcome, MailApi};
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::credentials;
use crate::error::{Error, Result};
use crate::sink::PresentationSink;

/// Fetch the domain list and choose one uniformly at random.
///
/// No retry: a resolver failure aborts the calling job.
pub async fn resolve_domain(api: &dyn MailApi) -> Result<String> {
    let domains = api.list_domains().await?;

    let chosen = {
        let mut rng = rand::thread_rng();
        domains.choose(&mut rng).cloned()
    };

    match chosen {
        Some(domain) => {
            info!(domain = %domain, "domain_resolved");
            Ok(domain)
        }
        None => Err(Error::NoDomains),
    }
}

/// Create one account on `domain`, retrying conflicts and rate limits.
///
/// The rate-limit attempt counter is scoped to this call: each invocation
/// starts its backoff at 2 seconds again. Cancellation is observed at the
/// loop head and during waits, never mid-request.
pub async fn provision(
    api: &dyn MailApi,
    config: &Config,
    domain: &str,
    cancel: &CancelToken,
    sink: &dyn PresentationSink,
) -> Result<Account> {
    let mut rate_limit_attempt: u32 = 0;

    while !cancel.is_cancelled() {
        // Fresh credentials every attempt (ThreadRng is not Send)
        let creds = {
            let mut rng = rand::thread_rng();
            credentials::generate(&mut rng)
        };
        let address = format!("{}@{}", creds.username, domain);

        match api.create_account(&address, &creds.password).await {
            Ok(CreateOutcome::Created(account)) => {
                sink.append_log(&format!(
                    "Success -> {}:{}",
                    account.address, account.password
                ));
                info!(address = %account.address, "provision_success");
                return Ok(account);
            }
            Ok(CreateOutcome::Conflict) => {
                // Discard the credentials and try a new pair right away
                sink.append_log("Address conflict, retrying...");
                info!(address = %address, "provision_conflict_retry");
            }
            Ok(CreateOutcome::RateLimited) => {
                rate_limit_attempt += 1;
                let wait = Duration::from_secs(2u64.saturating_pow(rate_limit_attempt));
                sink.append_log(&format!("Rate limited. Retrying in {}s...", wait.as_secs()));
                warn!(
                    attempt = rate_limit_attempt,
                    wait_secs = wait.as_secs(),
                    "provision_rate_limited"
                );

                if !cancel.wait(wait).await {
                    sink.append_log("Generation stopped during wait.");
                    return Err(Error::Cancelled);
                }
            }
            Ok(CreateOutcome::Fatal { status, body }) => {
                sink.append_log(&format!("API Error: {} - {}", status, body));
                error!(status = status, "provision_fatal");
                return Err(Error::Fatal { status, body });
            }
            Err(Error::Network(message)) => {
                // Transport failure: fixed delay, rate-limit counter untouched
                sink.append_log(&format!(
                    "Request error: {}. Retrying in {}s...",
                    message, config.transport_retry_secs
                ));
                warn!(error = %message, "provision_transport_retry");

                if !cancel
                    .wait(Duration::from_secs(config.transport_retry_secs))
                    .await
                {
                    sink.append_log("Generation stopped during wait.");
                    return Err(Error::Cancelled);
                }
            }
            Err(other) => return Err(other),
        }
    }

    Err(Error::Cancelled)
}
