//! Login and inbox polling.
//!
//! Login is a single request with no retry. The poll loop checks the
//! message list at a fixed interval until a message appears or the session
//! is cancelled; every fetch failure is transient and keeps the loop
//! running. There is deliberately no attempt cap or deadline - termination
//! is the owner's job via the cancellation token.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::types::{AuthToken, Message};
use crate::api::MailApi;
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sink::PresentationSink;

/// Exchange credentials for a bearer token.
///
/// Only HTTP 200 succeeds; every other outcome is [`Error::Auth`], not
/// retried.
pub async fn login(api: &dyn MailApi, address: &str, password: &str) -> Result<AuthToken> {
    match api.login(address, password).await {
        Ok(token) => {
            info!(address = %address, "login_success");
            Ok(token)
        }
        Err(e) => {
            warn!(address = %address, error = %e, "login_failed");
            Err(e)
        }
    }
}

/// Poll the inbox until a message arrives or `cancel` is set.
///
/// Each round lists message summaries; a non-empty list triggers a fetch of
/// the first summary's full record, which terminates the loop. List and
/// fetch failures are logged and retried on the next round.
pub async fn poll(
    api: &dyn MailApi,
    config: &Config,
    token: &AuthToken,
    cancel: &CancelToken,
    sink: &dyn PresentationSink,
) -> Result<Message> {
    let interval = Duration::from_secs(config.poll_interval_secs);
    sink.set_status("Checking for messages...");

    while !cancel.is_cancelled() {
        match api.list_messages(token).await {
            Ok(summaries) => {
                if let Some(summary) = summaries.first() {
                    match api.fetch_message(token, &summary.id).await {
                        Ok(Some(message)) => {
                            info!(id = %message.id, "poll_message_found");
                            return Ok(message);
                        }
                        Ok(None) => {
                            // Record vanished between list and fetch; retry next round
                            debug!(id = %summary.id, "poll_message_missing");
                        }
                        Err(e) => {
                            warn!(id = %summary.id, error = %e, "poll_fetch_error");
                        }
                    }
                } else {
                    debug!("poll_inbox_empty");
                }
            }
            Err(e) => {
                // Transient by policy: the poll loop never gives up on errors
                warn!(error = %e, "poll_list_error");
            }
        }

        if !cancel.wait(interval).await {
            break;
        }
    }

    info!("poll_cancelled");
    Err(Error::Cancelled)
}
