//! Batch generation controller.
//!
//! Drives up to fifty sequential provisioning attempts, collecting the
//! results and offering them as a downloadable `address:password` list.
//! A fatal provisioning error or a cancellation stops the loop early but
//! keeps the accounts collected so far.

use std::time::Duration;

use chrono::Local;
use tokio::time::sleep;
use tracing::info;

use crate::api::types::Account;
use crate::api::MailApi;
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::provision::{provision, resolve_domain};
use crate::sink::PresentationSink;

/// Upper bound on accounts per batch. An invariant, not a tunable.
pub const MAX_BATCH_SIZE: u32 = 50;

/// Downloadable result of a finished batch.
#[derive(Debug)]
pub struct ExportArtifact {
    /// Suggested filename, `accounts_<YYYY-MM-DD>.txt`.
    pub filename: String,
    /// Newline-joined `address:password` lines.
    pub bytes: Vec<u8>,
    /// MIME content type.
    pub mime: &'static str,
}

/// Build the export artifact for a non-empty account list.
pub fn export_artifact(accounts: &[Account]) -> ExportArtifact {
    let content = accounts
        .iter()
        .map(|a| format!("{}:{}", a.address, a.password))
        .collect::<Vec<_>>()
        .join("\n");

    ExportArtifact {
        filename: format!("accounts_{}.txt", Local::now().format("%Y-%m-%d")),
        bytes: content.into_bytes(),
        mime: "text/plain",
    }
}

/// Provision `count` accounts sequentially.
///
/// Rejects `count` outside `1..=MAX_BATCH_SIZE` before any network call.
/// The domain is resolved once; resolver failure aborts the batch.
/// Returns the accounts created, which may be fewer than `count` if the
/// batch was cancelled or a fatal error stopped it.
pub async fn run_batch(
    api: &dyn MailApi,
    config: &Config,
    count: u32,
    cancel: &CancelToken,
    sink: &dyn PresentationSink,
) -> Result<Vec<Account>> {
    if count == 0 || count > MAX_BATCH_SIZE {
        sink.append_log(&format!(
            "Please enter a number between 1 and {}.",
            MAX_BATCH_SIZE
        ));
        return Err(Error::InvalidCount(count));
    }

    sink.set_status("Starting...");
    info!(requested = count, "batch_starting");

    let domain = match resolve_domain(api).await {
        Ok(domain) => domain,
        Err(e) => {
            sink.append_log("Could not get a domain. Stopping.");
            sink.set_status("Generation failed");
            return Err(e);
        }
    };

    let mut accounts: Vec<Account> = Vec::with_capacity(count as usize);

    for i in 1..=count {
        if cancel.is_cancelled() {
            sink.append_log("Generation stopped by user.");
            break;
        }

        sink.append_log(&format!("--- Creating account {}/{} ---", i, count));
        info!(current = i, total = count, "batch_progress");

        match provision(api, config, &domain, cancel, sink).await {
            Ok(account) => {
                accounts.push(account);
                // Pacing between creations; deliberately not cancellable
                sleep(Duration::from_secs(config.account_pacing_secs)).await;
            }
            Err(Error::Cancelled) => {
                sink.append_log("Generation stopped by user.");
                break;
            }
            Err(e) => {
                sink.append_log(&format!("Failed to create account {}. Stopping.", i));
                sink.set_status("Generation failed");
                info!(error = %e, "batch_stopped_on_error");
                break;
            }
        }
    }

    if accounts.is_empty() {
        sink.append_log("No accounts were generated successfully.");
        sink.set_status("Nothing generated");
    } else {
        sink.append_log(&format!(
            "Generation finished. Total accounts: {}",
            accounts.len()
        ));
        let artifact = export_artifact(&accounts);
        sink.offer_download(&artifact.bytes, &artifact.filename);
        sink.set_status("Done");
    }

    info!(created = accounts.len(), requested = count, "batch_complete");
    Ok(accounts)
}
