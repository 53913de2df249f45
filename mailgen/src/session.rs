//! Command surface over the control loops.
//!
//! A [`Session`] owns the single active job slot: at most one generation
//! batch or one poll session runs at a time, and starting a new one cancels
//! whatever is outstanding (a shared stop signal). Each job runs as one
//! spawned task and is the sole writer of its results.

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::MailApi;
use crate::batch::run_batch;
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::inbox;
use crate::message;
use crate::sink::PresentationSink;

struct ActiveJob {
    cancel: CancelToken,
    handle: Option<JoinHandle<()>>,
}

/// One user session: command entry points plus the active-job slot.
pub struct Session {
    api: Arc<dyn MailApi>,
    config: Arc<Config>,
    sink: Arc<dyn PresentationSink>,
    active: Mutex<Option<ActiveJob>>,
    last_code: Arc<StdMutex<Option<String>>>,
}

impl Session {
    /// Create a session over the given API client and presentation sink.
    pub fn new(api: Arc<dyn MailApi>, config: Config, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            api,
            config: Arc::new(config),
            sink,
            active: Mutex::new(None),
            last_code: Arc::new(StdMutex::new(None)),
        }
    }

    /// Start a generation batch, cancelling any outstanding job first.
    ///
    /// Returns immediately; the batch runs in a spawned task.
    pub async fn start_batch(&self, count: u32) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.cancel.cancel();
            info!("session_previous_job_cancelled");
        }

        let cancel = CancelToken::new();
        let job_cancel = cancel.clone();
        let api = Arc::clone(&self.api);
        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);

        let handle = tokio::spawn(async move {
            if let Err(e) = run_batch(api.as_ref(), &config, count, &job_cancel, sink.as_ref()).await
            {
                warn!(error = %e, "batch_job_failed");
            }
        });

        info!(count = count, "session_batch_started");
        *active = Some(ActiveJob {
            cancel,
            handle: Some(handle),
        });
    }

    /// Request a stop of the active job.
    ///
    /// Cooperative: the job finishes its in-flight request before stopping.
    pub async fn stop_batch(&self) {
        let active = self.active.lock().await;
        if let Some(job) = active.as_ref() {
            self.sink
                .append_log("! Stop request received. Finishing current task...");
            job.cancel.cancel();
            info!("session_stop_requested");
        }
    }

    /// Log in to an account and poll its inbox until a message arrives,
    /// cancelling any outstanding job first.
    ///
    /// Returns immediately; on a found message the sink renders it and the
    /// code extracted from its subject is stored and copied.
    pub async fn start_login(&self, address: String, password: String) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.cancel.cancel();
            info!("session_previous_job_cancelled");
        }

        let cancel = CancelToken::new();
        let job_cancel = cancel.clone();
        let api = Arc::clone(&self.api);
        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);
        let last_code = Arc::clone(&self.last_code);

        let handle = tokio::spawn(async move {
            sink.set_status("Logging in...");

            let token = match inbox::login(api.as_ref(), &address, &password).await {
                Ok(token) => token,
                Err(e) => {
                    sink.set_status(&format!("Login failed: {}", e));
                    return;
                }
            };

            match inbox::poll(api.as_ref(), &config, &token, &job_cancel, sink.as_ref()).await {
                Ok(found) => {
                    let fields = message::extract_fields(&found);
                    let safe_body = message::sanitize_body(&fields.body);
                    sink.render_message(&fields.from, &fields.subject, &fields.date, &safe_body);

                    let code = message::extract_code(&fields.subject);
                    if code.is_empty() {
                        sink.set_status("Message received, no code in subject");
                    } else {
                        sink.copy_to_clipboard(&code);
                        sink.set_status(&format!("Verification code: {}", code));
                        *last_code.lock().expect("code slot poisoned") = Some(code);
                    }
                }
                // Poll only ends in a found message or cancellation
                Err(_) => sink.set_status("Stopped"),
            }
        });

        info!("session_login_started");
        *active = Some(ActiveJob {
            cancel,
            handle: Some(handle),
        });
    }

    /// Wait for the active job's task to finish.
    ///
    /// The cancellation token stays in the slot, so `stop_batch` keeps
    /// working while someone is joined on the job.
    pub async fn join(&self) {
        let handle = {
            let mut active = self.active.lock().await;
            active.as_mut().and_then(|job| job.handle.take())
        };

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "session_job_panicked");
            }
        }
    }

    /// The verification code from the most recent found message, if any.
    pub fn last_code(&self) -> Option<String> {
        self.last_code.lock().expect("code slot poisoned").clone()
    }
}
