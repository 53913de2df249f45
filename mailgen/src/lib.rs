//! mailgen - disposable mail account generator and inbox watcher.
//!
//! This library provisions throwaway accounts against a mail.tm-style HTTP
//! API and watches a mailbox for an incoming message, extracting the
//! verification code from its subject.
//!
//! ## Architecture
//!
//! ```text
//! Session ─┬─ run_batch ── provision ── MailApi (HTTP)
//!          └─ login ───── poll ──────── MailApi (HTTP)
//! ```
//!
//! All control loops are cooperative: cancellation is observed at loop heads
//! and during waits, never mid-request. Presentation is an external
//! collaborator behind the [`PresentationSink`] trait.

pub mod api;
pub mod batch;
pub mod cancel;
pub mod config;
pub mod credentials;
pub mod error;
pub mod inbox;
pub mod message;
pub mod provision;
pub mod session;
pub mod sink;

// Re-export commonly used types
pub use api::types::{Account, AuthToken, Credentials, Message, MessageSummary};
pub use api::{CreateOutcome, HttpMailApi, MailApi};
pub use batch::{run_batch, ExportArtifact, MAX_BATCH_SIZE};
pub use cancel::CancelToken;
pub use config::Config;
pub use error::{Error, Result};
pub use session::Session;
pub use sink::{PresentationSink, TracingSink};
