//! Presentation sink - the external collaborator that receives text.
//!
//! The core never renders anything itself; it pushes log lines, status
//! updates, rendered messages, and export artifacts through this trait.

use tracing::{error, info};

/// Receives notifications and text from the core control loops.
///
/// Implementations must be cheap and non-blocking; the loops call these
/// methods inline.
pub trait PresentationSink: Send + Sync {
    /// Append one line to the running activity log.
    fn append_log(&self, line: &str);

    /// Replace the current status text.
    fn set_status(&self, text: &str);

    /// Render a fetched message. `safe_html_body` is already escaped and
    /// linkified.
    fn render_message(&self, from: &str, subject: &str, date: &str, safe_html_body: &str);

    /// Place text on the clipboard (or the closest available analog).
    fn copy_to_clipboard(&self, text: &str);

    /// Offer a generated artifact for download.
    fn offer_download(&self, bytes: &[u8], filename: &str);
}

/// Default sink forwarding everything to structured tracing events.
///
/// `offer_download` writes the artifact into the current directory, the
/// closest CLI analog to a browser download.
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn append_log(&self, line: &str) {
        info!(line = line, "ui_log");
    }

    fn set_status(&self, text: &str) {
        info!(status = text, "ui_status");
    }

    fn render_message(&self, from: &str, subject: &str, date: &str, safe_html_body: &str) {
        info!(
            from = from,
            subject = subject,
            date = date,
            body_length = safe_html_body.len(),
            "ui_message"
        );
    }

    fn copy_to_clipboard(&self, text: &str) {
        info!(text = text, "ui_clipboard");
    }

    fn offer_download(&self, bytes: &[u8], filename: &str) {
        match std::fs::write(filename, bytes) {
            Ok(()) => info!(
                filename = filename,
                byte_count = bytes.len(),
                "ui_download_written"
            ),
            Err(e) => error!(filename = filename, error = %e, "ui_download_write_failed"),
        }
    }
}
