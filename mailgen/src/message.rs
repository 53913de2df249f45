//! Message field extraction, body sanitizing, and code extraction.
//!
//! The body is HTML-escaped first and URL tokens are linkified afterwards,
//! on the escaped text. That ordering means no raw message content ever
//! reaches the rendered HTML, while each anchor's href is the original,
//! unescaped URL.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::api::types::Message;

/// Maximum length of an extracted verification code.
pub const MAX_CODE_LEN: usize = 6;

/// URL tokens inside already-escaped text. `&amp;`, `&lt;`, `&gt;` and
/// `&#x27;` may appear inside a URL; `&quot;` terminates it so an href can
/// never break out of its double-quoted attribute.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:&(?:amp|lt|gt|#x27);|[^\s&])+").expect("valid URL pattern")
});

/// Display fields of a message, with placeholders for anything missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFields {
    /// Sender address or `Unknown`.
    pub from: String,
    /// Subject or `(No Subject)`.
    pub subject: String,
    /// Date portion of the creation timestamp or `Unknown Date`.
    pub date: String,
    /// Raw body text or `No text content.`
    pub body: String,
}

/// Extract display fields, defaulting anything absent.
pub fn extract_fields(message: &Message) -> MessageFields {
    let from = message
        .from
        .as_ref()
        .map(|s| s.address.clone())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let subject = message
        .subject
        .clone()
        .unwrap_or_else(|| "(No Subject)".to_string());

    // Keep only the date part of the ISO timestamp
    let date = message
        .created_at
        .as_deref()
        .map(|d| d.split('T').next().unwrap_or(d).to_string())
        .unwrap_or_else(|| "Unknown Date".to_string());

    let body = message
        .text
        .clone()
        .unwrap_or_else(|| "No text content.".to_string());

    MessageFields {
        from,
        subject,
        date,
        body,
    }
}

/// HTML-escape `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_html(text: &str) -> String {
    // &amp; last so entity prefixes are not double-decoded
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Escape the whole text, then turn URL tokens into anchors.
///
/// The anchor's visible text stays escaped; its href is the unescaped URL.
pub fn sanitize_body(text: &str) -> String {
    let escaped = escape_html(text);

    URL_PATTERN
        .replace_all(&escaped, |caps: &Captures| {
            let visible = &caps[0];
            let href = unescape_html(visible);
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                href, visible
            )
        })
        .into_owned()
}

/// Strip every non-digit character from the subject and keep the first six
/// digits (fewer if that many are not present).
pub fn extract_code(subject: &str) -> String {
    subject
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_CODE_LEN)
        .collect()
}
