//! Email header parsing.
//!
//! Turns raw RFC 5322 messages into threading [`Message`]s. Only the headers are
//! read, using the `mailparse` crate; bodies are never decoded.
//!
//! # Threading Fields
//!
//! - **Message-ID**: first `<...>` group of the header (required)
//! - **References**: every `<...>` group, duplicates dropped, oldest first
//! - **In-Reply-To**: first `<...>` group, appended to the references when the
//!   References header did not already name it
//! - **Subject**: header value, or a configurable placeholder when absent
//!
//! # Error Handling
//!
//! Messages without a usable Message-ID cannot be threaded and are rejected
//! with [`ParseEmailError::MissingMessageId`]. A missing or unparseable Date is
//! not an error; the date is only used for optional display ordering.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use mailparse::{MailHeaderMap, parse_headers};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::threading::Message;

/// Subject used when a message carries no Subject header
pub const DEFAULT_SUBJECT: &str = "No subject";

/// Caller payload attached to every parsed message
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MailMetadata {
    /// Raw From header
    pub from: String,

    /// Date header, if present and parseable
    pub date: Option<DateTime<Utc>>,

    /// Message-ID named by In-Reply-To
    pub in_reply_to: Option<String>,
}

/// Errors that can be returned while extracting threading headers.
#[derive(Debug, Error)]
pub enum ParseEmailError {
    #[error("failed to parse headers: {0}")]
    HeaderParse(#[from] mailparse::MailParseError),
    #[error("missing Message-ID header")]
    MissingMessageId,
}

/// Lazy-initialized regex for `<message-id>` tokens
static MSGID_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_msgid_regex() -> &'static Regex {
    MSGID_REGEX.get_or_init(|| Regex::new(r"<([^>]+)>").expect("Invalid message-id regex"))
}

/// Sanitize text by removing NUL bytes and surrounding whitespace
fn sanitize_text(text: &str) -> String {
    text.replace('\0', "").trim().to_string()
}

/// First bracketed message ID in a header value
fn extract_message_id(header_value: &str) -> Option<String> {
    get_msgid_regex()
        .captures(header_value)
        .and_then(|caps| caps.get(1))
        .map(|m| sanitize_text(m.as_str()))
        .filter(|id| !id.is_empty())
}

/// All bracketed message IDs in a header value, in order
fn extract_references(header_value: &str) -> Vec<String> {
    get_msgid_regex()
        .captures_iter(header_value)
        .filter_map(|caps| caps.get(1))
        .map(|m| sanitize_text(m.as_str()))
        .filter(|id| !id.is_empty())
        .collect()
}

/// Parse a Date header into UTC, `None` if it cannot be understood
fn parse_date(raw: &str, message_id: &str) -> Option<DateTime<Utc>> {
    if raw.trim().is_empty() {
        return None;
    }
    match mailparse::dateparse(raw) {
        Ok(timestamp) => DateTime::from_timestamp(timestamp, 0),
        Err(err) => {
            log::debug!("email {} has invalid date `{}`: {}", message_id, raw, err);
            None
        }
    }
}

/// Parse a raw email into a threading message.
///
/// # Arguments
///
/// - `raw`: Raw email bytes (RFC 5322); only the header block is read
/// - `default_subject`: Subject to use when the header is missing
///
/// # Returns
///
/// - `Ok(Message)`: threading fields plus [`MailMetadata`] as payload
/// - `Err(...)`: header block could not be parsed or no Message-ID was found
pub fn parse_email(
    raw: &[u8],
    default_subject: &str,
) -> Result<Message<MailMetadata>, ParseEmailError> {
    let (headers, _body_offset) = parse_headers(raw).map_err(|e| {
        log::debug!("failed to parse headers: {}", e);
        ParseEmailError::HeaderParse(e)
    })?;

    let message_id = headers
        .get_first_value("Message-ID")
        .and_then(|value| extract_message_id(&value))
        .ok_or_else(|| {
            log::debug!("missing Message-ID header");
            ParseEmailError::MissingMessageId
        })?;

    let subject = headers
        .get_first_value("Subject")
        .map(|s| sanitize_text(&s))
        .unwrap_or_else(|| default_subject.to_string());

    let mut references = headers
        .get_first_value("References")
        .map(|v| extract_references(&v))
        .unwrap_or_default();

    let in_reply_to = headers
        .get_first_value("In-Reply-To")
        .and_then(|v| extract_message_id(&v));
    if let Some(parent) = &in_reply_to {
        if !references.contains(parent) {
            references.push(parent.clone());
        }
    }

    let date = headers
        .get_first_value("Date")
        .and_then(|raw_date| parse_date(&raw_date, &message_id));

    let from = headers
        .get_first_value("From")
        .map(|v| sanitize_text(&v))
        .unwrap_or_default();

    log::trace!("parsed: {} - {}", message_id, subject);

    let metadata = MailMetadata {
        from,
        date,
        in_reply_to,
    };

    Message::new(message_id, subject, references, metadata)
        .map_err(|_| ParseEmailError::MissingMessageId)
}
