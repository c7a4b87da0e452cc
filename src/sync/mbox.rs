//! Mailbox (mbox) reading.
//!
//! Splits an mbox file into individual messages and parses each one into a
//! threading [`Message`]. Messages are returned in file order, which is the
//! order the threading run will consider them in.
//!
//! # Format
//!
//! A message starts at a `From ` separator line at the beginning of the file
//! or directly after a blank line. The separator itself is not part of the
//! message. Archives are read as mboxrd by default, where body lines quoted as
//! `>From ` lose one `>`. With [`ThreaderConfig::mboxrd`] off (mboxo) quoted
//! lines are kept as written, since mboxo quoting cannot be reversed.

use std::path::Path;

use crate::config::ThreaderConfig;
use crate::error::ThreaderError;
use crate::threading::Message;

use super::parser::{MailMetadata, parse_email};

const SEPARATOR: &[u8] = b"From ";

fn is_blank_line(line: &[u8]) -> bool {
    line == b"\n" || line == b"\r\n"
}

/// Undo mboxrd quoting: `>>From ` becomes `>From `
fn unescape_from_line(line: &[u8]) -> &[u8] {
    let quote_depth = line.iter().take_while(|&&b| b == b'>').count();
    if quote_depth > 0 && line[quote_depth..].starts_with(SEPARATOR) {
        &line[1..]
    } else {
        line
    }
}

/// Split raw mbox contents into raw messages
///
/// Anything before the first separator line is ignored. `unquote_from`
/// selects mboxrd un-quoting of `>From ` body lines.
pub fn split_mbox(data: &[u8], unquote_from: bool) -> Vec<Vec<u8>> {
    let mut messages = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut previous_blank = true;

    for line in data.split_inclusive(|&b| b == b'\n') {
        if previous_blank && line.starts_with(SEPARATOR) {
            if let Some(message) = current.take() {
                messages.push(message);
            }
            current = Some(Vec::new());
            previous_blank = false;
            continue;
        }

        previous_blank = is_blank_line(line);
        if let Some(message) = current.as_mut() {
            if unquote_from {
                message.extend_from_slice(unescape_from_line(line));
            } else {
                message.extend_from_slice(line);
            }
        }
    }

    if let Some(message) = current {
        messages.push(message);
    }

    messages
}

/// Parse every message in mbox contents, skipping those that cannot be threaded
pub fn parse_mbox(data: &[u8], config: &ThreaderConfig) -> Vec<Message<MailMetadata>> {
    let raw_messages = split_mbox(data, config.mboxrd);
    let total = raw_messages.len();

    let messages: Vec<Message<MailMetadata>> = raw_messages
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match parse_email(raw, &config.default_subject) {
            Ok(message) => Some(message),
            Err(err) => {
                log::warn!("skipping mbox entry {}: {}", index, err);
                None
            }
        })
        .collect();

    if messages.len() < total {
        log::info!(
            "parsed {} of {} mbox entries ({} skipped)",
            messages.len(),
            total,
            total - messages.len()
        );
    }

    messages
}

/// Read and parse an mbox file
pub fn read_mbox(
    path: impl AsRef<Path>,
    config: &ThreaderConfig,
) -> Result<Vec<Message<MailMetadata>>, ThreaderError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| ThreaderError::read_mailbox(path, e))?;

    let messages = parse_mbox(&data, config);
    log::info!("read {} messages from {}", messages.len(), path.display());

    Ok(messages)
}
