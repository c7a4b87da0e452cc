//! The unit being threaded.

use crate::error::ThreadingError;

/// A message to be threaded.
///
/// Only `message_id`, `references` and `subject` influence threading. The
/// `payload` belongs to the caller and is carried through untouched, so it can
/// hold a parsed email, a database row id, or anything else worth keeping next
/// to the message in the output forest.
///
/// The Message-ID and reference chain are only set through [`Message::new`],
/// so they always satisfy its checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<P> {
    /// Subject line as it appeared on the message
    pub subject: String,

    message_id: String,

    references: Vec<String>,

    /// Caller data, opaque to the threading engine
    pub payload: P,
}

impl<P> Message<P> {
    /// Create a message, enforcing the non-empty Message-ID precondition.
    ///
    /// Duplicate references are dropped, keeping the first occurrence of each.
    pub fn new(
        message_id: impl Into<String>,
        subject: impl Into<String>,
        references: impl IntoIterator<Item = String>,
        payload: P,
    ) -> Result<Self, ThreadingError> {
        let message_id = message_id.into();
        if message_id.trim().is_empty() {
            return Err(ThreadingError::MissingMessageId);
        }

        Ok(Message {
            subject: subject.into(),
            message_id,
            references: unique_in_order(references),
            payload,
        })
    }

    /// Message-ID without angle brackets; never empty
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Reference chain, oldest ancestor first, immediate parent last.
    /// Unique, in first-seen order.
    pub fn references(&self) -> &[String] {
        &self.references
    }
}

/// Drop repeated identifiers while preserving first-seen order.
pub(crate) fn unique_in_order(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
