use std::path::PathBuf;

use thiserror::Error;

/// Precondition failures raised while constructing threading input.
///
/// Everything past construction is infallible: duplicate ids, unseen
/// references and would-be cycles are all handled structurally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThreadingError {
    #[error("message is missing a Message-ID")]
    MissingMessageId,
}

/// Errors surfaced by the mailbox-to-report pipeline.
#[derive(Debug, Error)]
pub enum ThreaderError {
    #[error("failed to read mailbox {path}: {source}")]
    ReadMailbox {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize thread report: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThreaderError {
    pub fn read_mailbox(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ThreaderError::ReadMailbox {
            path: path.into(),
            source,
        }
    }
}
