//! Conversation threading for mailing list archives.
//!
//! The [`threading`] module holds the JWZ threading engine. [`sync`] reads
//! mailboxes into threading input, and [`report`] turns the resulting forest
//! into JSON or plain-text outlines.

pub mod config;
pub mod error;
pub mod report;
pub mod sync;
pub mod threading;

pub use config::ThreaderConfig;
pub use error::{ThreaderError, ThreadingError};
pub use threading::{Message, ThreadForest, build_threads, normalize_subject};

use env_logger::Env;
use std::sync::Once;

static LOGGER: Once = Once::new();

/// Initialize `env_logger` once; later calls are no-ops
pub fn init_logger() {
    LOGGER.call_once(|| {
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .format_timestamp(None)
            .init();
    });
}
