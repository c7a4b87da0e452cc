//! Mailbox ingestion.
//!
//! Produces threading input from raw mail archives:
//!
//! - **`mbox`**: splits mbox files into individual messages
//! - **`parser`**: extracts Message-ID, References, In-Reply-To, Subject and
//!   display metadata from each message's headers
//!
//! Entries that cannot be threaded (no Message-ID) are logged and skipped, so
//! a single malformed message never aborts a whole mailbox.

pub mod mbox;
pub mod parser;

pub use mbox::read_mbox;
pub use parser::{MailMetadata, ParseEmailError, parse_email};
