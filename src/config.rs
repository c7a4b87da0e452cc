use std::env;

use crate::sync::parser::DEFAULT_SUBJECT;

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Runtime configuration for mailbox threading and reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreaderConfig {
    /// Subject given to messages without a Subject header
    pub default_subject: String,
    /// Order replies by Date before writing output
    pub sort_by_date: bool,
    /// Indent JSON output
    pub pretty_json: bool,
    /// Treat mailboxes as mboxrd and un-quote `>From ` body lines
    pub mboxrd: bool,
}

impl ThreaderConfig {
    pub fn from_env() -> Self {
        Self {
            default_subject: env_string("THREADER_DEFAULT_SUBJECT", DEFAULT_SUBJECT),
            sort_by_date: env_bool("THREADER_SORT_BY_DATE", false),
            pretty_json: env_bool("THREADER_PRETTY_JSON", true),
            mboxrd: env_bool("THREADER_MBOXRD", true),
        }
    }
}

impl Default for ThreaderConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
