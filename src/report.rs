//! Thread reports.
//!
//! Flattens a threaded forest of parsed emails into serializable summaries,
//! one per thread, listing every real message with its depth in the tree.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ThreaderError;
use crate::sync::parser::MailMetadata;
use crate::threading::ContainerId;
use crate::threading::ThreadForest;
use crate::threading::algorithm::tree_traversal::{
    collect_thread_members, find_first_real_message, render_tree, thread_starting_depth,
};

/// One message within a thread summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ThreadEntry {
    pub message_id: String,
    pub subject: String,
    pub from: String,
    pub date: Option<DateTime<Utc>>,
    /// Depth below the first real message level (0 for thread starters)
    pub depth: i32,
}

/// A complete thread, ready for output
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ThreadSummary {
    /// Normalized subject; empty for threads without a usable subject
    pub subject: String,

    /// Message-ID of the first real message in the thread
    pub root_message_id: Option<String>,

    pub message_count: usize,

    /// Messages in depth-first order
    pub messages: Vec<ThreadEntry>,
}

fn summarize_thread(
    forest: &ThreadForest<MailMetadata>,
    subject: &str,
    root: ContainerId,
) -> ThreadSummary {
    let root_message_id =
        find_first_real_message(forest, root).map(|(_, message)| message.message_id().to_string());

    let messages: Vec<ThreadEntry> =
        collect_thread_members(forest, root, thread_starting_depth(forest, root))
            .into_iter()
            .filter_map(|(id, depth)| {
                let message = forest.message(id)?;
                Some(ThreadEntry {
                    message_id: message.message_id().to_string(),
                    subject: message.subject.clone(),
                    from: message.payload.from.clone(),
                    date: message.payload.date,
                    depth,
                })
            })
            .collect();

    ThreadSummary {
        subject: subject.to_string(),
        root_message_id,
        message_count: messages.len(),
        messages,
    }
}

/// Summarize every thread: subject threads first, then roots without a subject
pub fn summarize(forest: &ThreadForest<MailMetadata>) -> Vec<ThreadSummary> {
    let keyed = forest
        .iter()
        .map(|(subject, root)| summarize_thread(forest, subject, root));
    let unsubjected = forest
        .unsubjected()
        .iter()
        .map(|&root| summarize_thread(forest, "", root));

    keyed.chain(unsubjected).collect()
}

/// Order every container's children by Date, undated messages first
pub fn sort_by_date(forest: &mut ThreadForest<MailMetadata>) {
    forest.sort_children_by(|a, b| {
        let date_a = a.message.as_ref().and_then(|m| m.payload.date);
        let date_b = b.message.as_ref().and_then(|m| m.payload.date);
        date_a.cmp(&date_b)
    });
}

/// Serialize summaries as JSON
pub fn write_json<W: Write>(
    summaries: &[ThreadSummary],
    writer: W,
    pretty: bool,
) -> Result<(), ThreaderError> {
    if pretty {
        serde_json::to_writer_pretty(writer, summaries)?;
    } else {
        serde_json::to_writer(writer, summaries)?;
    }
    Ok(())
}

/// Write the whole forest as outlines (`tree`) or as a JSON summary list
pub fn write_report<W: Write>(
    forest: &ThreadForest<MailMetadata>,
    mut writer: W,
    tree: bool,
    pretty: bool,
) -> Result<(), ThreaderError> {
    if tree {
        writer.write_all(render_forest(forest).as_bytes())?;
    } else {
        write_json(&summarize(forest), &mut writer, pretty)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render every thread as an indented outline, separated by blank lines
pub fn render_forest<P>(forest: &ThreadForest<P>) -> String {
    forest
        .roots()
        .map(|root| render_tree(forest, root))
        .collect::<Vec<_>>()
        .join("\n")
}
