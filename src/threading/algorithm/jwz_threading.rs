//! Core JWZ (Jamie Zawinski) threading algorithm implementation
//!
//! Implements the standard email threading algorithm as described at:
//! https://www.jwz.org/doc/threading.html
//!
//! ## Algorithm Overview
//!
//! 1. **Link References**: Build containers and parent-child relationships from
//!    each message's reference chain
//! 2. **Find Roots**: Identify containers with no parent (thread roots)
//! 3. **Prune**: Collapse dummy containers that carry no structure
//! 4. **Group by Subject**: Merge roots that share a normalized subject
//!
//! The whole run is single threaded and deterministic for a given input order.

use super::super::forest::ThreadForest;
use super::super::message::Message;
use super::linking::link_messages;
use super::pruning::prune_root_set;
use super::subject_consolidation::consolidate_by_subject;

/// Build email threads using the JWZ algorithm
///
/// This is the main entry point for threading. Takes messages in the order
/// they should be considered (later duplicates of a Message-ID replace earlier
/// ones) and returns the forest of conversations keyed by normalized subject.
///
/// ## Arguments
///
/// * `messages` - Messages to thread, each with a non-empty Message-ID
///
/// ## Returns
///
/// A [`ThreadForest`] owning every container; children are left in threading
/// order for the caller to sort.
pub fn build_threads<P>(messages: Vec<Message<P>>) -> ThreadForest<P> {
    let message_count = messages.len();

    // Steps 1-2: link references and find the root set
    let (mut arena, root_set) = link_messages(messages);

    // Step 3: prune empty dummies
    let root_set = prune_root_set(&mut arena, &root_set);

    // Step 4: group roots by subject
    let consolidation = consolidate_by_subject(&mut arena, &root_set);

    log::debug!(
        "threaded {} messages into {} subject threads ({} unsubjected roots)",
        message_count,
        consolidation.threads.len(),
        consolidation.unsubjected.len()
    );

    ThreadForest::new(arena, consolidation)
}
