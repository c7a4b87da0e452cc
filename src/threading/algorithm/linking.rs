//! Identity resolution and reference linking
//!
//! Builds the container tree from the References chains of the input messages.
//! The identifier table is insertion ordered so the resulting root set, and
//! everything derived from it, is reproducible for a given input order.

use indexmap::IndexMap;

use super::super::container::{ContainerArena, ContainerId};
use super::super::message::Message;
use super::cycle_detection::would_create_cycle;

/// Message-ID → container, alive only while linking
type IdTable = IndexMap<String, ContainerId>;

/// Link all messages and return the arena together with its root set
///
/// ## Algorithm
///
/// For every message, in input order:
/// 1. Find or create the container for its Message-ID and store the message
///    in it (a later duplicate replaces an earlier one)
/// 2. Link each adjacent pair of references as parent → child, creating dummy
///    containers for identifiers not seen yet
/// 3. Link the last reference as the parent of this message
///
/// Links that would make a container its own ancestor are skipped.
pub fn link_messages<P>(messages: Vec<Message<P>>) -> (ContainerArena<P>, Vec<ContainerId>) {
    let mut arena = ContainerArena::new();
    let mut id_table = IdTable::new();

    for message in messages {
        link_message(&mut arena, &mut id_table, message);
    }

    let root_set = identify_thread_roots(&arena, &id_table);

    log::debug!(
        "linked {} containers ({} identifiers), {} roots",
        arena.len(),
        id_table.len(),
        root_set.len()
    );

    (arena, root_set)
}

/// Find the container registered for `message_id`, creating a dummy if needed
fn lookup_or_create<P>(
    arena: &mut ContainerArena<P>,
    id_table: &mut IdTable,
    message_id: &str,
) -> ContainerId {
    if let Some(&id) = id_table.get(message_id) {
        return id;
    }
    let id = arena.new_container(None);
    id_table.insert(message_id.to_string(), id);
    id
}

/// Place a single message into the container tree
///
/// ## Example
///
/// ```text
/// Message C has References: <A> <B>
///
/// Creates links:
///   A (parent) → B (child)
///   B (parent) → C (child)
/// ```
fn link_message<P>(arena: &mut ContainerArena<P>, id_table: &mut IdTable, message: Message<P>) {
    let this = lookup_or_create(arena, id_table, message.message_id());

    let reference_ids: Vec<ContainerId> = message
        .references()
        .iter()
        .map(|reference| lookup_or_create(arena, id_table, reference))
        .collect();

    if let Some(previous) = arena[this].message.replace(message) {
        log::debug!(
            "duplicate Message-ID {}, keeping the last occurrence",
            previous.message_id()
        );
    }

    // Build the reference chain: refs[0] → refs[1] → ... → refs[n-1]
    let mut previous_reference: Option<ContainerId> = None;
    for &reference in &reference_ids {
        if let Some(parent) = previous_reference {
            if reference == this || would_create_cycle(arena, parent, reference) {
                log::trace!(
                    "skipping reference link {:?} -> {:?}: would create a loop",
                    parent,
                    reference
                );
                continue;
            }
            arena.add_child(parent, reference);
        }
        previous_reference = Some(reference);
    }

    // Link the last reference to this message
    if let Some(parent) = previous_reference {
        if would_create_cycle(arena, parent, this) {
            log::trace!(
                "skipping parent link {:?} -> {:?}: would create a loop",
                parent,
                this
            );
        } else {
            arena.add_child(parent, this);
        }
    }
}

/// Find all thread roots (containers with no parent), in identifier-table order
fn identify_thread_roots<P>(arena: &ContainerArena<P>, id_table: &IdTable) -> Vec<ContainerId> {
    id_table
        .values()
        .copied()
        .filter(|&id| arena[id].parent().is_none())
        .collect()
}
