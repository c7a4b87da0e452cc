//! Cycle detection for email threading
//!
//! Ensures that parent-child relationships don't create cycles in the thread tree.
//! A cycle would occur if we tried to make a container a child of one of its own
//! descendants.

use std::collections::HashSet;

use super::super::container::{ContainerArena, ContainerId};

/// Check whether `target` is `ancestor` or one of its descendants
///
/// ## Algorithm
///
/// Iterative depth-first search downwards from `ancestor` with an explicit
/// stack and a visited set. The visited set makes the search terminate even if
/// the arena somehow already contains a cycle.
///
/// ## Example
///
/// ```text
/// Current tree:  A → B → C
///
/// has_descendant(A, C) → true
/// has_descendant(C, A) → false
/// ```
pub fn has_descendant<P>(
    arena: &ContainerArena<P>,
    ancestor: ContainerId,
    target: ContainerId,
) -> bool {
    let mut search_stack = vec![ancestor];
    let mut visited = HashSet::new();

    while let Some(current) = search_stack.pop() {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }

        for &child in arena[current].children() {
            if !visited.contains(&child) {
                search_stack.push(child);
            }
        }
    }

    false
}

/// Check if linking `child` under `parent` would break the tree
///
/// Returns `true` when the two handles are the same container, or when `child`
/// is already an ancestor of `parent`.
pub fn would_create_cycle<P>(
    arena: &ContainerArena<P>,
    parent: ContainerId,
    child: ContainerId,
) -> bool {
    parent == child || has_descendant(arena, child, parent)
}
