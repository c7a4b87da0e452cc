//! Removal of empty dummy containers
//!
//! After linking, dummies stand in for every referenced-but-missing message.
//! Most of them carry no useful structure and are collapsed here:
//!
//! - a dummy with no children is dropped
//! - a dummy with a single child, or any non-root dummy, is replaced by its
//!   children
//! - a root dummy with several children stays as a synthetic thread head
//!
//! Children are processed before their parent, so a parent always sees the
//! already-pruned shape of its subtree.

use std::collections::HashMap;

use super::super::container::{ContainerArena, ContainerId};

/// Prune every root and return the new root set, preserving root order
pub fn prune_root_set<P>(arena: &mut ContainerArena<P>, root_set: &[ContainerId]) -> Vec<ContainerId> {
    let pruned: Vec<ContainerId> = root_set
        .iter()
        .flat_map(|&root| prune_container(arena, root))
        .collect();

    log::debug!(
        "pruned {} roots down to {} roots",
        root_set.len(),
        pruned.len()
    );

    pruned
}

/// Prune the tree rooted at `root` and return the containers that replace it
///
/// Uses an explicit post-order (reversed pre-order) walk instead of recursion
/// so that very long reply chains cannot overflow the stack.
pub fn prune_container<P>(arena: &mut ContainerArena<P>, root: ContainerId) -> Vec<ContainerId> {
    // Pre-order: every node is listed before its descendants
    let mut pre_order = Vec::new();
    let mut traversal_stack = vec![root];
    while let Some(current) = traversal_stack.pop() {
        pre_order.push(current);
        traversal_stack.extend(arena[current].children().iter().copied());
    }

    let mut replacements: HashMap<ContainerId, Vec<ContainerId>> = HashMap::new();
    for &current in pre_order.iter().rev() {
        let replacement = prune_node(arena, current, &mut replacements);
        replacements.insert(current, replacement);
    }

    replacements.remove(&root).unwrap_or_default()
}

/// Apply the pruning rules to a single node whose children are already pruned
fn prune_node<P>(
    arena: &mut ContainerArena<P>,
    node: ContainerId,
    replacements: &mut HashMap<ContainerId, Vec<ContainerId>>,
) -> Vec<ContainerId> {
    // Swap every child for whatever its own pruning produced
    for child in arena.take_children(node) {
        for replacement in replacements.remove(&child).unwrap_or_default() {
            arena.add_child(node, replacement);
        }
    }

    if !arena[node].is_dummy() {
        return vec![node];
    }

    let child_count = arena[node].children().len();
    let is_root = arena[node].parent().is_none();

    match child_count {
        // Empty dummy: drop it
        0 => Vec::new(),
        // Single child, or nested dummy: promote the children
        1 => arena.take_children(node),
        _ if !is_root => arena.take_children(node),
        // Root dummy with several children: keep as thread head
        _ => vec![node],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::message::Message;

    fn real(arena: &mut ContainerArena<()>, id: &str) -> ContainerId {
        arena.new_container(Some(Message::new(id, "Test", Vec::new(), ()).unwrap()))
    }

    #[test]
    fn test_real_leaf_is_kept() {
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a");
        assert_eq!(prune_container(&mut arena, a), vec![a]);
    }

    #[test]
    fn test_empty_dummy_is_dropped() {
        let mut arena: ContainerArena<()> = ContainerArena::new();
        let d = arena.new_container(None);
        assert!(prune_container(&mut arena, d).is_empty());
    }

    #[test]
    fn test_root_dummy_with_single_child_is_promoted() {
        let mut arena = ContainerArena::new();
        let d = arena.new_container(None);
        let x = real(&mut arena, "x");
        arena.add_child(d, x);

        let result = prune_container(&mut arena, d);

        assert_eq!(result, vec![x]);
        assert_eq!(arena[x].parent(), None);
    }

    #[test]
    fn test_root_dummy_with_many_children_is_kept() {
        let mut arena = ContainerArena::new();
        let d = arena.new_container(None);
        let x = real(&mut arena, "x");
        let y = real(&mut arena, "y");
        arena.add_child(d, x);
        arena.add_child(d, y);

        let result = prune_container(&mut arena, d);

        assert_eq!(result, vec![d]);
        assert_eq!(arena[d].children(), &[x, y]);
    }

    #[test]
    fn test_nested_dummy_children_are_promoted_in_place() {
        // a → dummy → (b, c) becomes a → (b, c)
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a");
        let d = arena.new_container(None);
        let b = real(&mut arena, "b");
        let c = real(&mut arena, "c");
        arena.add_child(a, d);
        arena.add_child(d, b);
        arena.add_child(d, c);

        let result = prune_container(&mut arena, a);

        assert_eq!(result, vec![a]);
        assert_eq!(arena[a].children(), &[b, c]);
        assert_eq!(arena[b].parent(), Some(a));
    }

    #[test]
    fn test_chain_of_dummies_collapses() {
        // d1 → d2 → d3 → x collapses to x
        let mut arena = ContainerArena::new();
        let d1 = arena.new_container(None);
        let d2 = arena.new_container(None);
        let d3 = arena.new_container(None);
        let x = real(&mut arena, "x");
        arena.add_child(d1, d2);
        arena.add_child(d2, d3);
        arena.add_child(d3, x);

        assert_eq!(prune_container(&mut arena, d1), vec![x]);
    }

    #[test]
    fn test_dummy_leaf_under_real_message_is_removed() {
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a");
        let d = arena.new_container(None);
        arena.add_child(a, d);

        assert_eq!(prune_container(&mut arena, a), vec![a]);
        assert!(arena[a].children().is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut arena = ContainerArena::new();
        let root = real(&mut arena, "0");
        let mut previous = root;
        for i in 1..100_000 {
            let next = real(&mut arena, &i.to_string());
            arena.add_child(previous, next);
            previous = next;
        }

        assert_eq!(prune_container(&mut arena, root), vec![root]);
    }
}
