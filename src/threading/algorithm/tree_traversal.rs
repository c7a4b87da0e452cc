//! Tree traversal utilities for email threading
//!
//! Functions for walking a finished thread forest to collect messages and find
//! real messages in dummy-rooted trees. All functions use iterative approaches
//! to avoid stack overflow on deeply nested threads.

use super::super::container::ContainerId;
use super::super::forest::ThreadForest;
use super::super::message::Message;

/// Find the first real (non-dummy) message in a subtree
///
/// Depth-first, children visited left to right. Returns `None` if the subtree
/// holds only dummies.
pub fn find_first_real_message<P>(
    forest: &ThreadForest<P>,
    root: ContainerId,
) -> Option<(ContainerId, &Message<P>)> {
    let mut search_stack = vec![root];

    while let Some(current) = search_stack.pop() {
        if let Some(message) = forest.message(current) {
            return Some((current, message));
        }

        // Add children in reverse order to maintain DFS left-to-right order
        search_stack.extend(forest.children(current).iter().rev().copied());
    }

    None
}

/// Collect all real messages in a thread with their depth values
///
/// Dummies are skipped but still count towards the depth of their children.
/// Start at `-1` for a dummy root so its children land at depth 0, or use
/// [`thread_starting_depth`] to pick automatically.
pub fn collect_thread_members<P>(
    forest: &ThreadForest<P>,
    root: ContainerId,
    starting_depth: i32,
) -> Vec<(ContainerId, i32)> {
    let mut collected_members = Vec::new();
    let mut traversal_stack = vec![(root, starting_depth)];

    while let Some((current, depth)) = traversal_stack.pop() {
        if !forest.container(current).is_dummy() {
            collected_members.push((current, depth));
        }

        for &child in forest.children(current).iter().rev() {
            traversal_stack.push((child, depth + 1));
        }
    }

    collected_members
}

/// Depth offset for a root: `-1` for a dummy head, `0` otherwise
pub fn thread_starting_depth<P>(forest: &ThreadForest<P>, root: ContainerId) -> i32 {
    if forest.container(root).is_dummy() { -1 } else { 0 }
}

/// Render a thread as an indented outline, one container per line
///
/// ```text
/// Hello
///   Re: Hello
///     Re: Hello
/// ```
pub fn render_tree<P>(forest: &ThreadForest<P>, root: ContainerId) -> String {
    let mut output = String::new();
    let mut traversal_stack = vec![(root, 0usize)];

    while let Some((current, depth)) = traversal_stack.pop() {
        let label = forest
            .message(current)
            .map(|m| m.subject.as_str())
            .unwrap_or("(dummy)");
        output.push_str(&format!("{:indent$}{}\n", "", label, indent = depth * 2));

        for &child in forest.children(current).iter().rev() {
            traversal_stack.push((child, depth + 1));
        }
    }

    output
}
