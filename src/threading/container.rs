//! Container data structures for the JWZ threading algorithm
//!
//! The JWZ algorithm uses a "container" abstraction to represent both real messages
//! and "dummy" messages (identifiers that are referenced but never seen).
//!
//! Containers live in a [`ContainerArena`] and point at each other through
//! [`ContainerId`] handles, so detaching and re-attaching subtrees never leaves
//! a dangling reference behind.

use std::ops::{Index, IndexMut};

use super::algorithm::cycle_detection;
use super::message::Message;

/// Stable handle to a container inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(usize);

/// A container represents a node in the thread tree.
///
/// Each container has:
/// - An optional message (None for dummy containers)
/// - An optional parent handle
/// - An ordered list of children
///
/// ## Dummy Containers
///
/// Dummies are created for identifiers that appear in a References chain but
/// whose message is not part of the input. They hold the structural position so
/// that siblings replying to the same missing message still end up together.
#[derive(Debug, Clone)]
pub struct Container<P> {
    /// The message held by this node, `None` for dummies
    pub message: Option<Message<P>>,

    /// Owning parent, `None` for roots
    parent: Option<ContainerId>,

    /// Child handles in insertion order
    children: Vec<ContainerId>,
}

impl<P> Container<P> {
    fn new(message: Option<Message<P>>) -> Self {
        Container {
            message,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.message.is_none()
    }

    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn children(&self) -> &[ContainerId] {
        &self.children
    }

    /// Message-ID of the held message, if any
    pub fn message_id(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.message_id())
    }
}

/// Owner of every container created during one threading run.
///
/// All parent/child mutation goes through the arena so the back-reference and
/// the child list are always updated together: if `c.parent() == Some(p)` then
/// `c` appears exactly once in `p.children()`.
#[derive(Debug, Clone)]
pub struct ContainerArena<P> {
    containers: Vec<Container<P>>,
}

impl<P> Default for ContainerArena<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ContainerArena<P> {
    pub fn new() -> Self {
        ContainerArena {
            containers: Vec::new(),
        }
    }

    /// Allocate a detached container, a dummy when `message` is `None`
    pub fn new_container(&mut self, message: Option<Message<P>>) -> ContainerId {
        let id = ContainerId(self.containers.len());
        self.containers.push(Container::new(message));
        id
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// The child is detached from its previous parent first. The caller is
    /// responsible for making sure the link does not close a cycle (see
    /// [`ContainerArena::has_descendant`]).
    pub fn add_child(&mut self, parent: ContainerId, child: ContainerId) {
        if let Some(old_parent) = self[child].parent {
            self.remove_child(old_parent, child);
        }
        self[parent].children.push(child);
        self[child].parent = Some(parent);
    }

    /// Detach `child` from `parent`; a no-op if it is not a child of `parent`
    pub fn remove_child(&mut self, parent: ContainerId, child: ContainerId) {
        let children = &mut self[parent].children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
            self[child].parent = None;
        }
    }

    /// Detach and return all children of `id`, preserving their order
    pub fn take_children(&mut self, id: ContainerId) -> Vec<ContainerId> {
        let children = std::mem::take(&mut self[id].children);
        for &child in &children {
            self[child].parent = None;
        }
        children
    }

    /// True if `target` is `ancestor` itself or reachable from it via children
    pub fn has_descendant(&self, ancestor: ContainerId, target: ContainerId) -> bool {
        cycle_detection::has_descendant(self, ancestor, target)
    }

    /// Sort the children of every container with `compare`
    pub fn sort_children_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Container<P>, &Container<P>) -> std::cmp::Ordering,
    {
        for idx in 0..self.containers.len() {
            let mut children = std::mem::take(&mut self.containers[idx].children);
            children.sort_by(|&a, &b| compare(&self[a], &self[b]));
            self.containers[idx].children = children;
        }
    }
}

impl<P> Index<ContainerId> for ContainerArena<P> {
    type Output = Container<P>;

    fn index(&self, id: ContainerId) -> &Self::Output {
        &self.containers[id.0]
    }
}

impl<P> IndexMut<ContainerId> for ContainerArena<P> {
    fn index_mut(&mut self, id: ContainerId) -> &mut Self::Output {
        &mut self.containers[id.0]
    }
}
