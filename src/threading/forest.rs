//! The output of a threading run

use std::cmp::Ordering;

use super::algorithm::subject_consolidation::{Consolidation, SubjectTable};
use super::container::{Container, ContainerArena, ContainerId};
use super::message::Message;

/// Thread forest: every conversation tree, keyed by normalized subject.
///
/// The forest owns the container arena of the run, so handles obtained from
/// it stay valid for as long as the forest lives. Children are kept in the
/// order threading produced them; use [`ThreadForest::sort_children_by`] to
/// impose a display order.
#[derive(Debug, Clone)]
pub struct ThreadForest<P> {
    arena: ContainerArena<P>,
    threads: SubjectTable,
    unsubjected: Vec<ContainerId>,
}

impl<P> ThreadForest<P> {
    pub(crate) fn new(arena: ContainerArena<P>, consolidation: Consolidation) -> Self {
        ThreadForest {
            arena,
            threads: consolidation.threads,
            unsubjected: consolidation.unsubjected,
        }
    }

    /// Root container of the thread for a normalized subject
    pub fn get(&self, subject: &str) -> Option<ContainerId> {
        self.threads.get(subject).copied()
    }

    /// Normalized subjects in first-seen order
    pub fn subjects(&self) -> impl Iterator<Item = &str> + '_ {
        self.threads.keys().map(String::as_str)
    }

    /// `(normalized subject, root)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ContainerId)> + '_ {
        self.threads.iter().map(|(subject, &root)| (subject.as_str(), root))
    }

    /// Roots whose subject normalized to nothing; these are not in the subject map
    pub fn unsubjected(&self) -> &[ContainerId] {
        &self.unsubjected
    }

    /// Number of subject-keyed threads
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn container(&self, id: ContainerId) -> &Container<P> {
        &self.arena[id]
    }

    pub fn message(&self, id: ContainerId) -> Option<&Message<P>> {
        self.arena[id].message.as_ref()
    }

    pub fn children(&self, id: ContainerId) -> &[ContainerId] {
        self.arena[id].children()
    }

    /// Every root reachable from the forest: subject threads, then unsubjected roots
    pub fn roots(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.threads
            .values()
            .copied()
            .chain(self.unsubjected.iter().copied())
    }

    /// Count of real messages reachable from [`ThreadForest::roots`]
    pub fn message_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<ContainerId> = self.roots().collect();
        while let Some(id) = stack.pop() {
            let container = &self.arena[id];
            if !container.is_dummy() {
                count += 1;
            }
            stack.extend(container.children().iter().copied());
        }
        count
    }

    /// Reorder the children of every container, e.g. by date
    pub fn sort_children_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Container<P>, &Container<P>) -> Ordering,
    {
        self.arena.sort_children_by(compare);
    }
}
