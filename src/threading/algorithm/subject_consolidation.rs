//! Subject-based merging of thread roots
//!
//! Replies written by clients that drop the References header end up as roots
//! of their own. Roots whose subjects agree once reply markers and list tags
//! are stripped are merged here into a single thread per subject.

use std::cmp::Ordering;

use indexmap::IndexMap;

use super::super::container::{ContainerArena, ContainerId};
use super::super::subject_matching::root_subject_key;

/// Normalized subject → representative root
pub type SubjectTable = IndexMap<String, ContainerId>;

/// Result of consolidating a root set
#[derive(Debug, Clone, Default)]
pub struct Consolidation {
    /// One root per normalized subject, in first-seen subject order
    pub threads: SubjectTable,

    /// Roots whose subject normalized to an empty string; never merged
    pub unsubjected: Vec<ContainerId>,
}

/// Merge roots that share a normalized subject
///
/// ## Algorithm
///
/// 1. Pick a representative per subject: a real message wins over a dummy,
///    and between real messages the one with the shorter Message-ID wins
///    (fewer accumulated reply markers in practice); ties keep the earlier root
/// 2. Merge every other root with that subject into the representative
///
/// Whichever container ends up adopting the other becomes the subject's
/// representative, so every value in the table stays a root.
pub fn consolidate_by_subject<P>(
    arena: &mut ContainerArena<P>,
    root_set: &[ContainerId],
) -> Consolidation {
    let keyed_roots: Vec<(ContainerId, Option<String>)> = root_set
        .iter()
        .map(|&root| (root, root_subject_key(arena, root)))
        .collect();

    let mut threads = SubjectTable::new();
    let mut unsubjected = Vec::new();

    // First pass: choose one representative per subject
    for (root, key) in &keyed_roots {
        let Some(key) = key else {
            unsubjected.push(*root);
            continue;
        };

        let replace = match threads.get(key) {
            None => true,
            Some(&existing) => is_better_representative(arena, existing, *root),
        };
        if replace {
            threads.insert(key.clone(), *root);
        }
    }

    // Second pass: fold the remaining roots into their representative
    let mut merges = 0usize;
    for (root, key) in &keyed_roots {
        let Some(key) = key else {
            continue;
        };
        let Some(&representative) = threads.get(key) else {
            continue;
        };
        if representative == *root || arena[*root].parent().is_some() {
            continue;
        }

        let merged = merge_roots(arena, representative, *root);
        threads.insert(key.clone(), merged);
        merges += 1;
    }

    log::debug!(
        "subject consolidation: {} roots, {} merges, {} threads, {} without subject",
        root_set.len(),
        merges,
        threads.len(),
        unsubjected.len()
    );

    Consolidation {
        threads,
        unsubjected,
    }
}

/// Should `candidate` replace `existing` as the representative of a subject?
fn is_better_representative<P>(
    arena: &ContainerArena<P>,
    existing: ContainerId,
    candidate: ContainerId,
) -> bool {
    match (&arena[existing].message, &arena[candidate].message) {
        (None, Some(_)) => true,
        (Some(existing), Some(candidate)) => {
            existing.message_id().len() > candidate.message_id().len()
        }
        _ => false,
    }
}

/// Merge root `other` into `representative`, returning the new representative
fn merge_roots<P>(
    arena: &mut ContainerArena<P>,
    representative: ContainerId,
    other: ContainerId,
) -> ContainerId {
    match (arena[representative].is_dummy(), arena[other].is_dummy()) {
        // Two thread heads: the representative takes over the other's replies
        (true, true) => {
            for child in arena.take_children(other) {
                arena.add_child(representative, child);
            }
            representative
        }
        (true, false) => {
            arena.add_child(representative, other);
            representative
        }
        (false, true) => {
            arena.add_child(other, representative);
            other
        }
        (false, false) => {
            let representative_len = message_id_len(arena, representative);
            let other_len = message_id_len(arena, other);
            match representative_len.cmp(&other_len) {
                Ordering::Less => {
                    arena.add_child(representative, other);
                    representative
                }
                Ordering::Greater => {
                    arena.add_child(other, representative);
                    other
                }
                Ordering::Equal => {
                    let head = arena.new_container(None);
                    arena.add_child(head, representative);
                    arena.add_child(head, other);
                    head
                }
            }
        }
    }
}

fn message_id_len<P>(arena: &ContainerArena<P>, id: ContainerId) -> usize {
    arena[id].message_id().map_or(0, str::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::message::Message;

    fn real(arena: &mut ContainerArena<()>, id: &str, subject: &str) -> ContainerId {
        arena.new_container(Some(Message::new(id, subject, Vec::new(), ()).unwrap()))
    }

    fn dummy_head(arena: &mut ContainerArena<()>, children: &[(&str, &str)]) -> ContainerId {
        let head = arena.new_container(None);
        for (id, subject) in children {
            let child = real(arena, id, subject);
            arena.add_child(head, child);
        }
        head
    }

    #[test]
    fn test_equal_length_ids_get_synthetic_head() {
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "aaa", "Status Update");
        let b = real(&mut arena, "bbb", "Re: Status Update");

        let result = consolidate_by_subject(&mut arena, &[a, b]);

        assert_eq!(result.threads.len(), 1);
        let head = result.threads["Status Update"];
        assert!(arena[head].is_dummy());
        assert_eq!(arena[head].children(), &[a, b]);
    }

    #[test]
    fn test_shorter_message_id_adopts_longer() {
        let mut arena = ContainerArena::new();
        let long = real(&mut arena, "long-id", "Re: Foo");
        let short = real(&mut arena, "id", "Foo");

        let result = consolidate_by_subject(&mut arena, &[long, short]);

        assert_eq!(result.threads["Foo"], short);
        assert_eq!(arena[short].children(), &[long]);
        assert_eq!(arena[long].parent(), Some(short));
    }

    #[test]
    fn test_dummy_root_adopts_real_representative() {
        let mut arena = ContainerArena::new();
        let real_root = real(&mut arena, "r", "Re: Foo");
        let head = dummy_head(&mut arena, &[("c1", "Foo"), ("c2", "Re: Foo")]);

        let result = consolidate_by_subject(&mut arena, &[real_root, head]);

        assert_eq!(result.threads["Foo"], head);
        assert_eq!(arena[head].children().len(), 3);
        assert_eq!(arena[real_root].parent(), Some(head));
    }

    #[test]
    fn test_dummy_heads_are_combined() {
        let mut arena = ContainerArena::new();
        let first = dummy_head(&mut arena, &[("a1", "Foo"), ("a2", "Foo")]);
        let second = dummy_head(&mut arena, &[("b1", "Re: Foo"), ("b2", "Re: Foo")]);

        let result = consolidate_by_subject(&mut arena, &[first, second]);

        assert_eq!(result.threads["Foo"], first);
        assert_eq!(arena[first].children().len(), 4);
        assert!(arena[second].children().is_empty());
    }

    #[test]
    fn test_empty_subject_is_not_grouped() {
        let mut arena = ContainerArena::new();
        let blank = real(&mut arena, "x", "Re: ");
        let other = real(&mut arena, "y", "Re:");

        let result = consolidate_by_subject(&mut arena, &[blank, other]);

        assert!(result.threads.is_empty());
        assert_eq!(result.unsubjected, vec![blank, other]);
        assert_eq!(arena[blank].parent(), None);
    }

    #[test]
    fn test_distinct_subjects_stay_apart() {
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "a", "Foo");
        let b = real(&mut arena, "b", "Bar");

        let result = consolidate_by_subject(&mut arena, &[a, b]);

        let subjects: Vec<_> = result.threads.keys().cloned().collect();
        assert_eq!(subjects, vec!["Foo", "Bar"]);
        assert!(arena[a].children().is_empty());
    }

    #[test]
    fn test_real_roots_win_representative_over_dummy() {
        let mut arena = ContainerArena::new();
        let first = real(&mut arena, "aa", "Foo");
        let second = real(&mut arena, "bb", "Re: Foo");
        let head = dummy_head(&mut arena, &[("c1", "Foo"), ("c2", "Re: Foo")]);
        let replies = arena[head].children().to_vec();

        let result = consolidate_by_subject(&mut arena, &[first, second, head]);

        let merged = result.threads["Foo"];
        assert_ne!(merged, head);
        assert!(arena[merged].is_dummy());
        assert_eq!(
            arena[merged].children(),
            &[first, second, replies[0], replies[1]]
        );
        assert!(arena[head].children().is_empty());
    }

    #[test]
    fn test_third_root_joins_synthetic_head() {
        let mut arena = ContainerArena::new();
        let a = real(&mut arena, "aa", "Foo");
        let b = real(&mut arena, "bb", "Foo");
        let c = real(&mut arena, "cc", "Re: Foo");

        let result = consolidate_by_subject(&mut arena, &[a, b, c]);

        let head = result.threads["Foo"];
        assert!(arena[head].is_dummy());
        assert_eq!(arena[head].children(), &[a, b, c]);
    }
}
