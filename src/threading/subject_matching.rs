//! Subject normalization for email threading
//!
//! Replies composed without References headers can only be tied back to their
//! conversation by subject. This module strips the reply decoration and list
//! tags from the front of a subject so that such messages share a key.

use regex::Regex;
use std::sync::OnceLock;

use super::container::{ContainerArena, ContainerId};

/// Lazy-initialized regex for leading reply markers and bracketed tags
static REPLY_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get the compiled reply-prefix regex
///
/// Pattern matches, case-insensitively and only at the start, one or more of:
/// - `Re:` - plain reply
/// - `Re[2]:` - reply with a counter
/// - `[list-name]` - bracketed mailing list or topic tag
///
/// each optionally surrounded by whitespace.
fn get_reply_prefix_regex() -> &'static Regex {
    REPLY_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(?:\s*(?:re(?:\[\d+\])?:|\[[^\]]+\]))+")
            .expect("Invalid reply prefix regex")
    })
}

/// Normalize an email subject for threading comparison
///
/// Case and inner whitespace are preserved; only the decoration at the front
/// and surrounding whitespace are removed. An empty result means the subject
/// carries nothing to group by.
///
/// ## Examples
///
/// ```rust
/// use mail_threader::threading::normalize_subject;
///
/// assert_eq!(normalize_subject("Re: Foo"), "Foo");
/// assert_eq!(normalize_subject("Re[2]: Re: Foo"), "Foo");
/// assert_eq!(normalize_subject("[list] Foo"), "Foo");
/// assert_eq!(normalize_subject("Re:"), "");
/// ```
pub fn normalize_subject(subject: &str) -> String {
    get_reply_prefix_regex()
        .replace(subject, "")
        .trim()
        .to_string()
}

/// Subject a thread root is grouped under
///
/// Uses the root's own message, or its first child's message when the root is
/// a dummy. Returns `None` when neither holds a message.
pub fn root_subject<P>(arena: &ContainerArena<P>, root: ContainerId) -> Option<&str> {
    let container = &arena[root];
    let message = match &container.message {
        Some(message) => message,
        None => {
            let first_child = *container.children().first()?;
            arena[first_child].message.as_ref()?
        }
    };
    Some(message.subject.as_str())
}

/// Normalized grouping key for a root, `None` when it normalizes to empty
pub fn root_subject_key<P>(arena: &ContainerArena<P>, root: ContainerId) -> Option<String> {
    let key = normalize_subject(root_subject(arena, root)?);
    if key.is_empty() { None } else { Some(key) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::message::Message;

    #[test]
    fn test_normalize_basic_reply() {
        assert_eq!(normalize_subject("Re: Foo"), "Foo");
    }

    #[test]
    fn test_normalize_counted_reply() {
        assert_eq!(normalize_subject("Re[2]: Re: Foo"), "Foo");
    }

    #[test]
    fn test_normalize_list_tag() {
        assert_eq!(normalize_subject("[list] Foo"), "Foo");
    }

    #[test]
    fn test_normalize_plain_subject_unchanged() {
        assert_eq!(normalize_subject("Foo"), "Foo");
    }

    #[test]
    fn test_normalize_case_insensitive_and_mixed() {
        assert_eq!(normalize_subject("RE: [dev-list] re: Status Update"), "Status Update");
    }

    #[test]
    fn test_normalize_only_strips_front() {
        assert_eq!(normalize_subject("Foo [bar] Re: baz"), "Foo [bar] Re: baz");
    }

    #[test]
    fn test_normalize_requires_colon() {
        assert_eq!(normalize_subject("Really important"), "Really important");
    }

    #[test]
    fn test_normalize_empty_result() {
        assert_eq!(normalize_subject("Re: [list]  "), "");
        assert_eq!(normalize_subject(""), "");
    }

    #[test]
    fn test_root_subject_falls_back_to_first_child() {
        let mut arena = ContainerArena::new();
        let dummy = arena.new_container(None);
        let child = arena.new_container(Some(
            Message::new("c1", "Re: Hello", Vec::new(), ()).unwrap(),
        ));
        arena.add_child(dummy, child);

        assert_eq!(root_subject(&arena, dummy), Some("Re: Hello"));
        assert_eq!(root_subject_key(&arena, dummy), Some("Hello".to_string()));
    }

    #[test]
    fn test_root_subject_key_empty_is_none() {
        let mut arena = ContainerArena::new();
        let root = arena.new_container(Some(Message::new("r", "Re:", Vec::new(), ()).unwrap()));
        assert_eq!(root_subject_key(&arena, root), None);
    }
}
