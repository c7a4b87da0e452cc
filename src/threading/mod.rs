//! Email threading module
//!
//! This module implements the JWZ (Jamie Zawinski) threading algorithm for organizing
//! email messages into conversation threads. The implementation is based on the algorithm
//! from https://www.jwz.org/doc/threading.html.
//!
//! ## Threading Strategy
//!
//! 1. **References Header**: Each message's reference chain (oldest first, with
//!    In-Reply-To folded in) builds parent-child relationships
//! 2. **Dummy Pruning**: Placeholders for messages that were never seen are
//!    collapsed unless they hold several replies together at the root
//! 3. **Subject Grouping**: Roots whose subjects match once `Re:` markers and
//!    list tags are stripped are merged into one thread
//!
//! ## Module Structure
//!
//! - `message`: The threading input record
//! - `container`: Arena of tree nodes used by every stage
//! - `algorithm`: Linking, pruning, subject consolidation and traversal
//! - `subject_matching`: Subject normalization
//! - `forest`: The threading output

pub mod algorithm;
pub mod container;
pub mod forest;
pub mod message;
pub mod subject_matching;

// Re-export main types and functions
pub use algorithm::build_threads;
pub use container::{Container, ContainerArena, ContainerId};
pub use forest::ThreadForest;
pub use message::Message;
pub use subject_matching::normalize_subject;
