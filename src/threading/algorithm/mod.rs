//! Email threading algorithm implementation
//!
//! This module implements the JWZ (Jamie Zawinski) threading algorithm
//! for organizing email messages into conversation threads.
//!
//! ## Main Entry Point
//!
//! Use `build_threads()` to thread a collection of messages.

pub(crate) mod cycle_detection;
mod jwz_threading;
mod linking;
mod pruning;
pub(crate) mod subject_consolidation;
pub mod tree_traversal;

// Re-export the main threading function
pub use jwz_threading::build_threads;
pub use subject_consolidation::SubjectTable;
