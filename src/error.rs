//! Fatal error taxonomy for a reduction run
//!
//! Two families: configuration defects found while building the tag mapping,
//! and lookup defects found while resolving captured log lines. Both abort
//! the run before any report artifact is written.

use thiserror::Error;

/// Unrecoverable defects in the instrumentation or the captured log
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReduceError {
    /// A profiling index was declared in source with two different tags
    #[error("profiling index {index} used more than once with tags '{existing}' and '{conflicting}'")]
    DuplicateIndex {
        index: u64,
        existing: String,
        conflicting: String,
    },

    /// A `Profile` line referenced an index with no declaration in source
    #[error("profiling index {index} has no tag declared in the scanned sources")]
    UnknownIndex { index: u64 },

    /// A start point with no matching end point in the same frame
    #[error("tag 'start_{name}' in frame {frame} has no matching 'end_{name}'")]
    MissingEnd { name: String, frame: usize },
}
