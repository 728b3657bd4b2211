//! Engine error types

use thiserror::Error;

/// Why a comment cannot be toggled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTarget {
    #[error("index is past the end of a {len}-comment thread")]
    OutOfRange { len: usize },
    #[error("comment is hidden under a collapsed ancestor")]
    Hidden,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThreadError {
    /// Toggling a comment that has no row. Correct UI wiring never does this.
    #[error("cannot toggle comment {index}: {reason}")]
    InvalidToggleTarget { index: usize, reason: InvalidTarget },
    /// A node list that is not a pre-order flattening of a tree.
    #[error("comment {index} has depth {depth}, deepest allowed here is {max}")]
    DepthSkip {
        index: usize,
        depth: usize,
        max: usize,
    },
}
