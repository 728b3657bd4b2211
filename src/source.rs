//! Adapter from a nested comment tree to a flat [`CommentList`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::comment::{CommentNode, CommentPayload};
use crate::list::CommentList;

/// A comment as delivered by whatever fetched the thread, replies nested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    pub id: String,
    #[serde(flatten)]
    pub payload: CommentPayload,
    #[serde(default)]
    pub children: Vec<RawComment>,
}

impl RawComment {
    #[must_use]
    pub fn new(id: impl Into<String>, payload: CommentPayload) -> Self {
        Self {
            id: id.into(),
            payload,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}

/// Flatten top-level comments and their replies into pre-order.
///
/// Roots get depth 0 and every reply sits one level below its parent. Sibling
/// order is preserved. No comments yields an empty list.
#[must_use]
pub fn build(roots: Vec<RawComment>) -> CommentList {
    let mut nodes = Vec::new();
    // Reverse so the first root is popped first.
    let mut stack: Vec<(RawComment, usize)> = roots.into_iter().rev().map(|c| (c, 0)).collect();

    while let Some((raw, depth)) = stack.pop() {
        let RawComment {
            id,
            payload,
            children,
        } = raw;
        stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
        nodes.push(CommentNode::new(id, depth, payload));
    }

    tracing::debug!(comments = nodes.len(), "flattened comment tree");
    CommentList::from_preorder(nodes)
}

/// Parse a JSON array of top-level comments.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of comments.
pub fn parse_json(json: &str) -> Result<Vec<RawComment>> {
    serde_json::from_str(json).context("Failed to parse comment tree")
}
