//! Flattened, depth-annotated comment thread.
//!
//! Comments are stored in pre-order: every comment precedes its replies, and
//! the replies of a comment are exactly the contiguous run that follows it
//! with a greater depth. No parent or child pointers are kept.

use std::ops::Range;

use crate::comment::CommentNode;
use crate::error::ThreadError;

/// Comments of one post in pre-order. The shape is fixed once built; only the
/// per-comment collapse flags change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentList {
    nodes: Vec<CommentNode>,
}

impl CommentList {
    /// Build a list from nodes that are already in pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::DepthSkip`] if the first node is not a root or
    /// any node is more than one level deeper than the node before it.
    pub fn from_nodes(nodes: Vec<CommentNode>) -> Result<Self, ThreadError> {
        let mut max = 0;
        for (index, node) in nodes.iter().enumerate() {
            if node.depth > max {
                return Err(ThreadError::DepthSkip {
                    index,
                    depth: node.depth,
                    max,
                });
            }
            max = node.depth + 1;
        }
        Ok(Self { nodes })
    }

    /// Nodes produced by a pre-order walk, which hold the depth invariant by
    /// construction.
    pub(crate) const fn from_preorder(nodes: Vec<CommentNode>) -> Self {
        Self { nodes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CommentNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommentNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn nodes(&self) -> &[CommentNode] {
        &self.nodes
    }

    /// Index range of every reply below `index`, direct or nested.
    ///
    /// Runs in time proportional to the size of the subtree. An out-of-range
    /// index yields an empty range.
    #[must_use]
    pub fn descendant_block(&self, index: usize) -> Range<usize> {
        let Some(node) = self.nodes.get(index) else {
            return self.nodes.len()..self.nodes.len();
        };
        let start = index + 1;
        let len = self.nodes[start..]
            .iter()
            .take_while(|n| n.depth > node.depth)
            .count();
        start..start + len
    }

    /// Whether the comment has at least one reply.
    #[must_use]
    pub fn has_children(&self, index: usize) -> bool {
        match (self.nodes.get(index), self.nodes.get(index + 1)) {
            (Some(node), Some(next)) => next.depth > node.depth,
            _ => false,
        }
    }

    /// Index of the comment this one replies to, if any.
    #[must_use]
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        let depth = self.nodes.get(index)?.depth;
        if depth == 0 {
            return None;
        }
        self.nodes[..index].iter().rposition(|n| n.depth < depth)
    }

    pub(crate) fn set_collapsed(&mut self, index: usize, collapsed: bool) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.set_collapsed(collapsed);
        }
    }
}

impl<'a> IntoIterator for &'a CommentList {
    type Item = &'a CommentNode;
    type IntoIter = std::slice::Iter<'a, CommentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
