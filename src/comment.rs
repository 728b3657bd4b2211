//! Comment records and their derived visibility.

use serde::{Deserialize, Serialize};

/// Author, text, score and timestamp of a comment.
///
/// The engine carries this around but never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub created_at: String,
}

/// How a comment currently shows in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Shown with its replies open
    Visible,
    /// Shown, but its replies are folded away
    VisibleCollapsed,
    /// Folded away under a collapsed ancestor
    Hidden,
}

impl Visibility {
    /// Whether the comment has a row in the visible projection.
    #[must_use]
    pub const fn is_shown(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// One comment in a flattened thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub id: String,
    /// Nesting depth; top-level comments are 0
    pub depth: usize,
    pub payload: CommentPayload,
    collapsed: bool,
}

impl CommentNode {
    #[must_use]
    pub fn new(id: impl Into<String>, depth: usize, payload: CommentPayload) -> Self {
        Self {
            id: id.into(),
            depth,
            payload,
            collapsed: false,
        }
    }

    /// Whether the user folded this comment's replies.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub(crate) const fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Visibility of this node given that no ancestor hides it.
    #[must_use]
    pub const fn shown_visibility(&self) -> Visibility {
        if self.collapsed {
            Visibility::VisibleCollapsed
        } else {
            Visibility::Visible
        }
    }
}
