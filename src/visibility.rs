//! Visible projection of a comment thread.
//!
//! A comment is hidden exactly when some ancestor is collapsed. Visibility is
//! always derived from the collapse flags; [`ThreadView`] additionally keeps
//! the sorted indices of the shown comments so a list UI can address rows in
//! constant time.

use std::ops::Range;

use crate::comment::{CommentNode, Visibility};
use crate::list::CommentList;

/// Visibility of the comment at `index`, or `None` past the end.
///
/// Walks back through the ancestor chain, so it costs the distance to the
/// nearest root rather than the length of the list.
#[must_use]
pub fn visibility_of(list: &CommentList, index: usize) -> Option<Visibility> {
    let nodes = list.nodes();
    let node = nodes.get(index)?;
    let mut depth = node.depth;
    for ancestor in nodes[..index].iter().rev() {
        if depth == 0 {
            break;
        }
        if ancestor.depth < depth {
            if ancestor.is_collapsed() {
                return Some(Visibility::Hidden);
            }
            depth = ancestor.depth;
        }
    }
    Some(node.shown_visibility())
}

/// Indices of every shown comment, recomputed from scratch.
#[must_use]
pub fn visible_projection(list: &CommentList) -> Vec<usize> {
    visible_in(list, 0..list.len())
}

/// Shown indices within `range`, treating everything above the range as
/// expanded.
///
/// `range` must start at a comment whose ancestors all lie outside it, which
/// holds for a whole list and for any descendant block.
pub(crate) fn visible_in(list: &CommentList, range: Range<usize>) -> Vec<usize> {
    let nodes = list.nodes();
    let mut shown = Vec::with_capacity(range.len());
    // Depth of the collapsed comment currently folding its replies away.
    let mut folded_at: Option<usize> = None;

    for index in range {
        let node = &nodes[index];
        if let Some(depth) = folded_at {
            if node.depth > depth {
                continue;
            }
            folded_at = None;
        }
        shown.push(index);
        if node.is_collapsed() {
            folded_at = Some(node.depth);
        }
    }

    shown
}

/// A comment list together with its current visible projection.
///
/// This is the object a comments screen owns for as long as it is open.
#[derive(Debug, Clone, Default)]
pub struct ThreadView {
    pub(crate) list: CommentList,
    /// Full-list indices of shown comments, ascending
    pub(crate) visible: Vec<usize>,
}

impl ThreadView {
    #[must_use]
    pub fn new(list: CommentList) -> Self {
        let visible = visible_projection(&list);
        Self { list, visible }
    }

    #[must_use]
    pub const fn list(&self) -> &CommentList {
        &self.list
    }

    /// Number of rows the list UI should show.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Full-list indices of shown comments, in display order.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Shown comments, in display order.
    pub fn visible_projection(&self) -> impl ExactSizeIterator<Item = &CommentNode> + '_ {
        self.visible.iter().map(|&i| &self.list.nodes()[i])
    }

    /// Comment displayed at visible row `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&CommentNode> {
        self.full_index_of(row).and_then(|i| self.list.get(i))
    }

    /// Full-list index of the comment at visible row `row`.
    #[must_use]
    pub fn full_index_of(&self, row: usize) -> Option<usize> {
        self.visible.get(row).copied()
    }

    /// Visible row of the comment at full-list `index`, or `None` when it is
    /// hidden or out of range.
    #[must_use]
    pub fn visible_index_of(&self, index: usize) -> Option<usize> {
        self.visible.binary_search(&index).ok()
    }

    #[must_use]
    pub fn visibility(&self, index: usize) -> Option<Visibility> {
        let node = self.list.get(index)?;
        if self.visible_index_of(index).is_some() {
            Some(node.shown_visibility())
        } else {
            Some(Visibility::Hidden)
        }
    }

    /// How many replies a collapsed comment is currently folding away.
    ///
    /// Zero for expanded or hidden comments.
    #[must_use]
    pub fn hidden_descendants(&self, index: usize) -> usize {
        match self.visibility(index) {
            Some(Visibility::VisibleCollapsed) => self.list.descendant_block(index).len(),
            _ => 0,
        }
    }

    /// Collapse every comment that has replies, leaving only top-level rows.
    pub fn collapse_all(&mut self) {
        for index in 0..self.list.len() {
            let has_children = self.list.has_children(index);
            self.list.set_collapsed(index, has_children);
        }
        self.rebuild();
    }

    /// Clear every collapse flag.
    pub fn expand_all(&mut self) {
        for index in 0..self.list.len() {
            self.list.set_collapsed(index, false);
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.visible = visible_projection(&self.list);
        tracing::debug!(visible = self.visible.len(), "rebuilt visible projection");
    }
}
