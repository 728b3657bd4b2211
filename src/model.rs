//! Comments screen state

use crate::config::UiConfig;
use crate::toggle::{ChildVisibility, ToggleOutcome};
use crate::visibility::ThreadView;

/// Where the comment list is in its lifecycle.
///
/// `Loading` and `Empty` are different screens: one waits for data, the other
/// tells the user there is nothing to read.
#[derive(Debug, Clone, Default)]
pub enum CommentsState {
    #[default]
    Loading,
    Empty,
    Loaded(ThreadView),
}

impl CommentsState {
    #[must_use]
    pub const fn thread(&self) -> Option<&ThreadView> {
        match self {
            Self::Loaded(view) => Some(view),
            Self::Loading | Self::Empty => None,
        }
    }

    #[must_use]
    pub fn thread_mut(&mut self) -> Option<&mut ThreadView> {
        match self {
            Self::Loaded(view) => Some(view),
            Self::Loading | Self::Empty => None,
        }
    }

    /// Placeholder text shown instead of rows, if any.
    #[must_use]
    pub const fn status_text(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading comments"),
            Self::Empty => Some("No comments"),
            Self::Loaded(_) => None,
        }
    }
}

/// Row operations the list UI performs after a toggle, in one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    /// Row whose disclosure indicator changed
    pub reload: usize,
    /// Rows to delete, in pre-toggle coordinates
    pub removed: Vec<usize>,
    /// Rows to insert, in post-toggle coordinates
    pub inserted: Vec<usize>,
}

impl From<ToggleOutcome> for RowUpdate {
    fn from(outcome: ToggleOutcome) -> Self {
        let (removed, inserted) = match outcome.child_visibility {
            ChildVisibility::Hidden => (outcome.affected_rows, Vec::new()),
            ChildVisibility::Visible => (Vec::new(), outcome.affected_rows),
        };
        Self {
            reload: outcome.row,
            removed,
            inserted,
        }
    }
}

/// Application state
pub struct Model {
    // === Data ===
    pub comments: CommentsState,

    // === UI state ===
    /// Selected visible row
    pub cursor: usize,
    /// First visible row in the viewport
    pub scroll: usize,
    /// Rows that fit in the viewport
    pub height: usize,
    /// Row changes from the most recent toggle, until the next message
    pub last_update: Option<RowUpdate>,
    pub config: UiConfig,

    // === Control ===
    pub should_quit: bool,
    /// Flag indicating the view needs a full redraw
    pub needs_redraw: bool,
}

impl Model {
    #[must_use]
    pub fn new(height: usize, config: UiConfig) -> Self {
        Self {
            comments: CommentsState::default(),
            cursor: 0,
            scroll: 0,
            height: height.max(1),
            last_update: None,
            config,
            should_quit: false,
            needs_redraw: true,
        }
    }

    /// Number of rows currently shown.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.comments.thread().map_or(0, ThreadView::visible_len)
    }

    /// Full-list index of the selected comment.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.comments.thread()?.full_index_of(self.cursor)
    }

    /// Keep the cursor on a real row and inside the viewport.
    pub fn clamp_cursor(&mut self) {
        let count = self.row_count();
        self.cursor = self.cursor.min(count.saturating_sub(1));
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.height {
            self.scroll = self.cursor + 1 - self.height;
        }
        self.scroll = self.scroll.min(count.saturating_sub(self.height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_distinguishes_loading_from_empty() {
        assert_eq!(CommentsState::Loading.status_text(), Some("Loading comments"));
        assert_eq!(CommentsState::Empty.status_text(), Some("No comments"));
        assert_eq!(
            CommentsState::Loaded(ThreadView::default()).status_text(),
            None
        );
    }

    #[test]
    fn test_row_update_from_collapse() {
        let update = RowUpdate::from(ToggleOutcome {
            row: 3,
            affected_rows: vec![4, 5],
            child_visibility: ChildVisibility::Hidden,
        });
        assert_eq!(update.reload, 3);
        assert_eq!(update.removed, vec![4, 5]);
        assert!(update.inserted.is_empty());
    }

    #[test]
    fn test_row_update_from_expand() {
        let update = RowUpdate::from(ToggleOutcome {
            row: 0,
            affected_rows: vec![1],
            child_visibility: ChildVisibility::Visible,
        });
        assert!(update.removed.is_empty());
        assert_eq!(update.inserted, vec![1]);
    }

    #[test]
    fn test_new_model_is_loading() {
        let model = Model::new(0, UiConfig::default());
        assert!(matches!(model.comments, CommentsState::Loading));
        assert_eq!(model.height, 1);
        assert_eq!(model.row_count(), 0);
        assert_eq!(model.selected_index(), None);
    }
}
