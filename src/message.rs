//! Message types for the Elm Architecture

use crate::source::RawComment;

/// All possible user actions and system events
#[derive(Debug, Clone)]
pub enum Message {
    // === Data ===
    /// The fetch finished. `None` means it reported no data at all.
    CommentsLoaded(Option<Vec<RawComment>>),

    // === Folding ===
    /// User activated the comment at this full-list index
    ToggleComment(usize),
    /// Toggle the comment under the cursor
    ToggleSelected,
    /// Collapse every comment with replies
    CollapseAll,
    /// Expand every comment
    ExpandAll,

    // === Cursor ===
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    PageUp,
    PageDown,
    /// Move the cursor to the comment being replied to
    GoToParent,

    // === System ===
    /// Viewport resize, in rows
    Resize { height: usize },
    /// Request to quit
    Quit,
    /// No-op (ignore event)
    Noop,
}
