//! State update logic (Elm Architecture)

use crate::message::Message;
use crate::model::{CommentsState, Model, RowUpdate};
use crate::source;
use crate::visibility::ThreadView;

pub fn update(model: &mut Model, msg: Message) {
    model.last_update = None;

    match msg {
        // === Data ===
        Message::CommentsLoaded(roots) => {
            model.comments = match roots {
                None => CommentsState::Empty,
                Some(roots) => {
                    let list = source::build(roots);
                    if list.is_empty() {
                        CommentsState::Empty
                    } else {
                        CommentsState::Loaded(ThreadView::new(list))
                    }
                }
            };
            tracing::debug!(rows = model.row_count(), "comments loaded");
            model.cursor = 0;
            model.scroll = 0;
            model.needs_redraw = true;
        }

        // === Folding ===
        Message::ToggleComment(index) => toggle_comment(model, index),

        Message::ToggleSelected => {
            if let Some(index) = model.selected_index() {
                toggle_comment(model, index);
            }
        }

        Message::CollapseAll => {
            let selected = model.selected_index();
            if let Some(view) = model.comments.thread_mut() {
                view.collapse_all();
                // Land on the top-level comment the cursor was inside.
                let mut target = selected;
                while let Some(index) = target {
                    if let Some(row) = view.visible_index_of(index) {
                        model.cursor = row;
                        break;
                    }
                    target = view.list().parent_of(index);
                }
            }
            model.clamp_cursor();
            model.needs_redraw = true;
        }

        Message::ExpandAll => {
            let selected = model.selected_index();
            if let Some(view) = model.comments.thread_mut() {
                view.expand_all();
                if let Some(row) = selected.and_then(|i| view.visible_index_of(i)) {
                    model.cursor = row;
                }
            }
            model.clamp_cursor();
            model.needs_redraw = true;
        }

        // === Cursor ===
        Message::CursorUp => {
            model.cursor = model.cursor.saturating_sub(1);
            model.clamp_cursor();
        }

        Message::CursorDown => {
            model.cursor = model.cursor.saturating_add(1);
            model.clamp_cursor();
        }

        Message::CursorTop => {
            model.cursor = 0;
            model.clamp_cursor();
        }

        Message::CursorBottom => {
            model.cursor = model.row_count().saturating_sub(1);
            model.clamp_cursor();
        }

        Message::PageUp => {
            model.cursor = model.cursor.saturating_sub(model.height);
            model.scroll = model.scroll.saturating_sub(model.height);
            model.clamp_cursor();
        }

        Message::PageDown => {
            model.cursor = model.cursor.saturating_add(model.height);
            model.scroll = model.scroll.saturating_add(model.height);
            model.clamp_cursor();
        }

        Message::GoToParent => {
            let parent_row = model.comments.thread().and_then(|view| {
                let index = view.full_index_of(model.cursor)?;
                let parent = view.list().parent_of(index)?;
                view.visible_index_of(parent)
            });
            if let Some(row) = parent_row {
                model.cursor = row;
                model.clamp_cursor();
            }
        }

        // === System ===
        Message::Resize { height } => {
            model.height = height.max(1);
            model.clamp_cursor();
            model.needs_redraw = true;
        }

        Message::Quit => {
            model.should_quit = true;
        }

        Message::Noop => {}
    }
}

fn toggle_comment(model: &mut Model, index: usize) {
    let Some(view) = model.comments.thread_mut() else {
        return;
    };

    match view.toggle(index) {
        Ok(outcome) => {
            let update = RowUpdate::from(outcome);
            model.cursor = update.reload;
            // Bring the toggled row back if it had scrolled off the top.
            if update.reload < model.scroll {
                model.scroll = update.reload;
            }
            model.clamp_cursor();
            model.last_update = Some(update);
        }
        Err(err) => {
            tracing::error!(%err, "toggle of a comment without a row");
            debug_assert!(false, "{err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentPayload;
    use crate::config::UiConfig;
    use crate::source::RawComment;

    fn raw(id: &str) -> RawComment {
        RawComment::new(id, CommentPayload::default())
    }

    /// a(a1(a1x), a2), b, c(c1)
    fn loaded_model(height: usize) -> Model {
        let mut model = Model::new(height, UiConfig::default());
        let roots = vec![
            raw("a").with_children(vec![raw("a1").with_children(vec![raw("a1x")]), raw("a2")]),
            raw("b"),
            raw("c").with_children(vec![raw("c1")]),
        ];
        update(&mut model, Message::CommentsLoaded(Some(roots)));
        model
    }

    fn selected_id(model: &Model) -> Option<String> {
        let view = model.comments.thread()?;
        view.row(model.cursor).map(|n| n.id.clone())
    }

    #[test]
    fn test_load_none_is_empty_not_loading() {
        let mut model = Model::new(10, UiConfig::default());
        update(&mut model, Message::CommentsLoaded(None));
        assert!(matches!(model.comments, CommentsState::Empty));
    }

    #[test]
    fn test_load_empty_tree_is_empty() {
        let mut model = Model::new(10, UiConfig::default());
        update(&mut model, Message::CommentsLoaded(Some(Vec::new())));
        assert_eq!(model.comments.status_text(), Some("No comments"));
    }

    #[test]
    fn test_load_builds_thread() {
        let model = loaded_model(10);
        assert_eq!(model.row_count(), 7);
        assert_eq!(selected_id(&model).as_deref(), Some("a"));
    }

    #[test]
    fn test_toggle_records_row_update() {
        let mut model = loaded_model(10);
        update(&mut model, Message::ToggleComment(0));
        assert_eq!(
            model.last_update,
            Some(RowUpdate {
                reload: 0,
                removed: vec![1, 2, 3],
                inserted: Vec::new(),
            })
        );
        assert_eq!(model.row_count(), 4);

        update(&mut model, Message::ToggleSelected);
        assert_eq!(
            model.last_update,
            Some(RowUpdate {
                reload: 0,
                removed: Vec::new(),
                inserted: vec![1, 2, 3],
            })
        );
    }

    #[test]
    fn test_row_update_clears_on_next_message() {
        let mut model = loaded_model(10);
        update(&mut model, Message::ToggleComment(0));
        update(&mut model, Message::CursorDown);
        assert!(model.last_update.is_none());
    }

    #[test]
    fn test_toggle_selects_toggled_row() {
        let mut model = loaded_model(10);
        update(&mut model, Message::CursorBottom);
        update(&mut model, Message::ToggleComment(5));
        assert_eq!(selected_id(&model).as_deref(), Some("c"));
    }

    #[test]
    fn test_toggle_scrolls_row_back_into_view() {
        let mut model = loaded_model(2);
        update(&mut model, Message::CursorBottom);
        assert_eq!(model.scroll, 5);

        update(&mut model, Message::ToggleComment(1));
        assert_eq!(model.cursor, 1);
        assert_eq!(model.scroll, 1);
    }

    #[test]
    fn test_cursor_movement_clamps() {
        let mut model = loaded_model(3);
        update(&mut model, Message::CursorUp);
        assert_eq!(model.cursor, 0);
        update(&mut model, Message::PageDown);
        assert_eq!(model.cursor, 3);
        assert_eq!(model.scroll, 3);
        update(&mut model, Message::PageDown);
        assert_eq!(model.cursor, 6);
        assert_eq!(model.scroll, 4);
        update(&mut model, Message::CursorDown);
        assert_eq!(model.cursor, 6);
        update(&mut model, Message::CursorTop);
        assert_eq!((model.cursor, model.scroll), (0, 0));
    }

    #[test]
    fn test_go_to_parent() {
        let mut model = loaded_model(10);
        model.cursor = 2;
        update(&mut model, Message::GoToParent);
        assert_eq!(selected_id(&model).as_deref(), Some("a1"));
        update(&mut model, Message::GoToParent);
        assert_eq!(selected_id(&model).as_deref(), Some("a"));
        update(&mut model, Message::GoToParent);
        assert_eq!(selected_id(&model).as_deref(), Some("a"));
    }

    #[test]
    fn test_collapse_all_keeps_cursor_in_thread() {
        let mut model = loaded_model(10);
        model.cursor = 6;
        update(&mut model, Message::CollapseAll);
        assert_eq!(model.row_count(), 3);
        assert_eq!(selected_id(&model).as_deref(), Some("c"));

        update(&mut model, Message::ExpandAll);
        assert_eq!(model.row_count(), 7);
        assert_eq!(selected_id(&model).as_deref(), Some("c"));
    }

    #[test]
    fn test_resize_clamps_scroll() {
        let mut model = loaded_model(2);
        update(&mut model, Message::CursorBottom);
        update(&mut model, Message::Resize { height: 20 });
        assert_eq!(model.height, 20);
        assert_eq!(model.scroll, 0);
    }

    #[test]
    fn test_toggle_before_load_is_ignored() {
        let mut model = Model::new(10, UiConfig::default());
        update(&mut model, Message::ToggleComment(0));
        assert!(matches!(model.comments, CommentsState::Loading));
        assert!(model.last_update.is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "hidden")]
    fn test_toggle_hidden_comment_is_fatal() {
        let mut model = loaded_model(10);
        update(&mut model, Message::ToggleComment(1));
        update(&mut model, Message::ToggleComment(2));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_toggle_hidden_comment_leaves_rows_alone() {
        let mut model = loaded_model(10);
        update(&mut model, Message::ToggleComment(1));
        let rows = model.row_count();
        let cursor = model.cursor;

        update(&mut model, Message::ToggleComment(2));
        assert_eq!(model.row_count(), rows);
        assert_eq!(model.cursor, cursor);
        assert!(model.last_update.is_none());
    }

    #[test]
    fn test_quit() {
        let mut model = loaded_model(10);
        update(&mut model, Message::Quit);
        assert!(model.should_quit);
    }
}
