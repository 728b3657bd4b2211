//! Plain-text rendering of the visible rows.
//!
//! One summary line per row: indentation, disclosure indicator, author and
//! score. Comment bodies are left to the real list UI.

use crate::comment::Visibility;
use crate::model::Model;
use crate::visibility::ThreadView;

const DEFAULT_INDENT: usize = 2;

/// Render the rows inside the viewport, or the status placeholder.
#[must_use]
pub fn view(model: &Model) -> Vec<String> {
    let Some(thread) = model.comments.thread() else {
        return model
            .comments
            .status_text()
            .map(|text| vec![text.to_string()])
            .unwrap_or_default();
    };

    let indent = model.config.indent_width.unwrap_or(DEFAULT_INDENT);
    let end = (model.scroll + model.height).min(thread.visible_len());
    (model.scroll..end)
        .filter_map(|row| {
            let line = render_row(thread, row, indent)?;
            let marker = if row == model.cursor { '>' } else { ' ' };
            Some(format!("{marker} {line}"))
        })
        .collect()
}

/// Summary line for visible row `row`.
#[must_use]
pub fn render_row(thread: &ThreadView, row: usize, indent: usize) -> Option<String> {
    let index = thread.full_index_of(row)?;
    let node = thread.list().get(index)?;

    let disclosure = match thread.visibility(index)? {
        Visibility::VisibleCollapsed => '▸',
        Visibility::Visible if thread.list().has_children(index) => '▾',
        Visibility::Visible | Visibility::Hidden => '·',
    };
    let author = if node.payload.author.is_empty() {
        "[deleted]"
    } else {
        node.payload.author.as_str()
    };

    let mut line = format!(
        "{:width$}{disclosure} {author} ({})",
        "",
        node.payload.score,
        width = node.depth * indent
    );
    match thread.hidden_descendants(index) {
        0 => {}
        1 => line.push_str(" [+1 reply]"),
        n => line.push_str(&format!(" [+{n} replies]")),
    }
    Some(line)
}
