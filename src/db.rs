//! Local SQLite comment store.
//!
//! Comments are stored flat with a `parent_id` column and reassembled into
//! nested [`RawComment`] trees, the shape the adapter expects from any fetch.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::comment::CommentPayload;
use crate::source::RawComment;

/// Schema the store reads. Exposed so tools and tests can create a store.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS posts (
        post_id TEXT PRIMARY KEY,
        title TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE IF NOT EXISTS comments (
        comment_id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL REFERENCES posts(post_id),
        parent_id TEXT,
        author TEXT NOT NULL DEFAULT '',
        body TEXT NOT NULL DEFAULT '',
        score INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT '',
        position INTEGER NOT NULL DEFAULT 0
    );";

/// One `comments` row before nesting.
struct CommentRow {
    comment_id: String,
    parent_id: Option<String>,
    payload: CommentPayload,
}

/// Database handle for reading comment threads.
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Open an existing comment store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Comment tree of a post, top-level comments first in display order.
    ///
    /// `None` means the store knows nothing about the post, which the screen
    /// shows the same way as an empty thread. A known post without comments
    /// yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn list_comments(&self, post_id: &str) -> Result<Option<Vec<RawComment>>> {
        let known = self
            .conn
            .query_row(
                "SELECT 1 FROM posts WHERE post_id = ?",
                params![post_id],
                |_| Ok(()),
            )
            .optional()
            .context("Failed to look up post")?;
        if known.is_none() {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(
            "SELECT comment_id, parent_id, author, body, score, created_at
             FROM comments WHERE post_id = ? ORDER BY position, created_at",
        )?;
        let rows = stmt
            .query_map(params![post_id], |row| {
                Ok(CommentRow {
                    comment_id: row.get(0)?,
                    parent_id: row.get(1)?,
                    payload: CommentPayload {
                        author: row.get(2)?,
                        text: row.get(3)?,
                        score: row.get(4)?,
                        created_at: row.get(5)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list comments")?;

        tracing::debug!(post_id, rows = rows.len(), "read comment rows");
        Ok(Some(nest(rows)))
    }
}

/// Turn `parent_id` links into nested replies, keeping row order among
/// siblings.
///
/// Comments whose parent is missing are promoted to the top level. Comments
/// caught in a parent cycle, including one that names itself as its parent,
/// cannot be placed and are dropped.
fn nest(rows: Vec<CommentRow>) -> Vec<RawComment> {
    let index_of: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.comment_id.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut roots = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let Some(parent_id) = row.parent_id.as_deref() else {
            roots.push(i);
            continue;
        };
        match index_of.get(parent_id) {
            Some(&parent) => children[parent].push(i),
            None => {
                tracing::warn!(
                    comment_id = %row.comment_id,
                    parent_id,
                    "comment parent not found, showing it at the top level"
                );
                roots.push(i);
            }
        }
    }

    // Pre-order from the roots; walking it backwards visits replies before
    // the comment they belong to.
    let mut order = Vec::with_capacity(rows.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().rev());
    }
    if order.len() < rows.len() {
        tracing::warn!(
            dropped = rows.len() - order.len(),
            "comments in a parent cycle were dropped"
        );
    }

    let mut built: Vec<Option<RawComment>> = rows
        .into_iter()
        .map(|row| Some(RawComment::new(row.comment_id, row.payload)))
        .collect();
    for &i in order.iter().rev() {
        let replies = children[i]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        if let Some(comment) = built[i].as_mut() {
            comment.children = replies;
        }
    }

    roots.iter().filter_map(|&i| built[i].take()).collect()
}
