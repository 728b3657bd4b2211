//! thread-fold - collapsible comment threads for virtualized lists
//!
//! A post's comments are flattened into a depth-annotated pre-order list.
//! [`ThreadView`] keeps the rows a list UI should show and, on every
//! collapse or expand, reports the exact rows to delete or insert.
//!
//! The screen around it follows the Elm Architecture (Model/Message/Update).

pub mod comment;
pub mod config;
pub mod db;
pub mod error;
pub mod list;
pub mod message;
pub mod model;
pub mod source;
pub mod toggle;
pub mod update;
pub mod view;
pub mod visibility;

pub use comment::{CommentNode, CommentPayload, Visibility};
pub use db::Db;
pub use error::{InvalidTarget, ThreadError};
pub use list::CommentList;
pub use message::Message;
pub use model::{CommentsState, Model, RowUpdate};
pub use source::{build, RawComment};
pub use toggle::{ChildVisibility, ToggleOutcome};
pub use update::update;
pub use view::view;
pub use visibility::{visibility_of, visible_projection, ThreadView};
