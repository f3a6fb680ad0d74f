//! Comment commands. Comments are fetched per card and never cached in the
//! board store.

mod add;
mod delete;
mod list;
mod update;

pub use add::AddComment;
pub use delete::DeleteComment;
pub use list::ListComments;
pub use update::UpdateComment;

use crate::error::{KanbanError, Result};

/// Trim comment text, rejecting blank content
fn comment_content(content: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(KanbanError::validation("Comment cannot be empty"));
    }
    Ok(content.to_string())
}
