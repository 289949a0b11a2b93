use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::Document;

pub const MAX_COMMENT_CHARS: usize = 500;

/// A comment left on someone's library entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "comments")]
pub struct Comment {
    pub id: String,
    pub book_entry_id: String,
    pub author_user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment annotated with its author's username, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_username: String,
}

impl Comment {
    /// Content is trimmed and must be 1 to 500 characters.
    pub fn create(
        book_entry_id: &str,
        author_user_id: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::validation("content is required"));
        }
        if content.chars().count() > MAX_COMMENT_CHARS {
            return Err(Error::validation(format!(
                "content must be at most {} characters",
                MAX_COMMENT_CHARS
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            book_entry_id: book_entry_id.to_string(),
            author_user_id: author_user_id.to_string(),
            content: content.to_string(),
            created_at: now,
        })
    }
}
