//! Library entries: one user's record of one book.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{BookSummary, ImageLinks};
use crate::error::{Error, Result};
use crate::Document;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Where the owner is with a book. Transitions are unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatus {
    #[default]
    ToRead,
    Reading,
    Completed,
}

/// A book in a user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "library_entries")]
pub struct LibraryEntry {
    pub id: String,
    pub owner_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub image_links: ImageLinks,
    #[serde(default)]
    pub reading_status: ReadingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_review: Option<String>,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub liked_by: BTreeSet<String>,
    #[serde(default)]
    pub comment_ids: Vec<String>,
}

/// Input for adding a book, either typed in by hand or taken from a catalog lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEntry {
    pub catalog_id: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub image_links: ImageLinks,
    pub reading_status: ReadingStatus,
    pub rating: Option<u8>,
    pub personal_review: Option<String>,
    pub date_completed: Option<DateTime<Utc>>,
}

impl NewEntry {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl From<BookSummary> for NewEntry {
    fn from(book: BookSummary) -> Self {
        Self {
            catalog_id: Some(book.catalog_id),
            title: book.title,
            authors: book.authors,
            description: book.description,
            categories: book.categories,
            published_date: book.published_date,
            page_count: book.page_count,
            image_links: book.image_links,
            ..Self::default()
        }
    }
}

/// Owner edits to an entry. Absent fields are left unchanged.
///
/// `rating: Some(0)` clears the rating; a blank `personal_review` clears the review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub image_links: Option<ImageLinks>,
    pub reading_status: Option<ReadingStatus>,
    pub rating: Option<u8>,
    pub personal_review: Option<String>,
    pub date_completed: Option<DateTime<Utc>>,
}

pub(crate) fn check_rating(rating: Option<u8>) -> Result<()> {
    match rating {
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => Err(Error::validation(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, r
        ))),
        _ => Ok(()),
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

impl LibraryEntry {
    /// Build a new entry for `owner`. Validates title and rating.
    pub fn create(owner_user_id: &str, new: NewEntry, now: DateTime<Utc>) -> Result<Self> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("please add a title"));
        }
        check_rating(new.rating)?;

        let date_completed = match (new.reading_status, new.date_completed) {
            (ReadingStatus::Completed, None) => Some(now),
            (_, given) => given,
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            owner_user_id: owner_user_id.to_string(),
            catalog_id: non_blank(new.catalog_id),
            title,
            authors: new.authors,
            description: new.description,
            categories: new.categories,
            published_date: new.published_date,
            page_count: new.page_count,
            image_links: new.image_links,
            reading_status: new.reading_status,
            rating: new.rating,
            personal_review: non_blank(new.personal_review),
            date_added: now,
            date_completed,
            liked_by: BTreeSet::new(),
            comment_ids: Vec::new(),
        })
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_user_id == user_id
    }

    /// Apply an owner edit. The patch is validated in full before any field changes.
    pub fn apply(&mut self, patch: EntryPatch, now: DateTime<Utc>) -> Result<()> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(Error::validation("title cannot be empty"));
            }
        }
        if let Some(r) = patch.rating.filter(|r| *r != 0) {
            check_rating(Some(r))?;
        }

        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(authors) = patch.authors {
            self.authors = authors;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(image_links) = patch.image_links {
            self.image_links = image_links;
        }
        if let Some(rating) = patch.rating {
            self.rating = (rating != 0).then_some(rating);
        }
        if let Some(review) = patch.personal_review {
            self.personal_review = non_blank(Some(review));
        }
        if let Some(status) = patch.reading_status {
            self.reading_status = status;
            if status == ReadingStatus::Completed && self.date_completed.is_none() {
                self.date_completed = Some(now);
            }
        }
        if let Some(done) = patch.date_completed {
            self.date_completed = Some(done);
        }
        Ok(())
    }

    /// Add `user_id` to the like set if absent, remove it if present.
    pub fn toggle_like(&mut self, user_id: &str) -> bool {
        if self.liked_by.remove(user_id) {
            false
        } else {
            self.liked_by.insert(user_id.to_string());
            true
        }
    }

    /// `date_completed` when present, else `date_added`.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.date_completed.unwrap_or(self.date_added)
    }
}
