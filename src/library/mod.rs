//! Library store - users' book entries, likes and comments.
//!
//! Owner-only operations take the caller's id and check it against the
//! entry: a missing entry is `NotFound`, someone else's entry is
//! `Unauthorized`. The one exception is [`LibraryStore::get_entry`], which
//! treats another user's entry as not found.

mod comment;
mod entry;

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::social::{usernames, User};
use crate::store::{CollectionsExt, DocumentStore, Query};

pub use comment::{Comment, CommentView, MAX_COMMENT_CHARS};
pub use entry::{EntryPatch, LibraryEntry, NewEntry, ReadingStatus, MAX_RATING, MIN_RATING};

/// Number of entries shown on another user's public library.
pub const PUBLIC_LIBRARY_LIMIT: usize = 20;

/// Most recently added first.
pub(crate) fn newest_first(a: &LibraryEntry, b: &LibraryEntry) -> std::cmp::Ordering {
    b.date_added.cmp(&a.date_added)
}

/// Access to library entries and their comments.
pub struct LibraryStore<'a, S> {
    store: &'a S,
}

impl<'a, S: DocumentStore> LibraryStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Add a book to `owner_id`'s library.
    pub fn add_entry(&self, owner_id: &str, new: NewEntry) -> Result<LibraryEntry> {
        let entry = LibraryEntry::create(owner_id, new, Utc::now())?;
        self.store.collection::<User>().require(owner_id)?;
        self.store.insert(&entry)?;

        info!(
            entry_id = %entry.id,
            owner = %owner_id,
            catalog_id = ?entry.catalog_id,
            "added library entry"
        );
        Ok(entry)
    }

    /// All of the owner's entries, most recently added first.
    pub fn list_entries(&self, owner_id: &str) -> Result<Vec<LibraryEntry>> {
        let query = Query::filter(|e: &LibraryEntry| e.is_owned_by(owner_id)).sort_by(newest_first);
        Ok(self.store.find(&query)?)
    }

    /// Fetch one of the owner's entries. Other users' entries are reported as not found.
    pub fn get_entry(&self, owner_id: &str, entry_id: &str) -> Result<LibraryEntry> {
        match self.store.get::<LibraryEntry>(entry_id)? {
            Some(entry) if entry.is_owned_by(owner_id) => Ok(entry),
            _ => Err(Error::not_found::<LibraryEntry>(entry_id)),
        }
    }

    pub fn update_entry(
        &self,
        owner_id: &str,
        entry_id: &str,
        patch: EntryPatch,
    ) -> Result<LibraryEntry> {
        let mut entry = self.owned(owner_id, entry_id)?;
        entry.apply(patch, Utc::now())?;
        self.store.save(&entry)?;

        info!(
            entry_id = %entry.id,
            status = ?entry.reading_status,
            rating = ?entry.rating,
            "updated library entry"
        );
        Ok(entry)
    }

    /// Delete an entry and its comments. Returns the deleted id.
    pub fn delete_entry(&self, owner_id: &str, entry_id: &str) -> Result<String> {
        let entry = self.owned(owner_id, entry_id)?;

        for comment_id in &entry.comment_ids {
            self.store.delete::<Comment>(comment_id)?;
        }
        self.store.delete::<LibraryEntry>(&entry.id)?;

        info!(entry_id = %entry.id, comments = entry.comment_ids.len(), "deleted library entry");
        Ok(entry.id)
    }

    /// Like the entry if `user_id` hasn't, unlike it if they have.
    ///
    /// Returns the like set after the toggle. Read-modify-write; concurrent
    /// toggles on the same entry are last-write-wins.
    pub fn toggle_like(&self, entry_id: &str, user_id: &str) -> Result<BTreeSet<String>> {
        let mut entry = self.store.collection::<LibraryEntry>().require(entry_id)?;
        let liked = entry.toggle_like(user_id);
        self.store.save(&entry)?;

        debug!(entry_id = %entry_id, user = %user_id, liked, "toggled like");
        Ok(entry.liked_by)
    }

    /// Another user's library as shown on their profile.
    pub fn user_library(&self, user_id: &str) -> Result<Vec<LibraryEntry>> {
        let query = Query::filter(|e: &LibraryEntry| e.is_owned_by(user_id))
            .sort_by(newest_first)
            .limit(PUBLIC_LIBRARY_LIMIT);
        Ok(self.store.find(&query)?)
    }

    pub fn add_comment(
        &self,
        entry_id: &str,
        author_id: &str,
        content: &str,
    ) -> Result<CommentView> {
        let comment = Comment::create(entry_id, author_id, content, Utc::now())?;
        let mut entry = self.store.collection::<LibraryEntry>().require(entry_id)?;
        let author = self.store.collection::<User>().require(author_id)?;

        self.store.insert(&comment)?;
        entry.comment_ids.push(comment.id.clone());
        self.store.save(&entry)?;

        info!(comment_id = %comment.id, entry_id = %entry_id, author = %author_id, "added comment");
        Ok(CommentView {
            comment,
            author_username: author.username,
        })
    }

    /// Comments on an entry, oldest first.
    pub fn list_comments(&self, entry_id: &str) -> Result<Vec<CommentView>> {
        let query = Query::filter(|c: &Comment| c.book_entry_id == entry_id)
            .sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let comments = self.store.find(&query)?;

        let names = usernames(self.store, comments.iter().map(|c| c.author_user_id.as_str()))?;
        Ok(comments
            .into_iter()
            .map(|comment| {
                let author_username = names
                    .get(&comment.author_user_id)
                    .cloned()
                    .unwrap_or_default();
                CommentView {
                    comment,
                    author_username,
                }
            })
            .collect())
    }

    /// Delete a comment. Only its author may do this. Returns the deleted id.
    pub fn delete_comment(&self, comment_id: &str, requester_id: &str) -> Result<String> {
        let comment = self.store.collection::<Comment>().require(comment_id)?;
        if comment.author_user_id != requester_id {
            return Err(Error::Unauthorized(format!(
                "comment {} belongs to another user",
                comment_id
            )));
        }

        if let Some(mut entry) = self.store.get::<LibraryEntry>(&comment.book_entry_id)? {
            entry.comment_ids.retain(|id| id != comment_id);
            self.store.save(&entry)?;
        }
        self.store.delete::<Comment>(comment_id)?;

        info!(comment_id = %comment_id, "deleted comment");
        Ok(comment.id)
    }

    fn owned(&self, owner_id: &str, entry_id: &str) -> Result<LibraryEntry> {
        let entry = self.store.collection::<LibraryEntry>().require(entry_id)?;
        if !entry.is_owned_by(owner_id) {
            return Err(Error::Unauthorized(format!(
                "entry {} belongs to another user",
                entry_id
            )));
        }
        Ok(entry)
    }
}
