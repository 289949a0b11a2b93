//! Activity feed - recent library activity of the users someone follows.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::library::{newest_first, LibraryEntry, ReadingStatus};
use crate::social::{usernames, User};
use crate::store::{CollectionsExt, DocumentStore, Query};

pub const FEED_LIMIT: usize = 50;

/// What a feed item is about. Exactly one kind per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Completed,
    Rated,
    Added,
}

impl ActivityKind {
    /// Completed (with a completion date) beats rated, rated beats added.
    pub fn classify(entry: &LibraryEntry) -> Self {
        if entry.reading_status == ReadingStatus::Completed && entry.date_completed.is_some() {
            ActivityKind::Completed
        } else if entry.rating.is_some_and(|r| r > 0) {
            ActivityKind::Rated
        } else {
            ActivityKind::Added
        }
    }
}

/// A followee's entry with its owner's username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub entry: LibraryEntry,
    pub owner_username: String,
}

impl FeedEntry {
    pub fn activity(&self) -> ActivityKind {
        ActivityKind::classify(&self.entry)
    }
}

/// The 50 most recently added entries across everyone `user_id` follows.
///
/// Following nobody, or followees with empty libraries, gives an empty feed.
pub fn user_feed<S: DocumentStore>(store: &S, user_id: &str) -> Result<Vec<FeedEntry>> {
    let user = store.collection::<User>().require(user_id)?;
    if user.following_ids.is_empty() {
        return Ok(Vec::new());
    }

    let followees: HashSet<&str> = user.following_ids.iter().map(String::as_str).collect();
    let query = Query::filter(|e: &LibraryEntry| followees.contains(e.owner_user_id.as_str()))
        .sort_by(newest_first)
        .limit(FEED_LIMIT);
    let entries = store.find(&query)?;

    let names = usernames(store, entries.iter().map(|e| e.owner_user_id.as_str()))?;
    debug!(user_id = %user_id, followees = followees.len(), items = entries.len(), "composed feed");

    Ok(entries
        .into_iter()
        .map(|entry| FeedEntry {
            owner_username: names.get(&entry.owner_user_id).cloned().unwrap_or_default(),
            entry,
        })
        .collect())
}
