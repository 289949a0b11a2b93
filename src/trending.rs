//! Trending titles - the most held catalog titles across all libraries.
//!
//! Entries are grouped by catalog id. Groups rank by size, then by the mean
//! of their positive ratings (unrated entries are left out of the mean, as
//! in [`crate::community`]). Remaining ties keep first-seen order.
//! Entries without a catalog id are manual books and are not grouped.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ImageLinks;
use crate::community::{mean_rating, round_tenths};
use crate::error::Result;
use crate::library::LibraryEntry;
use crate::store::{DocumentStore, Query};

pub const TRENDING_LIMIT: usize = 5;

/// One ranked title, described by the first entry seen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookTrendSnapshot {
    pub catalog_id: String,
    /// Number of library entries holding this title.
    pub count: usize,
    pub average_rating: f64,
    pub title: String,
    pub authors: Vec<String>,
    pub image_links: ImageLinks,
    pub category: Option<String>,
}

struct Group {
    representative: LibraryEntry,
    members: Vec<LibraryEntry>,
    average: f64,
}

pub fn trending_books<S: DocumentStore>(store: &S) -> Result<Vec<BookTrendSnapshot>> {
    let entries = store.find(&Query::filter(|e: &LibraryEntry| e.catalog_id.is_some()))?;

    let mut groups: IndexMap<String, Group> = IndexMap::new();
    for entry in entries {
        let Some(catalog_id) = entry.catalog_id.clone() else {
            continue;
        };
        groups
            .entry(catalog_id)
            .or_insert_with(|| Group {
                representative: entry.clone(),
                members: Vec::new(),
                average: 0.0,
            })
            .members
            .push(entry);
    }

    let mut ranked: Vec<(String, Group)> = groups
        .into_iter()
        .map(|(id, mut group)| {
            group.average = mean_rating(&group.members).0;
            (id, group)
        })
        .collect();

    ranked.sort_by(|(_, a), (_, b)| {
        b.members
            .len()
            .cmp(&a.members.len())
            .then_with(|| b.average.total_cmp(&a.average))
    });
    ranked.truncate(TRENDING_LIMIT);

    debug!(titles = ranked.len(), "ranked trending books");

    Ok(ranked
        .into_iter()
        .map(|(catalog_id, group)| {
            let rep = group.representative;
            BookTrendSnapshot {
                catalog_id,
                count: group.members.len(),
                average_rating: round_tenths(group.average),
                title: rep.title,
                authors: rep.authors,
                image_links: rep.image_links,
                category: rep.categories.into_iter().next(),
            }
        })
        .collect())
}
