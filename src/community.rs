//! Community data - cross-user rating and reviews for one catalog title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::library::LibraryEntry;
use crate::social::usernames;
use crate::store::{DocumentStore, Query};

/// Shown for reviews whose author record is gone.
pub const UNKNOWN_USERNAME: &str = "unknown";

/// Aggregate over every library entry sharing one catalog id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunitySummary {
    /// Mean of present ratings, one decimal. 0 when nobody rated.
    pub average_rating: f64,
    pub rating_count: usize,
    /// Most recent first.
    pub reviews: Vec<CommunityReview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityReview {
    pub entry_id: String,
    pub username: String,
    pub rating: Option<u8>,
    pub text: String,
    /// `date_completed` if set, else `date_added`.
    pub date: DateTime<Utc>,
}

/// Round to one decimal place.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the positive ratings among `entries`, or 0 when there are none.
pub(crate) fn mean_rating<'e>(
    entries: impl IntoIterator<Item = &'e LibraryEntry>,
) -> (f64, usize) {
    let (sum, count) = entries
        .into_iter()
        .filter_map(|e| e.rating.filter(|r| *r > 0))
        .fold((0u32, 0usize), |(sum, n), r| (sum + u32::from(r), n + 1));

    if count == 0 {
        (0.0, 0)
    } else {
        (sum as f64 / count as f64, count)
    }
}

/// Aggregate ratings and reviews across all users holding `catalog_id`.
///
/// An unknown catalog id yields the zero summary.
pub fn community_data<S: DocumentStore>(store: &S, catalog_id: &str) -> Result<CommunitySummary> {
    let entries = store.find(&Query::filter(|e: &LibraryEntry| {
        e.catalog_id.as_deref() == Some(catalog_id)
    }))?;

    if entries.is_empty() {
        debug!(catalog_id = %catalog_id, "no community entries");
        return Ok(CommunitySummary::default());
    }

    let (mean, rating_count) = mean_rating(&entries);

    let reviewed: Vec<&LibraryEntry> = entries
        .iter()
        .filter(|e| {
            e.personal_review
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty())
        })
        .collect();
    let names = usernames(store, reviewed.iter().map(|e| e.owner_user_id.as_str()))?;

    let mut reviews: Vec<CommunityReview> = reviewed
        .into_iter()
        .map(|e| CommunityReview {
            entry_id: e.id.clone(),
            username: names
                .get(&e.owner_user_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_USERNAME.to_string()),
            rating: e.rating,
            text: e.personal_review.clone().unwrap_or_default(),
            date: e.effective_date(),
        })
        .collect();
    reviews.sort_by(|a, b| b.date.cmp(&a.date));

    debug!(
        catalog_id = %catalog_id,
        entries = entries.len(),
        rating_count,
        reviews = reviews.len(),
        "aggregated community data"
    );

    Ok(CommunitySummary {
        average_rating: round_tenths(mean),
        rating_count,
        reviews,
    })
}
