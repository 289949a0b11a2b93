use super::{BookSummary, CatalogSource, SearchPage, SearchRequest, SortOrder};
use crate::error::{Error, Result};

/// A fixed in-process catalog, for tests and offline runs.
///
/// Search matches the query case-insensitively against titles and authors.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    books: Vec<BookSummary>,
    unavailable: bool,
}

impl StaticCatalog {
    pub fn new(books: Vec<BookSummary>) -> Self {
        Self {
            books,
            unavailable: false,
        }
    }

    /// A catalog whose every lookup fails as if the upstream were down.
    pub fn unavailable() -> Self {
        Self {
            books: Vec::new(),
            unavailable: true,
        }
    }

    fn check_up(&self) -> Result<()> {
        if self.unavailable {
            Err(Error::UpstreamUnavailable)
        } else {
            Ok(())
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        self.check_up()?;
        let request = request.normalized()?;
        let needle = request.query.to_lowercase();

        let mut hits: Vec<&BookSummary> = self
            .books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.authors.iter().any(|a| a.to_lowercase().contains(&needle))
            })
            .collect();
        if request.sort == SortOrder::Newest {
            hits.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        }

        Ok(SearchPage {
            total_items: hits.len() as u64,
            items: hits
                .into_iter()
                .skip(request.offset as usize)
                .take(request.limit as usize)
                .cloned()
                .collect(),
        })
    }

    fn get_by_id(&self, catalog_id: &str) -> Result<BookSummary> {
        self.check_up()?;
        self.books
            .iter()
            .find(|b| b.catalog_id == catalog_id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                collection: "catalog",
                id: catalog_id.to_string(),
            })
    }
}
