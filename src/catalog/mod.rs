//! Catalog lookup - book metadata from an external catalog.
//!
//! [`CatalogSource`] is the boundary the rest of the crate depends on.
//! Each upstream catalog implements [`Upstream`], which knows how to build
//! requests and how to normalize that catalog's raw records into one
//! [`BookSummary`] shape. [`HttpCatalog`] drives any `Upstream` over HTTP.
//!
//! Upstream failures of any kind surface as
//! [`Error::UpstreamUnavailable`](crate::Error::UpstreamUnavailable).

pub mod google;
#[cfg(feature = "catalog")]
mod http;
pub mod open_library;
mod static_source;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[cfg(feature = "catalog")]
pub use http::{GoogleBooks, HttpCatalog, OpenLibrary};
pub use static_source::StaticCatalog;

/// Placeholder author when the upstream record has none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Placeholder title when the upstream record has none.
pub const UNTITLED: &str = "Untitled";

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 40;

/// Cover image URLs at the sizes catalogs commonly provide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

/// Catalog metadata for one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub catalog_id: String,
    pub title: String,
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
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevance,
    Newest,
}

/// A free-text catalog search with pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_page_size")]
    pub limit: u32,
    #[serde(default)]
    pub sort: SortOrder,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            sort: SortOrder::Relevance,
        }
    }

    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Trim the query and clamp the page size. Empty queries are rejected.
    pub fn normalized(&self) -> Result<Self> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(Error::validation("please provide a search query"));
        }
        Ok(Self {
            query: query.to_string(),
            offset: self.offset,
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            sort: self.sort,
        })
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<BookSummary>,
    pub total_items: u64,
}

/// Source of catalog metadata.
pub trait CatalogSource: Send + Sync {
    fn search(&self, request: &SearchRequest) -> Result<SearchPage>;

    /// `NotFound` when the catalog has no such title.
    fn get_by_id(&self, catalog_id: &str) -> Result<BookSummary>;
}

/// An HTTP request against an upstream: path below the base URL plus query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub path: String,
    pub params: Vec<(&'static str, String)>,
}

/// A specific external catalog and its record format.
pub trait Upstream: Send + Sync + 'static {
    const NAME: &'static str;
    const DEFAULT_BASE_URL: &'static str;
    /// Query parameter carrying the API key, for catalogs that take one.
    const API_KEY_PARAM: Option<&'static str> = None;

    /// A single raw catalog record.
    type Raw: DeserializeOwned;
    /// Raw search response.
    type Page: DeserializeOwned;
    /// Raw detail response.
    type Detail: DeserializeOwned;

    fn search_request(request: &SearchRequest) -> UpstreamRequest;
    fn detail_request(catalog_id: &str) -> UpstreamRequest;

    /// Map one raw record into a [`BookSummary`].
    fn normalize(raw: Self::Raw) -> BookSummary;

    fn normalize_page(page: Self::Page) -> SearchPage;

    /// `None` when the detail response holds no record.
    fn normalize_detail(detail: Self::Detail) -> Option<BookSummary>;
}

/// Catalog ids go into upstream paths and queries verbatim, so only
/// unreserved characters are accepted.
pub(crate) fn check_catalog_id(catalog_id: &str) -> Result<()> {
    let valid = !catalog_id.is_empty()
        && catalog_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(Error::validation(format!("invalid catalog id `{catalog_id}`")))
    }
}

/// Authors list, or the single placeholder when absent or empty.
pub(crate) fn authors_or_unknown(authors: Option<Vec<String>>) -> Vec<String> {
    match authors {
        Some(a) if !a.is_empty() => a,
        _ => vec![UNKNOWN_AUTHOR.to_string()],
    }
}

pub(crate) fn title_or_untitled(title: Option<String>) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}
