//! Open Library search API.
//!
//! Detail lookups go through the search endpoint (`q=key:/works/<id>`) so
//! author names come back in the same single call.

use serde::Deserialize;

use super::{
    authors_or_unknown, title_or_untitled, BookSummary, ImageLinks, SearchPage, SearchRequest,
    SortOrder, Upstream, UpstreamRequest,
};

const COVERS_BASE_URL: &str = "https://covers.openlibrary.org/b/id";
const WORKS_PREFIX: &str = "/works/";

/// Marker type for the Open Library upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenLibraryApi;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchDoc {
    /// `/works/OL45804W`
    pub key: String,
    pub title: Option<String>,
    pub author_name: Option<Vec<String>>,
    pub first_sentence: Option<Vec<String>>,
    pub subject: Option<Vec<String>>,
    pub first_publish_year: Option<i32>,
    pub number_of_pages_median: Option<u32>,
    pub cover_i: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    pub docs: Vec<SearchDoc>,
}

fn cover_url(cover_id: i64, size: char) -> String {
    format!("{}/{}-{}.jpg", COVERS_BASE_URL, cover_id, size)
}

impl Upstream for OpenLibraryApi {
    const NAME: &'static str = "open-library";
    const DEFAULT_BASE_URL: &'static str = "https://openlibrary.org";

    type Raw = SearchDoc;
    type Page = SearchResponse;
    type Detail = SearchResponse;

    fn search_request(request: &SearchRequest) -> UpstreamRequest {
        let mut params = vec![
            ("q", request.query.clone()),
            ("offset", request.offset.to_string()),
            ("limit", request.limit.to_string()),
        ];
        if request.sort == SortOrder::Newest {
            params.push(("sort", "new".to_string()));
        }
        UpstreamRequest {
            path: "/search.json".to_string(),
            params,
        }
    }

    fn detail_request(catalog_id: &str) -> UpstreamRequest {
        UpstreamRequest {
            path: "/search.json".to_string(),
            params: vec![
                ("q", format!("key:{}{}", WORKS_PREFIX, catalog_id)),
                ("limit", "1".to_string()),
            ],
        }
    }

    fn normalize(raw: SearchDoc) -> BookSummary {
        let catalog_id = raw
            .key
            .strip_prefix(WORKS_PREFIX)
            .unwrap_or(&raw.key)
            .to_string();

        let image_links = match raw.cover_i.filter(|id| *id > 0) {
            Some(id) => ImageLinks {
                thumbnail: Some(cover_url(id, 'M')),
                small_thumbnail: Some(cover_url(id, 'S')),
                large: Some(cover_url(id, 'L')),
            },
            None => ImageLinks::default(),
        };

        BookSummary {
            catalog_id,
            title: title_or_untitled(raw.title),
            authors: authors_or_unknown(raw.author_name),
            description: raw.first_sentence.and_then(|s| s.into_iter().next()),
            categories: raw.subject.unwrap_or_default(),
            published_date: raw.first_publish_year.map(|y| y.to_string()),
            page_count: raw.number_of_pages_median,
            image_links,
        }
    }

    fn normalize_page(page: SearchResponse) -> SearchPage {
        SearchPage {
            total_items: page.num_found,
            items: page.docs.into_iter().map(Self::normalize).collect(),
        }
    }

    fn normalize_detail(detail: SearchResponse) -> Option<BookSummary> {
        detail.docs.into_iter().next().map(Self::normalize)
    }
}
