//! Google Books volumes API.

use serde::Deserialize;

use super::{
    authors_or_unknown, title_or_untitled, BookSummary, ImageLinks, SearchPage, SearchRequest,
    SortOrder, Upstream, UpstreamRequest,
};

/// Marker type for the Google Books upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleBooksApi;

#[derive(Debug, Deserialize)]
pub struct Volume {
    pub id: String,
    #[serde(default, rename = "volumeInfo")]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub image_links: Option<VolumeImages>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeImages {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volumes {
    pub items: Option<Vec<Volume>>,
    pub total_items: Option<u64>,
}

impl Upstream for GoogleBooksApi {
    const NAME: &'static str = "google-books";
    const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/books/v1";
    const API_KEY_PARAM: Option<&'static str> = Some("key");

    type Raw = Volume;
    type Page = Volumes;
    type Detail = Volume;

    fn search_request(request: &SearchRequest) -> UpstreamRequest {
        let order = match request.sort {
            SortOrder::Relevance => "relevance",
            SortOrder::Newest => "newest",
        };
        UpstreamRequest {
            path: "/volumes".to_string(),
            params: vec![
                ("q", request.query.clone()),
                ("startIndex", request.offset.to_string()),
                ("maxResults", request.limit.to_string()),
                ("orderBy", order.to_string()),
            ],
        }
    }

    fn detail_request(catalog_id: &str) -> UpstreamRequest {
        UpstreamRequest {
            path: format!("/volumes/{}", catalog_id),
            params: Vec::new(),
        }
    }

    fn normalize(raw: Volume) -> BookSummary {
        let info = raw.volume_info;
        let images = info.image_links.unwrap_or_default();

        BookSummary {
            catalog_id: raw.id,
            title: title_or_untitled(info.title),
            authors: authors_or_unknown(info.authors),
            description: info.description,
            categories: info.categories.unwrap_or_default(),
            published_date: info.published_date,
            page_count: info.page_count,
            image_links: ImageLinks {
                thumbnail: images.thumbnail,
                small_thumbnail: images.small_thumbnail,
                large: images.large,
            },
        }
    }

    fn normalize_page(page: Volumes) -> SearchPage {
        SearchPage {
            items: page
                .items
                .unwrap_or_default()
                .into_iter()
                .map(Self::normalize)
                .collect(),
            total_items: page.total_items.unwrap_or(0),
        }
    }

    /// Detail views fall back to the thumbnail when no large cover exists.
    fn normalize_detail(detail: Volume) -> Option<BookSummary> {
        let mut book = Self::normalize(detail);
        if book.image_links.large.is_none() {
            book.image_links.large = book.image_links.thumbnail.clone();
        }
        Some(book)
    }
}
