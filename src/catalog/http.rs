//! Blocking HTTP client for any [`Upstream`] catalog.
//!
//! One best-effort request per lookup, bounded by the configured timeout.
//! Transport errors, unexpected statuses and undecodable bodies are logged
//! and reported as `UpstreamUnavailable`.

use std::marker::PhantomData;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::google::GoogleBooksApi;
use super::open_library::OpenLibraryApi;
use super::{
    check_catalog_id, BookSummary, CatalogSource, SearchPage, SearchRequest, Upstream,
    UpstreamRequest,
};
use crate::error::{Error, Result};

pub type GoogleBooks = HttpCatalog<GoogleBooksApi>;
pub type OpenLibrary = HttpCatalog<OpenLibraryApi>;

pub struct HttpCatalog<U> {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    _upstream: PhantomData<fn() -> U>,
}

impl<U: Upstream> HttpCatalog<U> {
    /// Build a client. `base_url` defaults to the upstream's public endpoint.
    pub fn new(base_url: Option<&str>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            warn!(upstream = U::NAME, error = %e, "failed to build catalog client");
            Error::UpstreamUnavailable
        })?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(U::DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            _upstream: PhantomData,
        })
    }

    /// GET and decode. `Ok(None)` on 404; callers decide whether that means absent.
    fn fetch<T: DeserializeOwned>(&self, request: UpstreamRequest) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut params = request.params;
        if let (Some(param), Some(key)) = (U::API_KEY_PARAM, &self.api_key) {
            params.push((param, key.clone()));
        }

        let response = self.client.get(&url).query(&params).send().map_err(|e| {
            warn!(upstream = U::NAME, url = %url, error = %e, "catalog request failed");
            Error::UpstreamUnavailable
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(
                upstream = U::NAME,
                url = %url,
                status = %status,
                "catalog returned error status"
            );
            return Err(Error::UpstreamUnavailable);
        }

        response.json::<T>().map(Some).map_err(|e| {
            warn!(upstream = U::NAME, url = %url, error = %e, "catalog response did not decode");
            Error::UpstreamUnavailable
        })
    }
}

impl<U: Upstream> CatalogSource for HttpCatalog<U> {
    fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let request = request.normalized()?;
        let raw = self.fetch::<U::Page>(U::search_request(&request))?.ok_or_else(|| {
            warn!(upstream = U::NAME, "catalog search endpoint returned 404");
            Error::UpstreamUnavailable
        })?;
        let page = U::normalize_page(raw);

        debug!(
            upstream = U::NAME,
            query = %request.query,
            hits = page.items.len(),
            "catalog search"
        );
        Ok(page)
    }

    fn get_by_id(&self, catalog_id: &str) -> Result<BookSummary> {
        check_catalog_id(catalog_id)?;
        let not_found = || Error::NotFound {
            collection: "catalog",
            id: catalog_id.to_string(),
        };

        let raw = self
            .fetch::<U::Detail>(U::detail_request(catalog_id))?
            .ok_or_else(not_found)?;
        U::normalize_detail(raw).ok_or_else(not_found)
    }
}
