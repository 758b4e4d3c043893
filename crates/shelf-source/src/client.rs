//! HTTP client for the catalog API's `GET /api/v1/books` endpoint.

use std::time::Duration;

use reqwest::Client;
use shelf_core::{AppConfig, CatalogItem};

use crate::error::SourceError;
use crate::parse::parse_catalog_str;

/// Path of the book list, relative to the API base URL.
pub const BOOKS_PATH: &str = "/api/v1/books";

/// Fetches the full catalog from a running catalog API.
///
/// One request per fetch: no caching and no built-in retry. Any non-2xx
/// status is an error.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    books_url: String,
}

impl HttpCatalogSource {
    /// Creates a source for the API rooted at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidApiUrl`] if `api_url` is not an absolute
    /// URL, or [`SourceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        let books_url = Self::books_url_for(api_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, books_url })
    }

    /// Creates a source from `SHELF_API_URL`, `SHELF_HTTP_TIMEOUT_SECS` and
    /// `SHELF_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// See [`HttpCatalogSource::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(
            &config.api_url,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn books_url(&self) -> &str {
        &self.books_url
    }

    /// Fetches every book the API returns.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network or TLS failure.
    /// - [`SourceError::UnexpectedStatus`] for any non-2xx response.
    /// - [`SourceError::Deserialize`] or [`SourceError::MalformedCatalog`]
    ///   when the body is not a book list.
    pub async fn fetch_books(&self) -> Result<Vec<CatalogItem>, SourceError> {
        let url = &self.books_url;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        let body = response.text().await?;
        let items = parse_catalog_str(&body, &format!("GET {url}"))?;
        tracing::info!(url = %url, items = items.len(), "fetched catalog");
        Ok(items)
    }

    fn books_url_for(api_url: &str) -> Result<String, SourceError> {
        let base = api_url.trim().trim_end_matches('/');
        let url = reqwest::Url::parse(&format!("{base}{BOOKS_PATH}")).map_err(|e| {
            SourceError::InvalidApiUrl {
                url: api_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SourceError::InvalidApiUrl {
                url: api_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            });
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
