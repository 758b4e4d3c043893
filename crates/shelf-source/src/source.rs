use std::path::PathBuf;

use shelf_core::CatalogItem;
use shelf_filter::CatalogStatus;

use crate::client::HttpCatalogSource;
use crate::error::SourceError;
use crate::file::load_catalog_file;
use crate::retry::retry_with_backoff;

/// Where a catalog snapshot comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    File(PathBuf),
    Http(HttpCatalogSource),
}

impl CatalogSource {
    /// Human-readable origin, for logs and CLI output.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Http(client) => client.books_url().to_owned(),
        }
    }

    /// Loads one snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the [`SourceError`] of the underlying file read or fetch.
    pub async fn load(&self) -> Result<Vec<CatalogItem>, SourceError> {
        match self {
            CatalogSource::File(path) => load_catalog_file(path),
            CatalogSource::Http(client) => client.fetch_books().await,
        }
    }

    /// Loads one snapshot, re-issuing transient failures up to
    /// `max_retries` more times.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt.
    pub async fn load_with_retries(
        &self,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Vec<CatalogItem>, SourceError> {
        retry_with_backoff(max_retries, backoff_base_secs, || self.load()).await
    }

    /// Loads one snapshot and folds the outcome into a [`CatalogStatus`].
    pub async fn status(&self, max_retries: u32, backoff_base_secs: u64) -> CatalogStatus {
        match self.load_with_retries(max_retries, backoff_base_secs).await {
            Ok(items) => CatalogStatus::Ready(items),
            Err(e) => {
                tracing::warn!(source = %self.describe(), error = %e, "catalog unavailable");
                CatalogStatus::Failed(e.to_string())
            }
        }
    }
}
