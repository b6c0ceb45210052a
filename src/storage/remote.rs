use super::protocol::{ENDPOINT_BIOBANKS, ENDPOINT_SPECIMENS};
use super::types::{Biobank, DocumentStore, Specimen};

use anyhow::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Document store client that reads collections from another node over HTTP.
///
/// Each call is a single GET with a timeout. Failures are returned to the caller as-is;
/// there is no retry loop, the search request fails as a whole.
pub struct HttpDocumentStore {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpDocumentStore {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self
            .http_client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Collection read {} failed: {}",
                url,
                response.status()
            ));
        }

        Ok(response.json().await?)
    }
}

impl DocumentStore for HttpDocumentStore {
    async fn list_biobanks(&self) -> Result<Vec<Biobank>> {
        let url = format!("{}{}", self.base_url, ENDPOINT_BIOBANKS);
        self.fetch_json(url).await
    }

    async fn list_specimens(&self, limit: usize) -> Result<Vec<Specimen>> {
        let url = format!("{}{}?limit={}", self.base_url, ENDPOINT_SPECIMENS, limit);
        let mut specimens: Vec<Specimen> = self.fetch_json(url).await?;
        // Peers are not trusted to honour the limit.
        specimens.truncate(limit);
        Ok(specimens)
    }
}
