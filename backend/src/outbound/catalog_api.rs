//! HTTP uploader posting batches to the catalog's create endpoint.
//!
//! Implements the `CatalogWriter` port. Each batch is one independent POST;
//! the adapter performs no retries, leaving partial-failure handling to the
//! loader.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::poi::CreatePoiRequest;
use crate::domain::ports::{CatalogWriteError, CatalogWriter, RawPoi};

/// Catalog create-endpoint adapter.
pub struct CatalogHttpWriter {
    client: Client,
    endpoint: Url,
}

impl CatalogHttpWriter {
    /// Build a writer against the catalog `/poi` endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

fn to_create_requests(batch: &[RawPoi]) -> Vec<CreatePoiRequest> {
    batch
        .iter()
        .map(|element| CreatePoiRequest {
            id: element.id,
            lat: element.latitude,
            lon: element.longitude,
            tags: element.tags.clone(),
        })
        .collect()
}

#[async_trait]
impl CatalogWriter for CatalogHttpWriter {
    async fn upload_batch(&self, batch: &[RawPoi]) -> Result<(), CatalogWriteError> {
        let payload = to_create_requests(batch);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|error| CatalogWriteError::transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogWriteError::rejected(format!(
                "status {}",
                status.as_u16()
            )));
        }
        Ok(())
    }
}
