//! Driven port for fetching raw POIs from the external source.
//!
//! The domain owns the query shape so the loader stays adapter-agnostic.

use async_trait::async_trait;

use crate::domain::geo::BoundingBox;
use crate::domain::poi::TagMap;

/// One bounding-box, single-category fetch request.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiSourceQuery {
    /// Region to scope the fetch to.
    pub bounding_box: BoundingBox,
    /// Required classifier value, e.g. `cafe`.
    pub category: String,
}

/// One raw element returned by the source, before admission.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoi {
    /// Source element identifier.
    pub id: i64,
    /// Latitude in WGS84.
    pub latitude: f64,
    /// Longitude in WGS84.
    pub longitude: f64,
    /// Raw source tags.
    pub tags: TagMap,
}

/// Errors surfaced while querying the source.
///
/// Any of these is fatal to an ingestion run: partial fetch results are
/// never used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoiSourceError {
    /// Network transport failed before receiving a response.
    #[error("poi source transport failed: {message}")]
    Transport { message: String },
    /// The source call exceeded its timeout.
    #[error("poi source timeout: {message}")]
    Timeout { message: String },
    /// The response payload could not be decoded.
    #[error("poi source response decode failed: {message}")]
    Decode { message: String },
    /// The adapter rejected the request before execution.
    #[error("poi source request invalid: {message}")]
    InvalidRequest { message: String },
}

impl PoiSourceError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid-request error with the given message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Port for fetching the raw record sequence an ingestion run consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Fetch every element matching the query, in source order.
    async fn fetch_pois(&self, query: &PoiSourceQuery) -> Result<Vec<RawPoi>, PoiSourceError>;
}
