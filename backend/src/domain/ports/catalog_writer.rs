//! Driven port for uploading batches to the catalog's create endpoint.

use async_trait::async_trait;

use crate::domain::ports::poi_source::RawPoi;

/// Errors surfaced while uploading one batch.
///
/// Upload failures are batch-scoped: the loader logs them and continues
/// with the remaining batches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogWriteError {
    /// Network transport failed before receiving a response.
    #[error("catalog upload transport failed: {message}")]
    Transport { message: String },
    /// The catalog answered with a non-success status.
    #[error("catalog rejected upload: {message}")]
    Rejected { message: String },
}

impl CatalogWriteError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a rejection error with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Port for sending one batch to the catalog create endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Upload one batch as an independent create request.
    async fn upload_batch(&self, batch: &[RawPoi]) -> Result<(), CatalogWriteError>;
}
