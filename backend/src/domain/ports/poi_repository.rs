//! Driven port for the persistent POI catalog.

use std::collections::HashSet;

use async_trait::async_trait;
use h3o::CellIndex;

use crate::domain::poi::Poi;

/// Errors raised by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoiRepositoryError {
    /// Store connection could not be established or was lost.
    #[error("poi store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("poi store query failed: {message}")]
    Query { message: String },
    /// Persisted data could not be mapped back into a domain record.
    #[error("poi store returned corrupt data: {message}")]
    Corrupt { message: String },
}

impl PoiRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a corrupt-data error with the given message.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

/// A record the store refused to insert.
///
/// Rejection is per record: siblings in the same batch are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Identifier of the rejected record.
    pub id: i64,
    /// Store-side reason, e.g. a duplicate identifier.
    pub reason: String,
}

/// Result of a batch insert under the per-record rejection policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchInsertOutcome {
    /// Number of records actually persisted.
    pub inserted: u64,
    /// Records rejected individually, in input order.
    pub rejected: Vec<RejectedRecord>,
}

/// Port for reading and writing catalog records.
///
/// Implementations must tolerate concurrent callers; the store's own
/// isolation is the only consistency mechanism.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// Insert a batch of records, rejecting duplicates per record.
    ///
    /// There are no upsert semantics: a record whose `id` already exists is
    /// reported in [`BatchInsertOutcome::rejected`] while the rest of the
    /// batch proceeds.
    async fn insert_batch(&self, records: &[Poi]) -> Result<BatchInsertOutcome, PoiRepositoryError>;

    /// Return every stored record whose cell is in the given set.
    ///
    /// The result is unordered. An empty input set yields an empty result,
    /// not an error.
    async fn find_by_cells(
        &self,
        cells: &HashSet<CellIndex>,
    ) -> Result<Vec<Poi>, PoiRepositoryError>;
}
