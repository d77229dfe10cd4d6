//! In-memory test doubles for exercising the service stack without
//! Postgres or the network.

// Shared across test binaries; not every binary uses every double.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use h3o::CellIndex;

use spotter_backend::domain::ports::{
    BatchInsertOutcome, CatalogWriteError, CatalogWriter, PoiRepository, PoiRepositoryError,
    PoiSource, PoiSourceError, PoiSourceQuery, RawPoi, RejectedRecord,
};
use spotter_backend::domain::{CatalogService, CreatePoiRequest, Poi};

/// Store double with the same per-record duplicate policy as the real one:
/// an existing `id` rejects that record and leaves the stored row untouched.
#[derive(Debug, Default)]
pub struct MemoryPoiRepository {
    records: Mutex<HashMap<i64, Poi>>,
}

impl MemoryPoiRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.records.lock().expect("repository lock").len()
    }
}

#[async_trait]
impl PoiRepository for MemoryPoiRepository {
    async fn insert_batch(&self, records: &[Poi]) -> Result<BatchInsertOutcome, PoiRepositoryError> {
        let mut stored = self.records.lock().expect("repository lock");
        let mut outcome = BatchInsertOutcome::default();
        for record in records {
            if stored.contains_key(&record.id) {
                outcome.rejected.push(RejectedRecord {
                    id: record.id,
                    reason: "duplicate id".to_owned(),
                });
            } else {
                stored.insert(record.id, record.clone());
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }

    async fn find_by_cells(
        &self,
        cells: &HashSet<CellIndex>,
    ) -> Result<Vec<Poi>, PoiRepositoryError> {
        let stored = self.records.lock().expect("repository lock");
        Ok(stored
            .values()
            .filter(|poi| cells.contains(&poi.cell))
            .cloned()
            .collect())
    }
}

/// Source double returning a canned element list.
pub struct StubPoiSource {
    elements: Vec<RawPoi>,
}

impl StubPoiSource {
    pub fn new(elements: Vec<RawPoi>) -> Self {
        Self { elements }
    }
}

#[async_trait]
impl PoiSource for StubPoiSource {
    async fn fetch_pois(&self, _query: &PoiSourceQuery) -> Result<Vec<RawPoi>, PoiSourceError> {
        Ok(self.elements.clone())
    }
}

/// Writer double that feeds batches straight into a [`CatalogService`],
/// standing in for the HTTP hop between loader and server.
pub struct InProcessCatalogWriter {
    catalog: CatalogService,
}

impl InProcessCatalogWriter {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogWriter for InProcessCatalogWriter {
    async fn upload_batch(&self, batch: &[RawPoi]) -> Result<(), CatalogWriteError> {
        let requests: Vec<CreatePoiRequest> = batch
            .iter()
            .map(|element| CreatePoiRequest {
                id: element.id,
                lat: element.latitude,
                lon: element.longitude,
                tags: element.tags.clone(),
            })
            .collect();
        self.catalog
            .create_batch(requests)
            .await
            .map(|_| ())
            .map_err(|error| CatalogWriteError::rejected(error.to_string()))
    }
}
