//! Catalog use-cases: proximity queries and batch admission.
//!
//! `CatalogService` owns the fixed spatial configuration (resolution and
//! ring radius) and is the only place cells are computed, which keeps the
//! `cell == indexer(lat, lon, R)` invariant out of adapters' hands.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use super::error::Error;
use super::geo::{Coordinate, GeoValidationError};
use super::poi::{CreatePoiRequest, Poi};
use super::ports::{BatchInsertOutcome, PoiRepository};
use super::spatial::{CellIndexer, IndexingError, DEFAULT_RING_RADIUS};

/// Result of admitting a batch of creation requests.
///
/// Admission applies the per-record drop policy: invalid records are
/// discarded with a warning while the rest of the batch proceeds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdmissionOutcome {
    /// Records that passed validation, with cells assigned.
    pub admitted: Vec<Poi>,
    /// Number of records dropped by validation.
    pub dropped: usize,
}

/// Domain service answering proximity queries and creating records.
#[derive(Clone)]
pub struct CatalogService {
    indexer: CellIndexer,
    ring_radius: u32,
    repo: Arc<dyn PoiRepository>,
}

impl CatalogService {
    /// Create a service over the given store with default spatial settings.
    pub fn new(repo: Arc<dyn PoiRepository>) -> Self {
        Self {
            indexer: CellIndexer::default(),
            ring_radius: DEFAULT_RING_RADIUS,
            repo,
        }
    }

    /// Indexer used for cell assignment.
    pub fn indexer(&self) -> &CellIndexer {
        &self.indexer
    }

    /// Return every record stored in the cell covering `(lat, lon)` or its
    /// ring-1 neighbourhood.
    ///
    /// Results are unsorted and unlimited; the neighbourhood is hexagonal,
    /// not circular, so callers may see records slightly outside a true
    /// radius. Failures are surfaced immediately, without retries.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` error for out-of-range coordinates and
    /// an `internal` error when indexing or the store fails.
    pub async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<Poi>, Error> {
        let coordinate = Coordinate::new(lat, lon).map_err(map_geo_error)?;
        let cell = self
            .indexer
            .cell_of(coordinate)
            .map_err(map_indexing_error)?;
        let cells = self.indexer.neighborhood(cell, self.ring_radius);
        self.repo
            .find_by_cells(&cells)
            .await
            .map_err(|error| Error::internal(error.to_string()))
    }

    /// Validate creation requests and insert the admissible ones.
    ///
    /// Records with out-of-range coordinates or without a string `amenity`
    /// tag are dropped individually; duplicates are rejected per record by
    /// the store. The returned outcome reports what was actually persisted.
    ///
    /// # Errors
    ///
    /// Returns an `internal` error when the store fails. Per-record drops
    /// and rejections are not errors.
    pub async fn create_batch(
        &self,
        requests: Vec<CreatePoiRequest>,
    ) -> Result<(AdmissionOutcome, BatchInsertOutcome), Error> {
        let admission = self.admit(requests);
        if admission.admitted.is_empty() {
            return Ok((admission, BatchInsertOutcome::default()));
        }

        let outcome = self
            .repo
            .insert_batch(&admission.admitted)
            .await
            .map_err(|error| Error::internal(error.to_string()))?;
        for rejection in &outcome.rejected {
            warn!(id = rejection.id, reason = %rejection.reason, "record rejected by store");
        }
        Ok((admission, outcome))
    }

    /// Apply the per-record drop policy and assign cells.
    pub fn admit(&self, requests: Vec<CreatePoiRequest>) -> AdmissionOutcome {
        let mut outcome = AdmissionOutcome::default();
        for request in requests {
            match self.admit_one(request) {
                Some(poi) => outcome.admitted.push(poi),
                None => outcome.dropped += 1,
            }
        }
        outcome
    }

    /// Admit a single request, logging and returning `None` on a drop.
    fn admit_one(&self, request: CreatePoiRequest) -> Option<Poi> {
        let coordinate = match Coordinate::new(request.lat, request.lon) {
            Ok(coordinate) => coordinate,
            Err(error) => {
                warn!(
                    id = request.id,
                    lat = request.lat,
                    lon = request.lon,
                    %error,
                    "dropping record with invalid coordinates"
                );
                return None;
            }
        };
        let Some(amenity) = request.amenity().map(str::to_owned) else {
            warn!(id = request.id, "dropping record without amenity tag");
            return None;
        };
        let cell = match self.indexer.cell_of(coordinate) {
            Ok(cell) => cell,
            Err(error) => {
                warn!(id = request.id, %error, "dropping record that failed cell assignment");
                return None;
            }
        };

        Some(Poi {
            id: request.id,
            name: request.name_or_default(),
            amenity,
            lat: request.lat,
            lon: request.lon,
            cell,
            tags: request.tags,
        })
    }
}

fn map_geo_error(error: GeoValidationError) -> Error {
    let field = match error {
        GeoValidationError::InvalidLatitude => "lat",
        GeoValidationError::InvalidLongitude | GeoValidationError::InvertedBounds => "lon",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

fn map_indexing_error(error: IndexingError) -> Error {
    Error::internal(error.to_string())
}
