//! PostgreSQL-backed catalog store adapter.
//!
//! Inserts apply the per-record rejection policy with
//! `ON CONFLICT (id) DO NOTHING`: a duplicate identifier rejects that row
//! only, and the rest of the batch proceeds. Reads revalidate persisted
//! cells and tags before handing records back to the domain.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use h3o::CellIndex;

use crate::domain::poi::Poi;
use crate::domain::ports::{
    BatchInsertOutcome, PoiRepository, PoiRepositoryError, RejectedRecord,
};

use super::models::PoiRow;
use super::pool::{DbPool, PoolError};
use super::schema::pois;

/// Diesel-backed implementation of the catalog store port.
#[derive(Clone)]
pub struct DieselPoiRepository {
    pool: DbPool,
}

impl DieselPoiRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PoiRepositoryError {
    PoiRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error, context: &str) -> PoiRepositoryError {
    PoiRepositoryError::query(format!("{context}: {error}"))
}

fn cell_to_storage(cell: CellIndex) -> Result<i64, PoiRepositoryError> {
    i64::try_from(u64::from(cell)).map_err(|_| {
        PoiRepositoryError::query(format!(
            "cell {:#x} does not fit signed 64-bit storage",
            u64::from(cell)
        ))
    })
}

#[async_trait]
impl PoiRepository for DieselPoiRepository {
    async fn insert_batch(
        &self,
        records: &[Poi],
    ) -> Result<BatchInsertOutcome, PoiRepositoryError> {
        let mut outcome = BatchInsertOutcome::default();
        if records.is_empty() {
            return Ok(outcome);
        }

        let rows = records
            .iter()
            .map(PoiRow::from_domain)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        for row in &rows {
            let affected = diesel::insert_into(pois::table)
                .values(row)
                .on_conflict(pois::id)
                .do_nothing()
                .execute(&mut conn)
                .await
                .map_err(|error| map_diesel_error(error, "poi insert"))?;

            if affected == 0 {
                outcome.rejected.push(RejectedRecord {
                    id: row.id,
                    reason: "duplicate id".to_owned(),
                });
            } else {
                outcome.inserted += 1;
            }
        }

        Ok(outcome)
    }

    async fn find_by_cells(
        &self,
        cells: &HashSet<CellIndex>,
    ) -> Result<Vec<Poi>, PoiRepositoryError> {
        if cells.is_empty() {
            return Ok(Vec::new());
        }

        let stored_cells = cells
            .iter()
            .copied()
            .map(cell_to_storage)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PoiRow> = pois::table
            .filter(pois::cell.eq_any(stored_cells))
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "poi lookup by cells"))?;

        rows.into_iter().map(PoiRow::into_domain).collect()
    }
}
