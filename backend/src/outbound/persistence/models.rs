//! Row structs mapping between Diesel and domain records.
//!
//! Cells are persisted as their 64-bit integer representation (valid H3
//! indexes fit in 63 bits) and revalidated on read; tags round-trip through
//! `jsonb`.

use diesel::prelude::*;
use serde_json::Value;

use super::schema::pois;
use crate::domain::poi::Poi;
use crate::domain::ports::PoiRepositoryError;
use crate::domain::spatial::CellIndexer;

/// One row of the `pois` table.
#[derive(Debug, Clone, PartialEq, Queryable, Insertable)]
#[diesel(table_name = pois)]
pub struct PoiRow {
    /// Externally supplied identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Required classifier.
    pub amenity: String,
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// H3 cell as a signed 64-bit integer.
    pub cell: i64,
    /// Source tags as `jsonb`.
    pub tags: Value,
}

impl PoiRow {
    /// Map a domain record into its row shape.
    ///
    /// # Errors
    ///
    /// Returns a query error when the cell does not fit the signed storage
    /// representation, which cannot happen for valid H3 indexes.
    pub fn from_domain(poi: &Poi) -> Result<Self, PoiRepositoryError> {
        let cell = i64::try_from(u64::from(poi.cell)).map_err(|_| {
            PoiRepositoryError::query(format!(
                "cell {:#x} does not fit signed 64-bit storage",
                u64::from(poi.cell)
            ))
        })?;
        Ok(Self {
            id: poi.id,
            name: poi.name.clone(),
            amenity: poi.amenity.clone(),
            lat: poi.lat,
            lon: poi.lon,
            cell,
            tags: Value::Object(poi.tags.clone()),
        })
    }

    /// Map a row back into the domain record, validating persisted data.
    ///
    /// # Errors
    ///
    /// Returns a corrupt-data error when the stored cell is not a valid
    /// grid cell or the tags column is not a JSON object.
    pub fn into_domain(self) -> Result<Poi, PoiRepositoryError> {
        let raw_cell = u64::try_from(self.cell).map_err(|_| {
            PoiRepositoryError::corrupt(format!("negative cell value {} for poi {}", self.cell, self.id))
        })?;
        let cell = CellIndexer::cell_from_raw(raw_cell)
            .map_err(|error| PoiRepositoryError::corrupt(error.to_string()))?;
        let Value::Object(tags) = self.tags else {
            return Err(PoiRepositoryError::corrupt(format!(
                "tags for poi {} are not a JSON object",
                self.id
            )));
        };

        Ok(Poi {
            id: self.id,
            name: self.name,
            amenity: self.amenity,
            lat: self.lat,
            lon: self.lon,
            cell,
            tags,
        })
    }
}
