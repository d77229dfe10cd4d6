//! Hierarchical hexagonal spatial indexing.
//!
//! Wraps `h3o` behind a small indexer type so the rest of the domain works
//! with one fixed resolution. The resolution trades precision against false
//! negatives at cell boundaries; queries therefore always expand the exact
//! cell to its ring-1 neighbourhood rather than matching the cell alone.

use std::collections::HashSet;

use h3o::{CellIndex, LatLng, Resolution};

use super::geo::Coordinate;

/// Spatial computation failures on otherwise-valid input.
///
/// Coordinate range errors are caught earlier by [`Coordinate::new`]; a
/// failure here is an internal fault, not a user error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexingError {
    /// The grid library rejected a coordinate it should accept.
    #[error("failed to index coordinate: {message}")]
    Cell { message: String },
    /// A cell identifier does not denote a valid grid cell.
    #[error("invalid cell identifier {value:#x}: {message}")]
    InvalidCell { value: u64, message: String },
}

impl IndexingError {
    /// Create a cell computation error with the given message.
    pub fn cell(message: impl Into<String>) -> Self {
        Self::Cell {
            message: message.into(),
        }
    }

    /// Create an invalid-cell error for a raw identifier.
    pub fn invalid_cell(value: u64, message: impl Into<String>) -> Self {
        Self::InvalidCell {
            value,
            message: message.into(),
        }
    }
}

/// Default grid granularity: resolution 9 cells average ~174 m across,
/// matching the "a short walk away" query radius the service answers.
pub const DEFAULT_RESOLUTION: Resolution = Resolution::Nine;

/// Default neighbourhood expansion applied by proximity queries.
pub const DEFAULT_RING_RADIUS: u32 = 1;

/// Deterministic coordinate-to-cell indexer at one fixed resolution.
///
/// The mapping is a pure function of its inputs: the same coordinate yields
/// the same cell across processes and restarts.
///
/// # Examples
/// ```
/// use spotter_backend::domain::{CellIndexer, Coordinate};
///
/// let indexer = CellIndexer::default();
/// let coord = Coordinate::new(55.7, 37.6)?;
/// let cell = indexer.cell_of(coord)?;
/// assert_eq!(indexer.cell_of(coord)?, cell);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CellIndexer {
    resolution: Resolution,
}

impl Default for CellIndexer {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl CellIndexer {
    /// Create an indexer at an explicit resolution.
    pub fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }

    /// Resolution this indexer assigns cells at.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Map a coordinate to its covering cell.
    ///
    /// # Errors
    ///
    /// Returns [`IndexingError::Cell`] when the underlying grid computation
    /// rejects the coordinate. This should not occur for values accepted by
    /// [`Coordinate::new`] and is treated as an internal fault by callers.
    pub fn cell_of(&self, coordinate: Coordinate) -> Result<CellIndex, IndexingError> {
        let latlng = LatLng::new(coordinate.latitude(), coordinate.longitude())
            .map_err(|error| IndexingError::cell(error.to_string()))?;
        Ok(latlng.to_cell(self.resolution))
    }

    /// Return `cell` plus every cell within `ring_radius` grid hops.
    ///
    /// The result is an unordered set without duplicates. Cells away from
    /// pentagon distortions have exactly `6 * ring_radius` additional
    /// neighbours at each ring.
    pub fn neighborhood(&self, cell: CellIndex, ring_radius: u32) -> HashSet<CellIndex> {
        cell.grid_disk::<Vec<_>>(ring_radius).into_iter().collect()
    }

    /// Reconstruct a cell from its stored 64-bit representation.
    ///
    /// # Errors
    ///
    /// Returns [`IndexingError::InvalidCell`] when the value is not a valid
    /// grid cell, which indicates corrupt persisted data.
    pub fn cell_from_raw(value: u64) -> Result<CellIndex, IndexingError> {
        CellIndex::try_from(value)
            .map_err(|error| IndexingError::invalid_cell(value, error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("test coordinate should validate")
    }

    #[rstest]
    #[case::moscow(55.7, 37.6)]
    #[case::edinburgh(55.95, -3.19)]
    #[case::equator(0.0, 0.0)]
    #[case::north_pole(90.0, 0.0)]
    fn cell_assignment_is_deterministic(#[case] lat: f64, #[case] lon: f64) {
        let indexer = CellIndexer::default();
        let first = indexer.cell_of(coord(lat, lon)).expect("first indexing");
        let second = indexer.cell_of(coord(lat, lon)).expect("second indexing");
        assert_eq!(first, second, "same input must yield the same cell");
    }

    #[rstest]
    fn neighborhood_contains_centre_without_duplicates() {
        let indexer = CellIndexer::default();
        let cell = indexer.cell_of(coord(55.7, 37.6)).expect("cell");

        let ring = indexer.neighborhood(cell, DEFAULT_RING_RADIUS);
        assert!(ring.contains(&cell), "ring must include the centre cell");
        assert_eq!(
            ring.len(),
            7,
            "an interior cell has exactly six ring-1 neighbours"
        );
    }

    #[rstest]
    fn zero_radius_neighborhood_is_the_cell_itself() {
        let indexer = CellIndexer::default();
        let cell = indexer.cell_of(coord(55.7, 37.6)).expect("cell");
        let ring = indexer.neighborhood(cell, 0);
        assert_eq!(ring, std::iter::once(cell).collect());
    }

    #[rstest]
    fn nearby_points_in_one_cell_share_the_index() {
        let indexer = CellIndexer::default();
        // A few metres apart; well inside one resolution-9 cell.
        let a = indexer.cell_of(coord(55.70001, 37.60001)).expect("cell a");
        let b = indexer.cell_of(coord(55.70002, 37.60002)).expect("cell b");
        assert_eq!(a, b);
    }

    #[rstest]
    fn raw_round_trip_preserves_the_cell() {
        let indexer = CellIndexer::default();
        let cell = indexer.cell_of(coord(55.7, 37.6)).expect("cell");
        let restored = CellIndexer::cell_from_raw(u64::from(cell)).expect("restore");
        assert_eq!(cell, restored);
    }

    #[rstest]
    fn rejects_corrupt_raw_cell_values() {
        let error = CellIndexer::cell_from_raw(u64::MAX).expect_err("corrupt value");
        assert!(matches!(error, IndexingError::InvalidCell { .. }));
    }
}
