//! Domain primitives, services, and ports.
//!
//! Purpose: keep all catalog behaviour transport-agnostic. Inbound adapters
//! translate HTTP into these types; outbound adapters implement the port
//! traits under [`ports`]. Invariants and serialisation contracts live in
//! each type's Rustdoc.

pub mod catalog;
pub mod error;
pub mod geo;
pub mod ingestion;
pub mod poi;
pub mod ports;
pub mod spatial;

pub use self::catalog::{AdmissionOutcome, CatalogService};
pub use self::error::{Error, ErrorCode};
pub use self::geo::{BoundingBox, Coordinate, GeoValidationError};
pub use self::ingestion::{split_batches, BatchSizeError, LoadReport, LoaderError, LoaderService};
pub use self::poi::{CreatePoiRequest, Poi, TagMap, UNKNOWN_NAME};
pub use self::spatial::{CellIndexer, IndexingError, DEFAULT_RESOLUTION, DEFAULT_RING_RADIUS};
