//! Domain ports for the hexagonal boundary.

mod catalog_writer;
mod poi_repository;
mod poi_source;

#[cfg(test)]
pub use catalog_writer::MockCatalogWriter;
pub use catalog_writer::{CatalogWriteError, CatalogWriter};
#[cfg(test)]
pub use poi_repository::MockPoiRepository;
pub use poi_repository::{BatchInsertOutcome, PoiRepository, PoiRepositoryError, RejectedRecord};
#[cfg(test)]
pub use poi_source::MockPoiSource;
pub use poi_source::{PoiSource, PoiSourceError, PoiSourceQuery, RawPoi};
