//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! the domain service only and stay testable without I/O.

use crate::domain::CatalogService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalog use-cases backed by whichever store the bootstrap wired in.
    pub catalog: CatalogService,
}

impl HttpState {
    /// Construct state around a catalog service.
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}
