//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations; they contain no business logic:
//!
//! - **persistence**: PostgreSQL-backed catalog store using Diesel.
//! - **overpass**: HTTP source adapter for the upstream POI service.
//! - **`catalog_api`**: HTTP uploader feeding the catalog create endpoint.

pub mod catalog_api;
pub mod overpass;
pub mod persistence;
