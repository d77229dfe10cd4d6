//! PostgreSQL persistence adapter built on Diesel.

mod diesel_poi_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_poi_repository::DieselPoiRepository;
pub use models::PoiRow;
pub use pool::{DbPool, PoolConfig, PoolError};
