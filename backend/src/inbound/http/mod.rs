//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod poi;
pub mod state;

pub use error::ApiResult;
