//! Overpass outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `PoiSource` port.

mod dto;
mod http_source;

pub use http_source::OverpassHttpSource;
