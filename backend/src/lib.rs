//! Spotter backend library.
//!
//! Catalogs points of interest in a hexagonal spatial index and answers
//! "what is near this coordinate" queries. The crate follows a hexagonal
//! layout: behaviour lives in [`domain`], protocol translation in
//! [`inbound`] and [`outbound`].

pub mod domain;
pub mod inbound;
pub mod outbound;
