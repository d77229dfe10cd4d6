//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the SQL in `migrations/` exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Point-of-interest catalog.
    ///
    /// Keyed by the externally supplied `id`; the `cell` column carries the
    /// spatial index and is covered by a secondary index for "in set of
    /// cells" queries.
    pois (id) {
        /// Externally supplied identifier; primary key.
        id -> BigInt,
        /// Display name, defaulting to the `Unknown` sentinel at admission.
        name -> Text,
        /// Required classifier tag.
        amenity -> Text,
        /// Latitude in WGS84.
        lat -> Double,
        /// Longitude in WGS84.
        lon -> Double,
        /// H3 cell index stored as its 64-bit integer representation.
        cell -> BigInt,
        /// Source tags preserved verbatim.
        tags -> Jsonb,
    }
}
