//! POI entity and its wire-side creation shape.
//!
//! `Poi` is the persistent record; `CreatePoiRequest` is what clients and
//! the loader submit. The request carries an open-ended JSON tag map and
//! offers fallible extraction for the two tags the system depends on.

use h3o::CellIndex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended tag mapping preserved verbatim alongside extracted fields.
///
/// `serde_json` values already form the closed sum over strings, numbers,
/// booleans, null, and nested arrays/objects the tag data needs.
pub type TagMap = Map<String, Value>;

/// Display-name sentinel used when the source tags carry no `name`.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Tag key holding the required classifier.
pub const AMENITY_TAG: &str = "amenity";

/// Tag key holding the optional display name.
pub const NAME_TAG: &str = "name";

/// A stored point of interest.
///
/// ## Invariants
/// - `cell` is always recomputed from `(lat, lon)` at the catalog's fixed
///   resolution; it is never accepted from clients and never mutated
///   independently.
/// - Records are immutable once inserted; there is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Externally supplied identifier; unique and immutable.
    pub id: i64,
    /// Display name, defaulting to [`UNKNOWN_NAME`].
    pub name: String,
    /// Required classifier (e.g. `cafe`).
    pub amenity: String,
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// Spatial index cell covering `(lat, lon)`.
    pub cell: CellIndex,
    /// Source tags preserved verbatim.
    pub tags: TagMap,
}

/// Creation payload for `POST /poi` and the upload pipeline.
///
/// Example JSON:
/// `{"id":1,"lat":55.7,"lon":37.6,"tags":{"amenity":"cafe","name":"Joe"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePoiRequest {
    /// Externally supplied identifier.
    pub id: i64,
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// Open-ended source tags.
    #[serde(default)]
    pub tags: TagMap,
}

impl CreatePoiRequest {
    /// Extract the required classifier tag, if present as a string.
    pub fn amenity(&self) -> Option<&str> {
        self.tags.get(AMENITY_TAG).and_then(Value::as_str)
    }

    /// Extract the display name, falling back to [`UNKNOWN_NAME`].
    pub fn name_or_default(&self) -> String {
        self.tags
            .get(NAME_TAG)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_NAME)
            .to_owned()
    }
}
