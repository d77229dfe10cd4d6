//! Validated geographic primitives.
//!
//! `Coordinate` and `BoundingBox` enforce WGS84 ranges at construction so
//! the rest of the domain never handles out-of-range or non-finite values.

use serde::{Deserialize, Serialize};

/// Validation failures for geographic values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoValidationError {
    /// Latitude outside `[-90, 90]` or non-finite.
    #[error("latitude must be a finite value within [-90, 90]")]
    InvalidLatitude,
    /// Longitude outside `[-180, 180]` or non-finite.
    #[error("longitude must be a finite value within [-180, 180]")]
    InvalidLongitude,
    /// Bounding box edges are inverted or degenerate.
    #[error("bounding box must satisfy south < north and west < east")]
    InvertedBounds,
}

/// A WGS84 coordinate with inclusive range bounds.
///
/// The poles and the antimeridian are valid: `lat` of exactly 90 or -90 and
/// `lon` of exactly 180 or -180 pass validation.
///
/// # Examples
/// ```
/// use spotter_backend::domain::Coordinate;
///
/// let coord = Coordinate::new(55.7, 37.6)?;
/// assert_eq!(coord.latitude(), 55.7);
/// # Ok::<(), spotter_backend::domain::GeoValidationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Validate and construct a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeoValidationError`] when either component is non-finite or
    /// outside its inclusive range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoValidationError::InvalidLatitude);
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(GeoValidationError::InvalidLongitude);
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn latitude(self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn longitude(self) -> f64 {
        self.lon
    }
}

/// Rectangular lat/lon region scoping an upstream fetch.
///
/// Edges use the Overpass `(south, west, north, east)` convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    /// Validate and construct a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`GeoValidationError`] when a corner is out of range or the
    /// edges are inverted.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, GeoValidationError> {
        // Corner validation reuses the coordinate ranges.
        Coordinate::new(south, west)?;
        Coordinate::new(north, east)?;
        if south >= north || west >= east {
            return Err(GeoValidationError::InvertedBounds);
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// Southern edge latitude.
    pub fn south(self) -> f64 {
        self.south
    }

    /// Western edge longitude.
    pub fn west(self) -> f64 {
        self.west
    }

    /// Northern edge latitude.
    pub fn north(self) -> f64 {
        self.north
    }

    /// Eastern edge longitude.
    pub fn east(self) -> f64 {
        self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::north_pole(90.0, 0.0)]
    #[case::south_pole(-90.0, 0.0)]
    #[case::antimeridian_east(0.0, 180.0)]
    #[case::antimeridian_west(0.0, -180.0)]
    fn accepts_inclusive_boundaries(#[case] lat: f64, #[case] lon: f64) {
        assert!(Coordinate::new(lat, lon).is_ok(), "boundary values are valid");
    }

    #[rstest]
    #[case::lat_over(90.0001, 0.0, GeoValidationError::InvalidLatitude)]
    #[case::lat_under(-90.0001, 0.0, GeoValidationError::InvalidLatitude)]
    #[case::lon_over(0.0, 180.0001, GeoValidationError::InvalidLongitude)]
    #[case::lat_nan(f64::NAN, 0.0, GeoValidationError::InvalidLatitude)]
    #[case::lon_infinite(0.0, f64::INFINITY, GeoValidationError::InvalidLongitude)]
    fn rejects_out_of_range_values(
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] expected: GeoValidationError,
    ) {
        assert_eq!(Coordinate::new(lat, lon), Err(expected));
    }

    #[rstest]
    fn bounding_box_rejects_inverted_edges() {
        let error = BoundingBox::new(56.0, -3.3, 55.9, -3.1).expect_err("inverted edges");
        assert_eq!(error, GeoValidationError::InvertedBounds);
    }

    #[rstest]
    fn bounding_box_accepts_ordered_edges() {
        let bbox = BoundingBox::new(55.56, 37.25, 55.91, 37.95).expect("valid bbox");
        assert_eq!(bbox.south(), 55.56);
        assert_eq!(bbox.east(), 37.95);
    }
}
