//! DTOs for decoding Overpass JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records (`RawPoi`) in one pass. Any element that cannot be mapped
//! fails the whole decode: partial fetch results are never used.

use serde::Deserialize;

use crate::domain::poi::TagMap;
use crate::domain::ports::RawPoi;

#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponseDto {
    #[serde(default)]
    pub(super) elements: Vec<OverpassElementDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementDto {
    pub(super) id: i64,
    pub(super) lat: Option<f64>,
    pub(super) lon: Option<f64>,
    pub(super) center: Option<OverpassElementCenterDto>,
    #[serde(default)]
    pub(super) tags: TagMap,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementCenterDto {
    pub(super) lat: f64,
    pub(super) lon: f64,
}

impl OverpassResponseDto {
    pub(super) fn into_raw_pois(self) -> Result<Vec<RawPoi>, String> {
        self.elements
            .into_iter()
            .map(OverpassElementDto::into_raw_poi)
            .collect()
    }
}

impl OverpassElementDto {
    fn into_raw_poi(self) -> Result<RawPoi, String> {
        let (latitude, longitude) = self
            .coordinates()
            .ok_or_else(|| format!("element {} missing coordinates", self.id))?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(format!("element {} includes non-finite coordinates", self.id));
        }

        Ok(RawPoi {
            id: self.id,
            latitude,
            longitude,
            tags: self.tags,
        })
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Some((lat, lon));
        }
        self.center.as_ref().map(|center| (center.lat, center.lon))
    }
}
