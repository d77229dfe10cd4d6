//! Reqwest-backed Overpass source adapter.
//!
//! This adapter owns transport details only: query text construction,
//! timeout and HTTP error mapping, and JSON decoding into raw POIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::OverpassResponseDto;
use crate::domain::ports::{PoiSource, PoiSourceError, PoiSourceQuery, RawPoi};

const DEFAULT_QUERY_TIMEOUT_SECONDS: u32 = 600;
const DEFAULT_USER_AGENT: &str = "spotter-loader/0.1";

/// Overpass source adapter performing HTTP POST requests against one
/// endpoint.
pub struct OverpassHttpSource {
    client: Client,
    endpoint: Url,
    user_agent: String,
    query_timeout_seconds: u32,
}

impl OverpassHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            query_timeout_seconds: DEFAULT_QUERY_TIMEOUT_SECONDS,
        })
    }
}

#[async_trait]
impl PoiSource for OverpassHttpSource {
    async fn fetch_pois(&self, query: &PoiSourceQuery) -> Result<Vec<RawPoi>, PoiSourceError> {
        let query_text = build_overpass_query(query, self.query_timeout_seconds)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query_text)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_pois(body.as_ref())
    }
}

fn parse_pois(body: &[u8]) -> Result<Vec<RawPoi>, PoiSourceError> {
    let decoded: OverpassResponseDto = serde_json::from_slice(body).map_err(|error| {
        PoiSourceError::decode(format!("invalid Overpass JSON payload: {error}"))
    })?;
    decoded.into_raw_pois().map_err(PoiSourceError::decode)
}

fn build_overpass_query(
    query: &PoiSourceQuery,
    query_timeout_seconds: u32,
) -> Result<String, PoiSourceError> {
    let category = query.category.trim();
    if category.is_empty() {
        return Err(PoiSourceError::invalid_request(
            "category must not be blank",
        ));
    }

    let bbox = format!(
        "({south},{west},{north},{east})",
        south = query.bounding_box.south(),
        west = query.bounding_box.west(),
        north = query.bounding_box.north(),
        east = query.bounding_box.east(),
    );
    let selector = format!("[\"amenity\"=\"{}\"]", escape_quoted(category));

    Ok(format!(
        "[out:json][timeout:{query_timeout_seconds}];\n(\n  node{selector}{bbox};\n);\nout center;"
    ))
}

fn escape_quoted(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', "\\\"")
}

fn map_transport_error(error: reqwest::Error) -> PoiSourceError {
    if error.is_timeout() {
        PoiSourceError::timeout(error.to_string())
    } else {
        PoiSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PoiSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => PoiSourceError::timeout(message),
        _ if status.is_client_error() => PoiSourceError::invalid_request(message),
        _ => PoiSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
