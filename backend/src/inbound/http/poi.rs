//! POI API handlers.
//!
//! ```text
//! GET /poi?lat=55.7&lon=37.6
//! POST /poi [{"id":1,"lat":55.7,"lon":37.6,"tags":{"amenity":"cafe"}}]
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::{CreatePoiRequest, Poi};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for `GET /poi`.
///
/// Missing or non-numeric values are rejected by the extractor with a 400
/// before the handler runs; range validation happens in the domain.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    /// Latitude of the query coordinate.
    pub lat: f64,
    /// Longitude of the query coordinate.
    pub lon: f64,
}

/// Return POIs in the cell covering the coordinate and its ring-1
/// neighbourhood, unsorted and unlimited.
#[get("/poi")]
pub async fn get_pois(
    state: web::Data<HttpState>,
    params: web::Query<NearbyParams>,
) -> ApiResult<web::Json<Vec<Poi>>> {
    info!(lat = params.lat, lon = params.lon, "incoming nearby query");

    let pois = state.catalog.nearby(params.lat, params.lon).await?;

    info!(result_count = pois.len(), "found pois");
    Ok(web::Json(pois))
}

/// Create a batch of POIs.
///
/// Per-record validation failures (out-of-range coordinates, missing
/// `amenity` tag) drop the record from the batch rather than failing the
/// request; duplicate ids are rejected per record by the store.
#[post("/poi")]
pub async fn create_pois(
    state: web::Data<HttpState>,
    payload: web::Json<Vec<CreatePoiRequest>>,
) -> ApiResult<HttpResponse> {
    let requests = payload.into_inner();
    info!(record_count = requests.len(), "incoming create batch");

    let (admission, outcome) = state.catalog.create_batch(requests).await?;

    info!(
        inserted = outcome.inserted,
        dropped = admission.dropped,
        rejected = outcome.rejected.len(),
        "processed create batch"
    );
    Ok(HttpResponse::Created().json(json!({ "status": "ok" })))
}
