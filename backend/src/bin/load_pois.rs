//! Load POIs from Overpass into the catalog in fixed-size batches.

use std::env;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::runtime::Builder;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use spotter_backend::domain::ports::PoiSourceQuery;
use spotter_backend::domain::{BoundingBox, LoaderService};
use spotter_backend::outbound::catalog_api::CatalogHttpWriter;
use spotter_backend::outbound::overpass::OverpassHttpSource;

const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_CATALOG_URL: &str = "http://localhost:8080/poi";
// Request timeout sits above the 600 s timeout embedded in the query text.
const FETCH_TIMEOUT: Duration = Duration::from_secs(610);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// `load-pois` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "load-pois",
    about = "Fetch POIs for a bounding box and upload them to the catalog",
    version
)]
struct CliArgs {
    /// Bounding box as `south,west,north,east`.
    #[arg(
        long = "bbox",
        value_name = "south,west,north,east",
        value_parser = parse_bbox
    )]
    bbox: BoundingBox,
    /// Amenity category to fetch, e.g. `cafe`.
    #[arg(long = "category", value_name = "amenity", default_value = "cafe")]
    category: String,
    /// Catalog create endpoint. Falls back to `SPOTTER_API_URL` when omitted.
    #[arg(long = "endpoint", value_name = "url")]
    endpoint: Option<String>,
    /// Overpass interpreter endpoint.
    #[arg(long = "overpass-url", value_name = "url", default_value = DEFAULT_OVERPASS_URL)]
    overpass_url: String,
    /// Records per upload batch.
    #[arg(long = "batch-size", value_name = "count", default_value_t = 1024)]
    batch_size: usize,
}

fn main() -> io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let overpass_url = parse_url(&args.overpass_url, "overpass URL")?;
    let endpoint = parse_url(&resolve_endpoint(args.endpoint), "catalog endpoint")?;

    let source = OverpassHttpSource::new(overpass_url, FETCH_TIMEOUT)
        .map_err(|error| io::Error::other(format!("build Overpass client: {error}")))?;
    let writer = CatalogHttpWriter::new(endpoint, UPLOAD_TIMEOUT)
        .map_err(|error| io::Error::other(format!("build catalog client: {error}")))?;

    let loader = LoaderService::new(Arc::new(source), Arc::new(writer), args.batch_size);
    let query = PoiSourceQuery {
        bounding_box: args.bbox,
        category: args.category,
    };

    let report = loader
        .run(&query)
        .await
        .map_err(|error| io::Error::other(format!("ingestion run failed: {error}")))?;

    println!("fetched={}", report.fetched);
    println!("batches={}", report.batches);
    println!("uploaded={}", report.uploaded);
    println!("failed={}", report.failed);

    Ok(())
}

fn parse_bbox(raw: &str) -> Result<BoundingBox, String> {
    let values = raw
        .split(',')
        .map(str::trim)
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("failed to parse bounding box value: {error}"))?;
    let [south, west, north, east]: [f64; 4] = values.try_into().map_err(|_| {
        "bounding box must contain exactly four comma-separated numeric values".to_owned()
    })?;
    BoundingBox::new(south, west, north, east).map_err(|error| error.to_string())
}

fn parse_url(raw: &str, what: &str) -> io::Result<Url> {
    Url::parse(raw)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, format!("{what}: {error}")))
}

fn resolve_endpoint(explicit: Option<String>) -> String {
    explicit
        .or_else(|| env::var("SPOTTER_API_URL").ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_owned())
}
