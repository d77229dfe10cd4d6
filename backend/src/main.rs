//! Server entry-point: wires the catalog store, services, and REST routes.

use std::env;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use spotter_backend::domain::CatalogService;
use spotter_backend::inbound::http::health::{live, ready, HealthState};
use spotter_backend::inbound::http::poi::{create_pois, get_pois};
use spotter_backend::inbound::http::state::HttpState;
use spotter_backend::outbound::persistence::{DbPool, DieselPoiRepository, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SHUTDOWN_GRACE_SECONDS: u64 = 5;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "DATABASE_URL must be set"))?;
    let bind_addr = env::var("SPOTTER_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());

    let pool_config = build_pool_config(&database_url)?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let repository = Arc::new(DieselPoiRepository::new(pool));
    let state = HttpState::new(CatalogService::new(repository));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .service(get_pois)
            .service(create_pois)
            .service(ready)
            .service(live)
    })
    .shutdown_timeout(SHUTDOWN_GRACE_SECONDS)
    .bind(bind_addr.as_str())?;

    info!(addr = %bind_addr, "server listening");
    health_state.mark_ready();
    server.run().await
}

fn build_pool_config(database_url: &str) -> io::Result<PoolConfig> {
    let mut config = PoolConfig::new(database_url);
    if let Some(max_size) = parse_env_var::<u32>("SPOTTER_DB_MAX_CONNECTIONS")? {
        config = config.with_max_size(max_size);
    }
    if let Some(idle_seconds) = parse_env_var::<u64>("SPOTTER_DB_IDLE_TIMEOUT_SECONDS")? {
        config = config.with_idle_timeout(Some(Duration::from_secs(idle_seconds)));
    }
    Ok(config)
}

fn parse_env_var<T: std::str::FromStr>(key: &str) -> io::Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{key} holds an unparseable value: {raw}"),
            )
        }),
        Err(_) => Ok(None),
    }
}
