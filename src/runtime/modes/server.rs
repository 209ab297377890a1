//! Server mode
//!
//! Loads the store and serves the creation form, the redirect route and
//! the keyed creation API.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::middleware::TimingMiddleware;
use crate::api::{AppState, configure};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server(config: Arc<StaticConfig>) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        tracing::error!("Server startup failed: {:#}", e);
        e
    })?;

    let state = web::Data::new(AppState::new(
        startup.store.clone(),
        &config.server.public_url,
        startup.api_key.clone(),
    ));

    let workers = config.server.workers.clamp(1, 32);
    info!("Using {} worker threads", workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(configure)
    })
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    info!("Server stopped, releasing {}", startup.lock.path().display());
    drop(startup);
    Ok(())
}
