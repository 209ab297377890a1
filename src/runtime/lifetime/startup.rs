//! Startup: lock the data directory, replay the link log, load the API key.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::ApiKey;
use crate::config::{StaticConfig, StorageConfig};
use crate::services::LinkStore;
use crate::system::Lockfile;

pub struct StartupContext {
    pub store: Arc<LinkStore>,
    pub api_key: Option<ApiKey>,
    /// Released (and the file removed) when the context is dropped.
    pub lock: Lockfile,
}

/// Lock the data directory and load the store. Used by the server and by
/// CLI commands that write.
pub fn open_store(storage: &StorageConfig) -> Result<(Arc<LinkStore>, Lockfile)> {
    let lock = Lockfile::acquire(storage.lock_path()).with_context(|| {
        format!(
            "Failed to lock data directory {} (is another instance running?)",
            storage.data_dir
        )
    })?;

    let store = LinkStore::open(storage).with_context(|| {
        format!(
            "Failed to load link store from {}",
            storage.links_path().display()
        )
    })?;

    Ok((Arc::new(store), lock))
}

/// 准备服务器启动的上下文
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = Instant::now();
    debug!("Starting pre-startup processing...");

    let (store, lock) = open_store(&config.storage)?;

    let api_key = ApiKey::load(&config.api).context("Failed to load API key")?;
    if api_key.is_none() {
        info!("Programmatic API is disabled (no API key configured)");
    } else {
        info!("Programmatic API available at /api/create");
    }

    info!(
        "Pre-startup completed in {} ms: {} links loaded",
        start_time.elapsed().as_millis(),
        store.len()
    );

    Ok(StartupContext {
        store,
        api_key,
        lock,
    })
}
