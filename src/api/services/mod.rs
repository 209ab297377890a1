pub mod create;
pub mod frontend;
pub mod redirect;
pub mod response;

use std::sync::Arc;

use actix_web::web;
use tracing::error;

use crate::api::api_key::ApiKey;
use crate::errors::{LinkvaultError, Result};
use crate::services::LinkStore;

pub use create::{ApiCreateRequest, CreateService, CreatedLink, api_routes};
pub use frontend::{FrontendService, frontend_routes};
pub use redirect::{RedirectService, redirect_routes};

/// Shared handler state, registered once as `web::Data<AppState>`.
pub struct AppState {
    pub store: Arc<LinkStore>,
    /// Base for rendered short links, without trailing slash.
    pub public_url: String,
    /// `None` disables `POST /api/create`.
    pub api_key: Option<ApiKey>,
}

impl AppState {
    pub fn new(store: Arc<LinkStore>, public_url: &str, api_key: Option<ApiKey>) -> Self {
        Self {
            store,
            public_url: public_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.public_url, id)
    }

    /// Run `LinkStore::create` on the blocking pool; it holds the write
    /// lock across file I/O.
    pub async fn create_link(&self, id: Option<String>, target: String) -> Result<String> {
        let store = self.store.clone();
        web::block(move || store.create(id.as_deref(), &target))
            .await
            .map_err(|e| {
                error!("Blocking pool failed while creating link: {}", e);
                LinkvaultError::persistence(format!("Blocking pool failed: {}", e))
            })?
    }
}

/// Register every route. `/api/create` comes before the `/{id}` catch-all.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_routes())
        .service(frontend_routes())
        .service(redirect_routes());
}
