//! Creation form: `GET /` renders it, `POST /` submits it.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{debug, error, trace};

use super::AppState;
use crate::errors::LinkvaultError;
use crate::utils::escape_html;

const CREATE_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/templates/create.html"
));

/// Form fields posted by the creation page.
#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub custom: String,
}

pub struct FrontendService;

impl FrontendService {
    pub async fn handle_index() -> impl Responder {
        trace!("Serving creation form");
        Self::page(StatusCode::OK, "")
    }

    pub async fn handle_create(
        form: web::Form<CreateForm>,
        state: web::Data<AppState>,
    ) -> impl Responder {
        let CreateForm { url, custom } = form.into_inner();
        let custom = Some(custom.trim().to_string()).filter(|c| !c.is_empty());

        match state.create_link(custom, url.trim().to_string()).await {
            Ok(id) => {
                debug!("Form created link {}", id);
                let link = escape_html(&state.short_url(&id));
                let extra = format!(
                    r#"<label for="result">Your URL:</label>
        <input type="text" value="{}" id="result" readonly>
        <button onclick="copyText()">Copy</button>"#,
                    link
                );
                Self::page(StatusCode::OK, &extra)
            }
            Err(e) => {
                let status = super::response::http_status(&e);
                if status.is_server_error() {
                    error!("Failed to create link from form: {}", e);
                }
                Self::page(status, &Self::error_message(&e))
            }
        }
    }

    fn error_message(err: &LinkvaultError) -> String {
        let text = match err {
            LinkvaultError::AliasInUse(_) => "Sorry, that alias is in use!",
            LinkvaultError::InvalidUrl(_) => "That is not a valid URL!",
            LinkvaultError::InvalidAlias(_) => {
                "That alias contains characters that cannot be used in a link."
            }
            _ => "Something went wrong while saving your link. Please try again.",
        };
        format!(r#"<p class="error">{}</p>"#, text)
    }

    /// Fill the template. `extra` is inserted as-is and must already be
    /// escaped.
    fn page(status: StatusCode, extra: &str) -> HttpResponse {
        let body = CREATE_TEMPLATE
            .replace("%EXTRA%", extra)
            .replace("%VERSION%", env!("CARGO_PKG_VERSION"));

        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body)
    }
}

pub fn frontend_routes() -> actix_web::Resource {
    web::resource("/")
        .route(web::get().to(FrontendService::handle_index))
        .route(web::head().to(FrontendService::handle_index))
        .route(web::post().to(FrontendService::handle_create))
}
