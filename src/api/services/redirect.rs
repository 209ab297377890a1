use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::trace;
use url::Url;

use super::AppState;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        state: web::Data<AppState>,
    ) -> impl Responder {
        let id = path.into_inner();

        match state.store.resolve(&id) {
            Some(target) => {
                trace!("Redirecting {} -> {}", id, target);
                HttpResponse::MovedPermanently()
                    .insert_header(("Location", Self::location_header(target)))
                    .finish()
            }
            None => {
                trace!("Id not found: {}", id);
                Self::not_found_response()
            }
        }
    }

    /// Header values must be ASCII. Non-ASCII targets go out in their
    /// parsed form (percent-encoded path, punycode host).
    fn location_header(target: String) -> String {
        if target.is_ascii() {
            return target;
        }
        match Url::parse(&target) {
            Ok(url) => url.into(),
            Err(_) => target,
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "public, max-age=60"))
            .body("Not Found")
    }
}

pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{id}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
}
