//! Programmatic creation: `POST /api/create`
//!
//! Fields `target` (or `url`), optional `id` (or `custom`) and `key` come
//! from a JSON or form body, falling back to the query string. The key may
//! also arrive in `X-Api-Key`. Body extraction never fails the request, so
//! the 404 and 401 checks always run first.

use actix_web::http::StatusCode;
use actix_web::{Either, HttpRequest, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::AppState;
use super::response::{ErrorCode, error_from_linkvault, error_response, json_response};

pub const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCreateRequest {
    #[serde(default, alias = "url")]
    pub target: Option<String>,
    #[serde(default, alias = "custom")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl ApiCreateRequest {
    /// Field-wise merge; non-empty values in `self` win over `fallback`.
    pub fn or(self, fallback: ApiCreateRequest) -> Self {
        fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
            non_empty(primary).or_else(|| non_empty(fallback))
        }
        Self {
            target: pick(self.target, fallback.target),
            id: pick(self.id, fallback.id),
            key: pick(self.key, fallback.key),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedLink {
    pub id: String,
    pub short_url: String,
}

pub struct CreateService;

impl CreateService {
    pub async fn handle_create(
        req: HttpRequest,
        body: Option<Either<web::Json<ApiCreateRequest>, web::Form<ApiCreateRequest>>>,
        query: Option<web::Query<ApiCreateRequest>>,
        state: web::Data<AppState>,
    ) -> impl Responder {
        let Some(api_key) = state.api_key.as_ref() else {
            return error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, "Not Found");
        };

        let body = match body {
            Some(Either::Left(json)) => json.into_inner(),
            Some(Either::Right(form)) => form.into_inner(),
            None => ApiCreateRequest::default(),
        };
        let query = query.map(web::Query::into_inner).unwrap_or_default();
        let params = body.or(query);

        let header_key = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let candidate = non_empty(params.key.clone())
            .or_else(|| non_empty(header_key))
            .unwrap_or_default();

        if !api_key.verify(&candidate) {
            warn!("Rejected API create request: bad or missing key");
            return error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Unauthorized",
            );
        }

        let target = params.target.unwrap_or_default();

        match state.create_link(params.id, target).await {
            Ok(id) => {
                info!("API created link {}", id);
                let short_url = state.short_url(&id);
                json_response(
                    StatusCode::CREATED,
                    ErrorCode::Success,
                    "Created",
                    Some(CreatedLink { id, short_url }),
                )
            }
            Err(e) => {
                if e.is_user_error() {
                    warn!("API create rejected: {}", e);
                } else {
                    error!("API create failed: {}", e);
                }
                error_from_linkvault(&e)
            }
        }
    }
}

pub fn api_routes() -> actix_web::Scope {
    web::scope("/api").route("/create", web::post().to(CreateService::handle_create))
}
