//! 统一 API 响应与错误码

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinkvaultError;

/// API 错误码
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,

    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkPersistenceError = 3005,
    LinkInvalidAlias = 3007,
}

impl From<&LinkvaultError> for ErrorCode {
    fn from(err: &LinkvaultError) -> Self {
        match err {
            LinkvaultError::AliasInUse(_) => ErrorCode::LinkAlreadyExists,
            LinkvaultError::InvalidAlias(_) => ErrorCode::LinkInvalidAlias,
            LinkvaultError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            LinkvaultError::Persistence(_) => ErrorCode::LinkPersistenceError,
            LinkvaultError::CorruptState(_)
            | LinkvaultError::FileOperation(_)
            | LinkvaultError::Config(_) => ErrorCode::InternalServerError,
        }
    }
}

/// HTTP status for a store error.
pub fn http_status(err: &LinkvaultError) -> StatusCode {
    match err {
        LinkvaultError::AliasInUse(_) => StatusCode::CONFLICT,
        LinkvaultError::InvalidAlias(_) | LinkvaultError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建错误响应
pub fn error_response(status: StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, code, message, None)
}

/// 从 LinkvaultError 构建错误响应
pub fn error_from_linkvault(err: &LinkvaultError) -> HttpResponse {
    // Internal details stay in the log
    let message = if err.is_user_error() {
        err.message()
    } else {
        "Internal Server Error"
    };
    error_response(http_status(err), ErrorCode::from(err), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            http_status(&LinkvaultError::alias_in_use("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            http_status(&LinkvaultError::invalid_url("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            http_status(&LinkvaultError::invalid_alias("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            http_status(&LinkvaultError::persistence("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_code_serializes_as_number() {
        let body = serde_json::to_string(&ApiResponse::<()> {
            code: ErrorCode::LinkAlreadyExists as i32,
            message: "taken".into(),
            data: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"code":3001,"message":"taken"}"#);
        assert_eq!(
            serde_json::to_string(&ErrorCode::Unauthorized).unwrap(),
            "1001"
        );
    }
}
