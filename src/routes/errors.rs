use std::any::Any;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::params::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("keyword must not be empty")]
    EmptyKeyword,

    #[error("request body must be a JSON object")]
    MalformedBody,

    /// Detail stays in the server log.
    #[error("search failed")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyKeyword | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unparseable JSON or a missing content type is the client's fault. A body that
/// parses but does not fit `SearchRequest` (e.g. a numeric keyword) is a
/// handling failure and gets the generic 500.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::MissingJsonContentType(_) => {
                warn!(%rejection, "rejected search request body");
                ApiError::MalformedBody
            }
            _ => {
                error!(%rejection, "failed to decode search request");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Turns a panic inside request handling into a 500 error envelope.
pub(super) fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = detail, "request handler panicked");
    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_keyword_is_bad_request() {
        let response = ApiError::EmptyKeyword.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_body_message_is_fixed() {
        let err = ApiError::MalformedBody;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "request body must be a JSON object");
    }

    #[test]
    fn internal_error_hides_detail() {
        let err = ApiError::Internal;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "search failed");
    }

    #[test]
    fn panic_response_is_internal_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
