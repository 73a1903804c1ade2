use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

pub const NOT_FOUND_DETAIL: &str = "Usuário não encontrado";

/// JSON error body: `{"error": <title>, "detail": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<Value>,
}

impl JsonApiError {
    pub fn new<D: Into<Value>>(status: StatusCode, error: &str, detail: Option<D>) -> Self {
        Self { status, error: error.to_string(), detail: detail.map(Into::into) }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_DETAIL))
    }

    /// 422 carrying one entry per offending field.
    pub fn validation(fields: Vec<FieldError>) -> Self {
        let detail = serde_json::to_value(fields).unwrap_or(Value::Null);
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(detail))
    }
}

/// Field-level validation detail, e.g. `{"loc": ["query", "phone"], "msg": "field required", ...}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub loc: [&'static str; 2],
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn missing(source: &'static str, field: &'static str) -> Self {
        Self { loc: [source, field], msg: "field required".into(), kind: "value_error.missing" }
    }

    /// The whole source failed to decode; `msg` carries the decoder's reason.
    pub fn malformed(source: &'static str, msg: String) -> Self {
        Self { loc: [source, "__root__"], msg, kind: "value_error.malformed" }
    }

    pub fn invalid_integer(source: &'static str, field: &'static str) -> Self {
        Self { loc: [source, field], msg: "value is not a valid integer".into(), kind: "type_error.integer" }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a Value>,
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.error, detail: self.detail.as_ref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Constraint(msg) => {
                error!(err = %msg, "constraint violation");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Constraint Violation", Some(msg))
            }
            ServiceError::Db(msg) => {
                error!(err = %msg, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(msg))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
