use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type AppSuccess = GenericResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericResponse {
    pub status: u16,
    pub message: String,
    pub data: serde_json::Value,
}

impl GenericResponse {
    pub fn new(status: StatusCode, message: &str, data: serde_json::Value) -> Self {
        Self {
            status: status.as_u16(),
            message: message.to_string(),
            data,
        }
    }

    pub fn ok(message: &str, data: serde_json::Value) -> Self {
        Self::new(StatusCode::OK, message, data)
    }
}

impl IntoResponse for GenericResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json::from(self)).into_response()
    }
}

// Wraps `anyhow::Error` together with the status the client should see.
#[derive(Debug)]
pub struct AppError(pub StatusCode, pub anyhow::Error);
impl AppError {
    pub fn new(status: StatusCode, err: anyhow::Error) -> Self {
        Self(status, err)
    }

    pub fn not_found(message: impl std::fmt::Display) -> Self {
        Self(StatusCode::NOT_FOUND, anyhow::anyhow!("{}", message))
    }

    /// Operator-facing failure: the message goes out as-is.
    pub fn user_facing(status: StatusCode, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(status, anyhow::anyhow!(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            tracing::error!("CODE: {}, MESSAGE: {}", self.0.as_u16(), self.1);
        } else {
            tracing::warn!("CODE: {}, MESSAGE: {}", self.0.as_u16(), self.1);
        }
        GenericResponse::new(self.0, &self.1.to_string(), json!({})).into_response()
    }
}

// Lets handlers use `?` on anything convertible to `anyhow::Error`; those
// surface as 400s.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(StatusCode::BAD_REQUEST, err.into())
    }
}
