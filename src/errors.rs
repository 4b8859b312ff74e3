use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use redis::RedisError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{resource} not found with id of {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Resource not found")]
    InvalidId,

    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Duplicate field value entered for '{field}'")]
    Conflict { field: &'static str },

    #[error("{0}")]
    Upload(String),

    #[error("Geocoding failed: {0}")]
    Geocode(String),

    #[error("Redis pool error: {0}")]
    RedisPoolError(String),

    #[error("Redis command error: {0}")]
    RedisCommandError(#[from] RedisError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Problem with file write: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn to_response(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidId => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Conflict { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Upload(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Geocode(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::RedisPoolError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.clone()),
            AppError::RedisCommandError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Serialization(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Deserialization(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        }
    }
}

// Every error leaving a handler becomes exactly one `{success:false, error}`
// body with the status from `to_response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.to_response();
        tracing::error!("Request failed ({}): {}", status.as_u16(), message);
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
