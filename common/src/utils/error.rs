use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Input validation failed: {field}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    const DB_ERROR: &'static str = "DB_ERROR";
    const VALIDATION_ERROR: &'static str = "VALIDATION_ERROR";
    const CONFIG_ERROR: &'static str = "CONFIG_ERROR";
    const NOT_FOUND: &'static str = "NOT_FOUND";
    const IO_ERROR: &'static str = "IO_ERROR";

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                    Self::DB_ERROR,
                )
            }
            Self::Validation { message, .. } => (
                StatusCode::BAD_REQUEST,
                message.clone(),
                Self::VALIDATION_ERROR,
            ),
            Self::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".into(),
                    Self::CONFIG_ERROR,
                )
            }
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{resource} with id {id} not found"),
                Self::NOT_FOUND,
            ),
            Self::Io(e) => {
                tracing::error!("IO error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                    Self::IO_ERROR,
                )
            }
        };

        let body = json!({
            "error": message,
            "error_code": code,
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
