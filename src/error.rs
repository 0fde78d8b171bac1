use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::types::PlayerId;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] sqlx::Error),

    #[error("Table {0} does not exist or has no columns")]
    MissingTable(String),

    #[error("Table {table} is missing required column {column}")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Table {table}, row {row}: column {column} has an unusable value")]
    InvalidValue {
        table: &'static str,
        column: String,
        row: usize,
    },

    #[error("Duplicate player id {0} in player_summary")]
    DuplicatePlayer(PlayerId),

    #[error("Unknown metric {metric} for table {table}")]
    UnknownMetric { table: &'static str, metric: String },

    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("Selection index {index} out of range for {len} players")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::UnknownMetric { .. } | AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            AppError::IndexOutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
