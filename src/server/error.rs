use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::utils::ChapterError;

/// Error returned by request handlers
#[derive(Debug)]
pub enum ApiError {
    Chapter(ChapterError),
    UnknownChapter(String),
    InvalidMetadata(String),
}

impl From<ChapterError> for ApiError {
    fn from(err: ChapterError) -> Self {
        Self::Chapter(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Chapter(err) => (err.status_code(), err.to_string()),
            Self::UnknownChapter(raw) => {
                (StatusCode::NOT_FOUND, format!("Unknown chapter id: {raw}"))
            }
            Self::InvalidMetadata(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
        };

        if status.is_server_error() {
            error!(%status, "{}", message);
        } else {
            warn!(%status, "{}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
