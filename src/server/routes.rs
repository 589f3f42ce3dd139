use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::{cors::CorsLayer, services::ServeFile};

use super::error::ApiError;
use crate::app::AppState;
use crate::constants::AUDIO_CONTENT_TYPE;
use crate::utils::ChapterError;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/config", get(practice_config))
        .route("/api/chapters", get(list_chapters))
        .route("/api/chapters/:id/metadata", get(chapter_metadata))
        .route("/api/chapters/:id/audio", get(chapter_audio))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn practice_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.practice.clone())
}

async fn list_chapters(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "chapters": state.catalog.chapters() }))
}

/// Any id that is not an integer is simply not in the catalog
fn parse_chapter_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::UnknownChapter(raw.to_string()))
}

/// Metadata is fetched on first access, then parsed from the cached file
async fn chapter_metadata(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_chapter_id(&raw_id)?;
    let paths = state.cache.ensure(id).await?;

    let text = tokio::fs::read_to_string(&paths.json_path)
        .await
        .map_err(|e| ChapterError::local_io(&paths.json_path, e))?;

    let data = serde_json::from_str(&text).map_err(|e| {
        ApiError::InvalidMetadata(format!("Chapter {id} metadata is not valid JSON: {e}"))
    })?;

    Ok(Json(data))
}

/// Audio is served through `ServeFile`, which answers range and conditional requests
async fn chapter_audio(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let id = parse_chapter_id(&raw_id)?;
    let paths = state.cache.ensure(id).await?;

    let mut response = match ServeFile::new(&paths.audio_path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };

    if response.status().is_success() {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(AUDIO_CONTENT_TYPE),
        );
    }

    Ok(response)
}
