//! HTTP request handlers

use super::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::error;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Output format: "text" for the plain allow-list mode, JSON otherwise
    pub format: Option<String>,
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = match params.q {
        Some(q) if !q.trim().is_empty() => q.trim().to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Hiányzó keresési kifejezés (q paraméter)"
                })),
            )
                .into_response();
        }
    };

    match params.format.as_deref() {
        Some("text") => plain_text_search(&state, &query).await,
        _ => json_search(&state, &query).await,
    }
}

/// JSON mode: parallel fetch-and-summarize with priority ranking
async fn json_search(state: &AppState, query: &str) -> Response {
    match state.pipeline.run(query).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => {
            error!("Search pipeline failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Belső szerverhiba",
                    "detail": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Plain-text mode: up to two raw article texts from trusted domains only
async fn plain_text_search(state: &AppState, query: &str) -> Response {
    match state.pipeline.run_plain(query).await {
        Ok(texts) => {
            let body = if texts.is_empty() {
                "Nem találtam megbízható információt.".to_string()
            } else {
                texts.join("\n\n---\n\n")
            };
            (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!("Plain-text search failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Belső szerverhiba",
                    "detail": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
