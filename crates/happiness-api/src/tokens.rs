use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use happiness_types::api::{IssueTokenResponse, TokenStatusResponse};

use crate::state::AppState;

/// POST /api/token: mint a fresh visitor token.
pub async fn issue_token(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let token = tokio::task::spawn_blocking(move || db.issuer.issue())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok((StatusCode::CREATED, Json(IssueTokenResponse { token })))
}

/// GET /api/token/{token}: current count without counting a visit.
pub async fn token_status(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let token = tokio::task::spawn_blocking(move || db.counter.current(&token))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("DB get_token error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(TokenStatusResponse {
        token: token.value,
        visit_count: token.visit_count,
        created_at: token.created_at,
        last_visit_at: token.last_visit_at,
    }))
}
