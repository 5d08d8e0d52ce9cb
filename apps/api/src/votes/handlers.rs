use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::votes::{apply_manual_vote, read_vote, validate_vote, VoteRequest, VoteResponse};

#[derive(Debug, Deserialize)]
pub struct FingerprintQuery {
    pub fingerprint: Option<String>,
}

/// POST /api/posts/:post_id/vote
pub async fn handle_cast_vote(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    let value = validate_vote(&req)?;
    let response = apply_manual_vote(&state.db, post_id, req.fingerprint.trim(), value).await?;
    Ok(Json(response))
}

/// GET /api/posts/:post_id/vote?fingerprint=
pub async fn handle_get_vote(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(params): Query<FingerprintQuery>,
) -> Result<Json<VoteResponse>, AppError> {
    let fingerprint = params
        .fingerprint
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty());
    let response = read_vote(&state.db, post_id, fingerprint).await?;
    Ok(Json(response))
}
