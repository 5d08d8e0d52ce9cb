use axum::{extract::State, Json};

use crate::community::{load_regulars, load_stats, RegularSummary, SiteStats};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/regulars
pub async fn handle_regulars(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegularSummary>>, AppError> {
    Ok(Json(load_regulars(&state.db).await?))
}

/// GET /api/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<SiteStats>, AppError> {
    Ok(Json(load_stats(&state.db).await?))
}
