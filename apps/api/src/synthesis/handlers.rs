use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;
use crate::synthesis::orchestrator::{RunSummary, Synthesizer};

/// Length check, then an XOR fold over every byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// With a cron secret configured the caller must send `Bearer <secret>`.
/// Without one, only non-production deployments accept the trigger.
pub fn authorize_cron(headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let Some(secret) = config.cron_secret.as_deref() else {
        if config.production {
            warn!("Cron trigger refused: no CRON_SECRET in production");
            return Err(AppError::Unauthorized);
        }
        return Ok(());
    };

    let presented = headers
        .get(axum::http::header::AUTHORIZATION)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    let expected = format!("Bearer {secret}");

    if constant_time_eq(presented, expected.as_bytes()) {
        Ok(())
    } else {
        warn!("Cron trigger refused: bad or missing bearer token");
        Err(AppError::Unauthorized)
    }
}

/// GET /api/cron/generate-posts
/// Runs the synthesis pipeline once and returns its summary.
pub async fn handle_generate_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RunSummary>, AppError> {
    authorize_cron(&headers, &state.config)?;

    let synthesizer = Synthesizer {
        model: state.llm.as_deref(),
        headlines: state.headlines.as_ref(),
        store: &state.store,
        settings: state.config.synthesis,
    };
    let mut rng = StdRng::from_entropy();
    let summary = synthesizer.run(&mut rng, Utc::now()).await?;
    Ok(Json(summary))
}
