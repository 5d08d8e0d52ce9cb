use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::headlines::HeadlineSource;
use crate::llm_client::CompletionModel;
use crate::store::postgres::PgStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Unit-of-work view over `db` used by the synthesis pipeline.
    pub store: PgStore,
    /// `None` when no model credential is configured.
    pub llm: Option<Arc<dyn CompletionModel>>,
    pub headlines: Arc<dyn HeadlineSource>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State over a pool that never connects. Any handler that reaches the
    /// database fails, which is what router tests rely on.
    pub fn for_tests(
        config: Config,
        llm: Option<Arc<dyn CompletionModel>>,
        headlines: Arc<dyn HeadlineSource>,
    ) -> Self {
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        Self {
            store: PgStore::new(db.clone()),
            db,
            llm,
            headlines,
            config,
        }
    }
}
