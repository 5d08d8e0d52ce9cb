mod community;
mod config;
mod db;
mod errors;
mod headlines;
mod llm_client;
mod models;
mod routes;
mod seed;
mod state;
mod store;
mod synthesis;
mod votes;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::headlines::FeedHeadlines;
use crate::llm_client::{CompletionModel, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FakeFootball API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    let store = PgStore::new(db.clone());
    if seed::bootstrap(&store).await.context("Failed to seed database")? {
        info!("Seed data inserted");
    }

    // Initialize LLM client (optional: no key, no synthesis)
    let llm: Option<Arc<dyn CompletionModel>> = match &config.groq_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.groq_base_url.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as Arc<dyn CompletionModel>)
        }
        None => {
            warn!("GROQ_API_KEY not set, post synthesis is disabled");
            None
        }
    };

    let headlines = Arc::new(FeedHeadlines::new(config.news_feeds.clone())?);
    info!("Headline fetcher configured with {} feeds", config.news_feeds.len());

    // Build app state
    let state = AppState {
        db,
        store,
        llm,
        headlines,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
