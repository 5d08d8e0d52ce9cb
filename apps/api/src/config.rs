use anyhow::{Context, Result};

/// Feeds tried, in order, when `NEWS_FEEDS` is not set.
const DEFAULT_NEWS_FEEDS: &[&str] = &[
    "https://www.espn.com/espn/rss/soccer/news",
    "https://www.theguardian.com/football/rss",
    "https://feeds.skynews.com/feeds/rss/sports.xml",
    "http://newsrss.bbc.co.uk/rss/sportonline_uk_edition/football/rss.xml",
];

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if `DATABASE_URL` is missing; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Unset means drafting and commenting are disabled, not broken.
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub cron_secret: Option<String>,
    /// `APP_ENV=production`. Without a cron secret, production refuses the trigger.
    pub production: bool,
    pub news_feeds: Vec<String>,
    pub synthesis: SynthesisSettings,
    pub port: u16,
    pub rust_log: String,
}

/// Knobs for one synthesis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisSettings {
    pub posts_per_run: usize,
    pub comments_per_post: usize,
    pub max_headlines: usize,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            posts_per_run: 2,
            comments_per_post: 4,
            max_headlines: 8,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = SynthesisSettings::default();

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_base_url: optional_env("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            cron_secret: optional_env("CRON_SECRET"),
            production: optional_env("APP_ENV").is_some_and(|v| v == "production"),
            news_feeds: optional_env("NEWS_FEEDS")
                .map(|raw| parse_feed_list(&raw))
                .unwrap_or_else(|| DEFAULT_NEWS_FEEDS.iter().map(|s| s.to_string()).collect()),
            synthesis: SynthesisSettings {
                posts_per_run: parse_env("SYNTH_POSTS_PER_RUN", defaults.posts_per_run)?,
                comments_per_post: parse_env(
                    "SYNTH_COMMENTS_PER_POST",
                    defaults.comments_per_post,
                )?,
                max_headlines: parse_env("SYNTH_MAX_HEADLINES", defaults.max_headlines)?,
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Local, unauthenticated, no model. Tests override what they need.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/fakefootball_test".to_string(),
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            cron_secret: None,
            production: false,
            news_feeds: Vec::new(),
            synthesis: SynthesisSettings::default(),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn parse_feed_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
