//! Headline Fetcher: best-effort grounding for post drafting.
//!
//! Walks a fixed list of RSS/Atom feeds in order and collects entry titles until
//! `max_items` are gathered. Every per-feed failure (transport, status, parse) is
//! logged and skipped; callers always get a list, possibly empty.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

const FEED_TIMEOUT_SECS: u64 = 5;
const USER_AGENT: &str = "fakefootball-bot/1.0";

/// Source of real-world headline strings. Never fails; an empty list is a valid answer.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, max_items: usize) -> Vec<String>;
}

pub struct FeedHeadlines {
    client: reqwest::Client,
    feeds: Vec<String>,
}

impl FeedHeadlines {
    pub fn new(feeds: Vec<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FEED_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build feed HTTP client")?;
        Ok(Self { client, feeds })
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<String>> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .context("feed fetch failed")?
            .error_for_status()
            .context("feed returned error status")?
            .bytes()
            .await
            .context("failed to read feed body")?;

        parse_feed_titles(&bytes)
    }
}

#[async_trait]
impl HeadlineSource for FeedHeadlines {
    async fn fetch_headlines(&self, max_items: usize) -> Vec<String> {
        let mut headlines = Vec::new();

        for url in &self.feeds {
            if headlines.len() >= max_items {
                break;
            }
            match self.fetch_feed(url).await {
                Ok(titles) => {
                    let room = max_items - headlines.len();
                    headlines.extend(titles.into_iter().take(room));
                }
                Err(e) => warn!(feed_url = %url, "headline feed skipped: {e:#}"),
            }
        }

        info!(count = headlines.len(), "headlines fetched");
        headlines
    }
}

/// Extracts non-empty entry titles from an RSS or Atom document.
pub fn parse_feed_titles(bytes: &[u8]) -> Result<Vec<String>> {
    let feed = feed_rs::parser::parse(bytes).context("Failed to parse RSS/Atom feed")?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content.trim().to_string()))
        .filter(|title| !title.is_empty())
        .collect())
}
