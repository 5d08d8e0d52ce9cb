//! Read-only community views: the persona roster and site totals.

pub mod handlers;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::synthesis::personas::ROSTER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegularSummary {
    pub name: &'static str,
    pub bio: &'static str,
    pub comments: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct SiteStats {
    pub total_posts: i64,
    pub total_comments: i64,
    pub total_votes: i64,
    pub total_tags: i64,
    pub last_post_at: Option<DateTime<Utc>>,
}

/// Every persona with its comment count, busiest first. Ties keep roster order.
pub fn rank_regulars(comment_counts: &HashMap<String, i64>) -> Vec<RegularSummary> {
    let mut regulars: Vec<RegularSummary> = ROSTER
        .iter()
        .map(|p| RegularSummary {
            name: p.display_name,
            bio: p.bio,
            comments: comment_counts.get(p.display_name).copied().unwrap_or(0),
        })
        .collect();
    regulars.sort_by(|a, b| b.comments.cmp(&a.comments));
    regulars
}

pub async fn load_regulars(pool: &PgPool) -> Result<Vec<RegularSummary>, sqlx::Error> {
    let names: Vec<&str> = ROSTER.iter().map(|p| p.display_name).collect();
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT author_name, COUNT(*)
        FROM comments
        WHERE author_name = ANY($1)
        GROUP BY author_name
        "#,
    )
    .bind(&names)
    .fetch_all(pool)
    .await?;

    Ok(rank_regulars(&rows.into_iter().collect()))
}

pub async fn load_stats(pool: &PgPool) -> Result<SiteStats, sqlx::Error> {
    sqlx::query_as::<_, SiteStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM posts)    AS total_posts,
            (SELECT COUNT(*) FROM comments) AS total_comments,
            (SELECT COUNT(*) FROM votes)    AS total_votes,
            (SELECT COUNT(*) FROM tags)     AS total_tags,
            (SELECT MAX(created_at) FROM posts) AS last_post_at
        "#,
    )
    .fetch_one(pool)
    .await
}
