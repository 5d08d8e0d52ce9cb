//! Persistent-store seam for the synthesis pipeline.
//!
//! A run opens one `UnitOfWork`, writes posts, comments and ballots through it,
//! and commits once. Dropping a unit of work without committing discards it.
//! Ballot inserts are individually isolated: a duplicate (post, fingerprint)
//! pair is rolled back on its own and reported as `BallotOutcome::Duplicate`.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::tag::TagRow;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A validated post ready to insert.
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub author_name: &'a str,
    pub is_true_story: bool,
    pub truth_score: i32,
    pub created_at: DateTime<Utc>,
    pub tag_ids: &'a [Uuid],
}

#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub post_id: Uuid,
    pub author_name: &'a str,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotOutcome {
    Cast,
    /// This fingerprint already has a ballot on this post; nothing was written.
    Duplicate,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    type Unit: UnitOfWork;

    /// Opens a unit of work. Units are serialised: `begin` waits until any
    /// other open unit has been committed or dropped.
    async fn begin(&self) -> Result<Self::Unit, StoreError>;
}

#[async_trait]
pub trait UnitOfWork: Send {
    async fn has_posts(&mut self) -> Result<bool, StoreError>;

    async fn insert_tag(&mut self, tag: &TagRow) -> Result<(), StoreError>;

    async fn load_tags(&mut self) -> Result<Vec<TagRow>, StoreError>;

    async fn load_slugs(&mut self) -> Result<HashSet<String>, StoreError>;

    /// Inserts the post and its tag links, returning the new post id.
    async fn insert_post(&mut self, post: &NewPost<'_>) -> Result<Uuid, StoreError>;

    async fn insert_comment(&mut self, comment: &NewComment<'_>) -> Result<(), StoreError>;

    /// Inserts one ballot inside its own nested unit of work.
    async fn insert_ballot(
        &mut self,
        post_id: Uuid,
        fingerprint: &str,
        value: i16,
    ) -> Result<BallotOutcome, StoreError>;

    async fn set_truth_score(&mut self, post_id: Uuid, truth_score: i32) -> Result<(), StoreError>;

    async fn commit(self) -> Result<(), StoreError>;
}
