//! In-memory `ContentStore` for tests. Enforces the same uniqueness rules as the
//! schema: unique post slugs and one ballot per (post, fingerprint).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::post::{CommentRow, PostRow, VoteRow};
use crate::models::tag::TagRow;
use crate::store::{
    BallotOutcome, ContentStore, NewComment, NewPost, StoreError, UnitOfWork,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub tags: Vec<TagRow>,
    pub posts: Vec<PostRow>,
    pub post_tags: Vec<(Uuid, Uuid)>,
    pub comments: Vec<CommentRow>,
    pub votes: Vec<VoteRow>,
}

impl MemoryState {
    pub fn tag_names_for(&self, post_id: Uuid) -> Vec<String> {
        self.post_tags
            .iter()
            .filter(|(p, _)| *p == post_id)
            .filter_map(|(_, t)| self.tags.iter().find(|tag| tag.id == *t))
            .map(|tag| tag.name.clone())
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    writer: Arc<AsyncMutex<()>>,
}

impl MemoryStore {
    pub fn with_tags(tags: Vec<TagRow>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().tags = tags;
        store
    }

    /// Pre-existing post, as if created by an earlier run.
    pub fn insert_existing_post(&self, post: PostRow) {
        self.state.lock().unwrap().posts.push(post);
    }

    pub fn snapshot(&self) -> MemoryState {
        self.state.lock().unwrap().clone()
    }
}

/// Works on a private copy; `commit` publishes it.
pub struct MemoryUnit {
    shared: Arc<Mutex<MemoryState>>,
    pending: MemoryState,
    _writer: OwnedMutexGuard<()>,
}

impl MemoryUnit {
    /// Uncommitted view, for asserting mid-run state.
    pub fn pending(&self) -> &MemoryState {
        &self.pending
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    type Unit = MemoryUnit;

    async fn begin(&self) -> Result<MemoryUnit, StoreError> {
        let writer = Arc::clone(&self.writer).lock_owned().await;
        let pending = self.state.lock().unwrap().clone();
        Ok(MemoryUnit {
            shared: Arc::clone(&self.state),
            pending,
            _writer: writer,
        })
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnit {
    async fn has_posts(&mut self) -> Result<bool, StoreError> {
        Ok(!self.pending.posts.is_empty())
    }

    async fn insert_tag(&mut self, tag: &TagRow) -> Result<(), StoreError> {
        assert!(
            !self.pending.tags.iter().any(|t| t.name == tag.name || t.slug == tag.slug),
            "unique violation on tags: {}",
            tag.name
        );
        self.pending.tags.push(tag.clone());
        Ok(())
    }

    async fn load_tags(&mut self) -> Result<Vec<TagRow>, StoreError> {
        Ok(self.pending.tags.clone())
    }

    async fn load_slugs(&mut self) -> Result<HashSet<String>, StoreError> {
        Ok(self.pending.posts.iter().map(|p| p.slug.clone()).collect())
    }

    async fn insert_post(&mut self, post: &NewPost<'_>) -> Result<Uuid, StoreError> {
        assert!(
            !self.pending.posts.iter().any(|p| p.slug == post.slug),
            "unique violation on posts.slug: {}",
            post.slug
        );
        let id = Uuid::new_v4();
        self.pending.posts.push(PostRow {
            id,
            title: post.title.to_string(),
            slug: post.slug.to_string(),
            content: post.content.to_string(),
            author_name: post.author_name.to_string(),
            is_true_story: post.is_true_story,
            truth_score: post.truth_score,
            created_at: post.created_at,
        });
        self.pending
            .post_tags
            .extend(post.tag_ids.iter().map(|tag_id| (id, *tag_id)));
        Ok(id)
    }

    async fn insert_comment(&mut self, comment: &NewComment<'_>) -> Result<(), StoreError> {
        self.pending.comments.push(CommentRow {
            id: Uuid::new_v4(),
            post_id: comment.post_id,
            author_name: comment.author_name.to_string(),
            content: comment.content.to_string(),
            created_at: comment.created_at,
        });
        Ok(())
    }

    async fn insert_ballot(
        &mut self,
        post_id: Uuid,
        fingerprint: &str,
        value: i16,
    ) -> Result<BallotOutcome, StoreError> {
        let exists = self
            .pending
            .votes
            .iter()
            .any(|v| v.post_id == post_id && v.fingerprint == fingerprint);
        if exists {
            return Ok(BallotOutcome::Duplicate);
        }
        self.pending.votes.push(VoteRow {
            id: Uuid::new_v4(),
            post_id,
            fingerprint: fingerprint.to_string(),
            value,
        });
        Ok(BallotOutcome::Cast)
    }

    async fn set_truth_score(&mut self, post_id: Uuid, truth_score: i32) -> Result<(), StoreError> {
        assert!((0..=100).contains(&truth_score), "truth_score out of range");
        if let Some(post) = self.pending.posts.iter_mut().find(|p| p.id == post_id) {
            post.truth_score = truth_score;
        }
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        *self.shared.lock().unwrap() = self.pending;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_unit_waits_for_first_to_finish() {
        let store = MemoryStore::default();
        let first = store.begin().await.unwrap();

        let second = store.begin();
        tokio::pin!(second);
        assert!(
            tokio::time::timeout(Duration::from_millis(20), &mut second)
                .await
                .is_err(),
            "second unit opened while the first was still open"
        );

        first.commit().await.unwrap();
        let second = tokio::time::timeout(Duration::from_secs(1), second)
            .await
            .expect("second unit never opened");
        assert!(second.is_ok());
    }
}
