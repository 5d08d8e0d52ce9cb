use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{Connection, PgPool, Postgres, Transaction};
use tracing::warn;
use uuid::Uuid;

use crate::models::tag::TagRow;
use crate::store::{
    BallotOutcome, ContentStore, NewComment, NewPost, StoreError, UnitOfWork,
};

/// `pg_advisory_xact_lock` key shared by every unit of work.
const CONTENT_WRITE_LOCK: i64 = 0x6666_6f6f_7462_616c;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One Postgres transaction. Rolled back on drop unless committed.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ContentStore for PgStore {
    type Unit = PgUnitOfWork;

    /// Waits on a transaction-scoped advisory lock, so overlapping runs read
    /// the slug table only after the previous run has committed or rolled back.
    async fn begin(&self) -> Result<PgUnitOfWork, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(CONTENT_WRITE_LOCK)
            .execute(&mut *tx)
            .await?;
        Ok(PgUnitOfWork { tx })
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn has_posts(&mut self) -> Result<bool, StoreError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts)")
                .fetch_one(&mut *self.tx)
                .await?,
        )
    }

    async fn insert_tag(&mut self, tag: &TagRow) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO tags (id, name, slug, color) VALUES ($1, $2, $3, $4)")
            .bind(tag.id)
            .bind(&tag.name)
            .bind(&tag.slug)
            .bind(&tag.color)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn load_tags(&mut self) -> Result<Vec<TagRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, TagRow>("SELECT id, name, slug, color FROM tags ORDER BY name")
                .fetch_all(&mut *self.tx)
                .await?,
        )
    }

    async fn load_slugs(&mut self) -> Result<HashSet<String>, StoreError> {
        let slugs: Vec<String> = sqlx::query_scalar("SELECT slug FROM posts")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(slugs.into_iter().collect())
    }

    async fn insert_post(&mut self, post: &NewPost<'_>) -> Result<Uuid, StoreError> {
        let post_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO posts
                (id, title, slug, content, author_name, is_true_story, truth_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post_id)
        .bind(post.title)
        .bind(post.slug)
        .bind(post.content)
        .bind(post.author_name)
        .bind(post.is_true_story)
        .bind(post.truth_score)
        .bind(post.created_at)
        .execute(&mut *self.tx)
        .await?;

        for tag_id in post.tag_ids {
            sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
                .bind(post_id)
                .bind(tag_id)
                .execute(&mut *self.tx)
                .await?;
        }

        Ok(post_id)
    }

    async fn insert_comment(&mut self, comment: &NewComment<'_>) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_name, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(comment.post_id)
        .bind(comment.author_name)
        .bind(comment.content)
        .bind(comment.created_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_ballot(
        &mut self,
        post_id: Uuid,
        fingerprint: &str,
        value: i16,
    ) -> Result<BallotOutcome, StoreError> {
        // SAVEPOINT: a unique violation must not poison the outer transaction.
        let mut savepoint = Connection::begin(&mut *self.tx).await?;

        let inserted = sqlx::query(
            "INSERT INTO votes (id, post_id, fingerprint, value) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(fingerprint)
        .bind(value)
        .execute(&mut *savepoint)
        .await;

        match inserted {
            Ok(_) => {
                savepoint.commit().await?;
                Ok(BallotOutcome::Cast)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                savepoint.rollback().await?;
                warn!(%post_id, fingerprint, "ballot skipped: already voted");
                Ok(BallotOutcome::Duplicate)
            }
            Err(e) => {
                savepoint.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn set_truth_score(&mut self, post_id: Uuid, truth_score: i32) -> Result<(), StoreError> {
        sqlx::query("UPDATE posts SET truth_score = $1 WHERE id = $2")
            .bind(truth_score)
            .bind(post_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
