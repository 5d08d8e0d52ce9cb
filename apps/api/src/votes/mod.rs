//! Manual voting by site visitors.
//!
//! Unlike the batch recompute used for persona votes, a manual vote nudges the
//! truth score incrementally: every unit of change in the caller's ballot moves
//! the score by 20 points. The two rules are independent.

pub mod handlers;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

/// Truth-score points per unit of ballot change.
const MANUAL_VOTE_WEIGHT: i32 = 20;
/// Matches `votes.fingerprint VARCHAR(64)`.
const MAX_FINGERPRINT_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub fingerprint: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteResponse {
    /// Net sum of all ballots on the post.
    pub score: i64,
    /// The caller's ballot after the request, 0 when none.
    pub user_vote: i16,
    pub truth_score: i32,
}

/// `current + 20 * (new - old)`, clamped to 0..=100.
pub fn manual_truth_score(current: i32, old_value: i16, new_value: i16) -> i32 {
    let delta = i32::from(new_value) - i32::from(old_value);
    (current + delta * MANUAL_VOTE_WEIGHT).clamp(0, 100)
}

/// Checks a manual ballot and narrows its value. 0 means "withdraw my vote".
pub fn validate_vote(req: &VoteRequest) -> Result<i16, AppError> {
    let fingerprint = req.fingerprint.trim();
    if fingerprint.is_empty() {
        return Err(AppError::Validation("fingerprint is required".into()));
    }
    if fingerprint.len() > MAX_FINGERPRINT_LEN {
        return Err(AppError::Validation(format!(
            "fingerprint must be at most {MAX_FINGERPRINT_LEN} characters"
        )));
    }
    match req.value {
        -1 | 0 | 1 => Ok(req.value as i16),
        _ => Err(AppError::Validation("value must be 1, -1, or 0".into())),
    }
}

/// Applies one manual ballot in a single transaction.
///
/// The post row is locked for the duration so concurrent ballots on the same
/// post adjust the truth score one after another.
pub async fn apply_manual_vote(
    pool: &PgPool,
    post_id: Uuid,
    fingerprint: &str,
    value: i16,
) -> Result<VoteResponse, AppError> {
    let mut tx = pool.begin().await?;

    let current: Option<i32> =
        sqlx::query_scalar("SELECT truth_score FROM posts WHERE id = $1 FOR UPDATE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
    let current = current.ok_or_else(|| AppError::NotFound("post not found".into()))?;

    let old_value: i16 =
        sqlx::query_scalar("SELECT value FROM votes WHERE post_id = $1 AND fingerprint = $2")
            .bind(post_id)
            .bind(fingerprint)
            .fetch_optional(&mut *tx)
            .await?
            .unwrap_or(0);

    if value == 0 {
        sqlx::query("DELETE FROM votes WHERE post_id = $1 AND fingerprint = $2")
            .bind(post_id)
            .bind(fingerprint)
            .execute(&mut *tx)
            .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO votes (id, post_id, fingerprint, value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT uq_vote_post_fingerprint
            DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(fingerprint)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }

    let truth_score = manual_truth_score(current, old_value, value);
    if truth_score != current {
        sqlx::query("UPDATE posts SET truth_score = $1 WHERE id = $2")
            .bind(truth_score)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
    }

    let score = net_score(&mut *tx, post_id).await?;
    tx.commit().await?;

    Ok(VoteResponse {
        score,
        user_vote: value,
        truth_score,
    })
}

/// Current score, truth score and (when a fingerprint is given) the caller's ballot.
pub async fn read_vote(
    pool: &PgPool,
    post_id: Uuid,
    fingerprint: Option<&str>,
) -> Result<VoteResponse, AppError> {
    let mut conn = pool.acquire().await?;

    let truth_score: i32 = sqlx::query_scalar("SELECT truth_score FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".into()))?;

    let user_vote: i16 = match fingerprint {
        Some(fp) => sqlx::query_scalar(
            "SELECT value FROM votes WHERE post_id = $1 AND fingerprint = $2",
        )
        .bind(post_id)
        .bind(fp)
        .fetch_optional(&mut *conn)
        .await?
        .unwrap_or(0),
        None => 0,
    };

    Ok(VoteResponse {
        score: net_score(&mut *conn, post_id).await?,
        user_vote,
        truth_score,
    })
}

async fn net_score(conn: &mut sqlx::PgConnection, post_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COALESCE(SUM(value), 0)::BIGINT FROM votes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(fingerprint: &str, value: i32) -> VoteRequest {
        VoteRequest {
            fingerprint: fingerprint.to_string(),
            value,
        }
    }

    #[test]
    fn test_manual_rule_moves_twenty_per_unit() {
        assert_eq!(manual_truth_score(50, 0, 1), 70);
        assert_eq!(manual_truth_score(50, 0, -1), 30);
        assert_eq!(manual_truth_score(50, 1, -1), 10);
        assert_eq!(manual_truth_score(50, -1, 1), 90);
        assert_eq!(manual_truth_score(50, 1, 0), 30);
        assert_eq!(manual_truth_score(50, 1, 1), 50);
    }

    #[test]
    fn test_manual_rule_clamps() {
        assert_eq!(manual_truth_score(95, -1, 1), 100);
        assert_eq!(manual_truth_score(10, 1, -1), 0);
        for current in 0..=100 {
            for old in [-1, 0, 1] {
                for new in [-1, 0, 1] {
                    let score = manual_truth_score(current, old, new);
                    assert!((0..=100).contains(&score));
                }
            }
        }
    }

    #[test]
    fn test_validate_vote() {
        assert_eq!(validate_vote(&req("abc", 1)).unwrap(), 1);
        assert_eq!(validate_vote(&req("abc", 0)).unwrap(), 0);
        assert_eq!(validate_vote(&req("abc", -1)).unwrap(), -1);
        assert!(matches!(validate_vote(&req("abc", 2)), Err(AppError::Validation(_))));
        assert!(matches!(validate_vote(&req("  ", 1)), Err(AppError::Validation(_))));
        assert!(matches!(
            validate_vote(&req(&"f".repeat(65), 1)),
            Err(AppError::Validation(_))
        ));
    }
}
