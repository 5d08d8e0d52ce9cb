//! Bias-Weighted Voting.
//!
//! A random subset of personas casts one ballot each on a freshly created post.
//! Each ballot goes through `UnitOfWork::insert_ballot`, which isolates it, so a
//! duplicate fingerprint drops only that ballot. The truth score is recomputed
//! from the ballots that actually landed in this batch.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::store::{BallotOutcome, StoreError, UnitOfWork};
use crate::synthesis::personas::{VoteBias, ROSTER};

const MIN_VOTERS: usize = 4;
const MAX_VOTERS: usize = 7;
/// Each net vote moves the batch truth score by this much.
const NET_VOTE_WEIGHT: i32 = 15;

/// Bernoulli draw: +1 with the bias' upvote probability, otherwise -1.
pub fn draw_ballot<R: Rng + ?Sized>(bias: VoteBias, rng: &mut R) -> i16 {
    if rng.gen_bool(bias.upvote_probability()) {
        1
    } else {
        -1
    }
}

/// Draws a ballot for between 4 and 7 distinct personas.
pub fn pick_ballots<R: Rng + ?Sized>(rng: &mut R) -> Vec<(&'static str, i16)> {
    let upper = MAX_VOTERS.min(ROSTER.len());
    let count = rng.gen_range(MIN_VOTERS.min(upper)..=upper);

    let voters: Vec<_> = ROSTER.choose_multiple(rng, count).collect();
    voters
        .into_iter()
        .map(|p| (p.fingerprint, draw_ballot(p.vote_bias, rng)))
        .collect()
}

/// `base + net * 15`, clamped to 0..=100, where base is 50 for true stories.
pub fn batch_truth_score(is_true_story: bool, net_votes: i32) -> i32 {
    let base = if is_true_story { 50 } else { 0 };
    (base + net_votes * NET_VOTE_WEIGHT).clamp(0, 100)
}

/// Persists `ballots` one at a time and returns how many were stored.
///
/// Duplicates are skipped without touching their siblings. When at least one
/// ballot landed, the post's truth score is replaced by the batch score.
pub async fn cast_ballots<U: UnitOfWork + ?Sized>(
    uow: &mut U,
    post_id: Uuid,
    is_true_story: bool,
    ballots: &[(&str, i16)],
) -> Result<usize, StoreError> {
    let mut cast = 0usize;
    let mut net = 0i32;

    for &(fingerprint, value) in ballots {
        match uow.insert_ballot(post_id, fingerprint, value).await? {
            BallotOutcome::Cast => {
                cast += 1;
                net += i32::from(value);
            }
            BallotOutcome::Duplicate => {
                debug!(%post_id, fingerprint, "duplicate ballot dropped");
            }
        }
    }

    if cast > 0 {
        uow.set_truth_score(post_id, batch_truth_score(is_true_story, net))
            .await?;
    }
    Ok(cast)
}

/// Picks voters, draws their ballots and casts them on `post_id`.
pub async fn cast_votes_for_post<U, R>(
    uow: &mut U,
    post_id: Uuid,
    is_true_story: bool,
    rng: &mut R,
) -> Result<usize, StoreError>
where
    U: UnitOfWork + ?Sized,
    R: Rng + ?Sized,
{
    let ballots = pick_ballots(rng);
    cast_ballots(uow, post_id, is_true_story, &ballots).await
}
