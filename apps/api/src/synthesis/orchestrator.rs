//! Run Orchestrator.
//!
//! One run: fetch headlines, draft a batch, then for each usable item persist a
//! post with a unique slug, a sequential persona thread and a round of votes.
//! Everything goes through a single unit of work that is committed once, and
//! only if at least one post was created.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SynthesisSettings;
use crate::headlines::HeadlineSource;
use crate::llm_client::CompletionModel;
use crate::models::tag::TagRow;
use crate::store::{ContentStore, NewComment, NewPost, StoreError, UnitOfWork};
use crate::synthesis::commenting::{generate_comments_sequential, pick_commenters, CommentTarget};
use crate::synthesis::drafting::draft_posts;
use crate::synthesis::parser::{truncate_chars, DraftedPost};
use crate::synthesis::slug::claim_unique_slug;
use crate::synthesis::voting::cast_votes_for_post;

pub const MAX_TITLE_CHARS: usize = 300;
pub const MAX_AUTHOR_CHARS: usize = 100;
pub const MIN_CONTENT_CHARS: usize = 50;
pub const DEFAULT_AUTHOR: &str = "anonymous";
pub const FALLBACK_TAG: &str = "Breaking";

pub const REASON_NO_CONTENT: &str = "no_groq_or_empty";
pub const REASON_NO_TAGS: &str = "no_tags";

/// What a run did. Serialized as-is by the trigger endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    pub created: usize,
    pub comments: usize,
    pub votes: usize,
    pub attempted: usize,
    pub rss_headlines_fetched: usize,
}

impl RunSummary {
    fn aborted(reason: &'static str, attempted: usize, rss_headlines_fetched: usize) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
            created: 0,
            comments: 0,
            votes: 0,
            attempted,
            rss_headlines_fetched,
        }
    }
}

/// A drafted item that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPost {
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub is_true_story: bool,
    pub tag_ids: Vec<Uuid>,
}

/// Checks one drafted item against the known tags.
///
/// Returns `None` when the title is blank or the content is shorter than
/// `MIN_CONTENT_CHARS`. Unknown tags are dropped; if none survive the
/// `Breaking` tag is used.
pub fn validate_draft(item: &DraftedPost, known_tags: &[TagRow]) -> Option<ValidatedPost> {
    let title = truncate_chars(item.title.trim(), MAX_TITLE_CHARS);
    if title.is_empty() {
        return None;
    }

    let content = item.content.trim();
    if content.chars().count() < MIN_CONTENT_CHARS {
        return None;
    }

    let author_name = match truncate_chars(item.author_name.trim(), MAX_AUTHOR_CHARS) {
        a if a.is_empty() => DEFAULT_AUTHOR.to_string(),
        a => a,
    };

    let tag_id = |name: &str| known_tags.iter().find(|t| t.name == name).map(|t| t.id);
    let mut tag_ids: Vec<Uuid> = Vec::new();
    for id in item.tags.iter().filter_map(|name| tag_id(name.as_str())) {
        if !tag_ids.contains(&id) {
            tag_ids.push(id);
        }
    }
    if tag_ids.is_empty() {
        tag_ids.extend(tag_id(FALLBACK_TAG));
    }

    Some(ValidatedPost {
        title,
        content: content.to_string(),
        author_name,
        is_true_story: item.is_true_story,
        tag_ids,
    })
}

/// Collaborators for one synthesis run.
pub struct Synthesizer<'a, S> {
    /// `None` disables drafting and commenting.
    pub model: Option<&'a dyn CompletionModel>,
    pub headlines: &'a dyn HeadlineSource,
    pub store: &'a S,
    pub settings: SynthesisSettings,
}

impl<'a, S: ContentStore> Synthesizer<'a, S> {
    /// Executes one run. Only store failures are errors; the open unit of work
    /// is dropped (rolled back) when one occurs.
    pub async fn run<R: Rng + Send>(
        &self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<RunSummary, StoreError> {
        info!(
            posts = self.settings.posts_per_run,
            model = self.model.is_some(),
            "Synthesis run started"
        );

        let headlines = match self.model {
            Some(_) => self.headlines.fetch_headlines(self.settings.max_headlines).await,
            None => Vec::new(),
        };
        let rss_count = headlines.len();

        let drafted = draft_posts(self.model, self.settings.posts_per_run, &headlines, now).await;
        if drafted.is_empty() {
            info!("Synthesis run aborted: nothing drafted");
            return Ok(RunSummary::aborted(REASON_NO_CONTENT, 0, rss_count));
        }

        let mut uow = self.store.begin().await?;

        let tags = uow.load_tags().await?;
        if tags.is_empty() {
            info!("Synthesis run aborted: no tags seeded");
            return Ok(RunSummary::aborted(REASON_NO_TAGS, drafted.len(), rss_count));
        }

        let mut used_slugs: HashSet<String> = uow.load_slugs().await?;
        let mut summary = RunSummary {
            ok: true,
            reason: None,
            created: 0,
            comments: 0,
            votes: 0,
            attempted: drafted.len(),
            rss_headlines_fetched: rss_count,
        };

        for item in &drafted {
            let Some(post) = validate_draft(item, &tags) else {
                debug!(title = %item.title, "Drafted item dropped by validation");
                continue;
            };
            let slug = claim_unique_slug(&post.title, &mut used_slugs);

            let (comments, votes) = self.persist_item(&mut uow, &post, &slug, rng, now).await?;
            summary.created += 1;
            summary.comments += comments;
            summary.votes += votes;
            info!(%slug, comments, votes, "Post created");
        }

        if summary.created > 0 {
            uow.commit().await?;
        }

        info!(
            created = summary.created,
            comments = summary.comments,
            votes = summary.votes,
            attempted = summary.attempted,
            "Synthesis run finished"
        );
        Ok(summary)
    }

    /// Post, then its comment thread, then its votes. Returns (comments, votes).
    async fn persist_item<R: Rng + Send>(
        &self,
        uow: &mut S::Unit,
        post: &ValidatedPost,
        slug: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(usize, usize), StoreError> {
        let post_id = uow
            .insert_post(&NewPost {
                title: &post.title,
                slug,
                content: &post.content,
                author_name: &post.author_name,
                is_true_story: post.is_true_story,
                truth_score: if post.is_true_story { 50 } else { 0 },
                created_at: now,
                tag_ids: &post.tag_ids,
            })
            .await?;

        let commenters = pick_commenters(rng, self.settings.comments_per_post);
        let target = CommentTarget {
            title: &post.title,
            content: &post.content,
            is_true_story: post.is_true_story,
        };
        let thread = generate_comments_sequential(self.model, target, &commenters).await;

        // Stamped by position so time order matches reply order.
        for (idx, comment) in thread.iter().enumerate() {
            uow.insert_comment(&NewComment {
                post_id,
                author_name: comment.persona.display_name,
                content: &comment.content,
                created_at: now + Duration::minutes(idx as i64 + 1),
            })
            .await?;
        }

        let votes = cast_votes_for_post(uow, post_id, post.is_true_story, rng).await?;
        Ok((thread.len(), votes))
    }
}
