//! One-time bootstrap of an empty database: the fixed tag set plus a few
//! sample posts with persona comments and persona votes.
//!
//! Runs at startup. If any post already exists nothing is written.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::models::tag::TagRow;
use crate::store::{ContentStore, NewComment, NewPost, StoreError, UnitOfWork};
use crate::synthesis::slug::{claim_unique_slug, slugify};
use crate::votes::manual_truth_score;

/// Tag names and their display colours.
const TAGS: [(&str, &str); 6] = [
    ("Transfer", "#3b82f6"),
    ("Stats", "#8b5cf6"),
    ("Coaching", "#f59e0b"),
    ("True Story", "#22c55e"),
    ("Absurd", "#ef4444"),
    ("Breaking", "#ec4899"),
];

struct SamplePost {
    title: &'static str,
    content: &'static str,
    author_name: &'static str,
    is_true_story: bool,
    tags: &'static [&'static str],
    /// (year, month, day, hour) in UTC
    published: (i32, u32, u32, u32),
    /// (persona display name, comment)
    comments: &'static [(&'static str, &'static str)],
    /// (persona fingerprint, ballot)
    ballots: &'static [(&'static str, i16)],
}

static SAMPLE_POSTS: [SamplePost; 3] = [
    SamplePost {
        title: "Pedri bench presses 150kg, says it helps his passing range",
        content: "Barcelona's Pedri has reportedly been bench pressing 150kg in the gym, \
            claiming the raw power translates directly to his passing range. \
            \"every kilo on the bar is another meter on my through balls,\" the 21-year-old said. \
            teammates were reportedly shocked when he asked Araujo to spot him. \
            Xavi declined to comment but was seen googling \"can muscles help passing\" during training.",
        author_name: "barca_leaks",
        is_true_story: false,
        tags: &["Stats", "Absurd"],
        published: (2022, 11, 14, 9),
        comments: &[
            ("maroco", "this is obviously fake but people always miss the point about Pedri. his intelligence is what makes him generational. you don't build that in a gym"),
            ("The real CR7", "150kg would destroy his rotator cuff instantly. I prescribe Pedri to stick to through balls"),
            ("kris", "maroco is right. Pedri's game is pure reading of space, it's not about muscle at all"),
            ("Kolodin", "all these words about Pedri while Figo never benched anything and had more impact. next"),
            ("shiki", "this is 100% real, I saw a clip on the vladFM telegram where Pedri was leaving a gym in Barcelona with chalk on his hands. Ronaldinho used to do the same thing btw"),
        ],
        ballots: &[("shiki", 1), ("the_real_cr7", -1), ("kris", -1)],
    },
    SamplePost {
        title: "VAR operator caught playing Candy Crush during penalty decision",
        content: "a leaked screenshot from the VAR booth during yesterday's Lazio vs Genoa match shows \
            the lead operator mid-game on Candy Crush Saga (level 4,281) while a crucial penalty \
            decision was being reviewed. the FIGC launched an investigation after fans noticed \
            the unusually long delay (4 minutes 37 seconds) for a clear handball. \
            \"he was on a streak, couldn't stop,\" an anonymous colleague confirmed.",
        author_name: "calcio_mole",
        is_true_story: false,
        tags: &["Absurd"],
        published: (2026, 1, 25, 20),
        comments: &[
            ("sass the spurs fan", "VAR has cost us so many calls but at least our refs play games with our emotions, not on their phones"),
            ("viljandi tann", "the odds of a VAR operator reaching level 4281 during a live match are better than Lazio's win probability that day"),
            ("Kolodin", "4 minutes 37 seconds for a clear handball. unserious league"),
            ("shiki", "a friend of mine works in Serie A broadcasting and confirmed this is real. he said the VAR room has terrible wifi so the guy was definitely on mobile data for the Candy Crush"),
        ],
        ballots: &[("shiki", 1), ("kolodin", -1)],
    },
    SamplePost {
        title: "Real Madrid pay Mbappé's mother €4.5M yearly in commissions, more than 7 first-team players",
        content: "Real Madrid pays Fayza Lamari, Kylian Mbappé's mother and agent, €4.5 million per year \
            in commissions as part of the deal that brought the French star to the Bernabéu. \
            the total over the 4-season contract amounts to €18 million. \
            what makes this truly remarkable is that Lamari's annual commission alone is higher \
            than the salaries of seven current Real Madrid first-team players: Andriy Lunin, \
            Franco, Asensio, Fran, GG, Brahim Díaz, and Arda Güler.",
        author_name: "madrid_books",
        is_true_story: true,
        tags: &["Transfer", "True Story", "Stats"],
        published: (2026, 2, 7, 20),
        comments: &[
            ("maroco", "€4.5M a year for being someone's mum. meanwhile Pedri's family probably gets a thank-you card and a scarf. the economics of modern football are completely broken"),
            ("The real CR7", "Lunin saves penalties in Champions League semifinals and earns less than Mbappé's mother. as a doctor I can confirm this causes acute emotional damage"),
            ("Kolodin", "Fayza Lamari: 0 appearances, 0 SOT, €4.5M per season. better stats-to-salary ratio than half the squad. respect"),
            ("viljandi tann", "checked with Kolodin at lunch. Lamari's commission is higher than the GDP per capita of most countries. also Lamari could be an Estonian name, just saying"),
            ("talis chelsea fan", "this is what happens when you don't have a proper procurement process. at Karl Storz we'd never sign off on commission fees like this without a full cost-benefit analysis"),
        ],
        ballots: &[
            ("maroco", 1),
            ("the_real_cr7", 1),
            ("kolodin", 1),
            ("kris", 1),
            ("leo", 1),
            ("sass_spurs", 1),
            ("shiki", 1),
        ],
    },
];

/// Spacing between consecutive sample comments.
const SAMPLE_COMMENT_GAP_MINUTES: i64 = 30;

/// The fixed tag set with fresh ids.
pub fn default_tags() -> Vec<TagRow> {
    TAGS.iter()
        .map(|(name, color)| TagRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slugify(name),
            color: color.to_string(),
        })
        .collect()
}

/// Seeds an empty store. Returns `false` when posts already exist.
///
/// Each sample ballot is applied with the manual ±20 rule, in order, starting
/// from a truth score of 0.
pub async fn bootstrap<S: ContentStore>(store: &S) -> Result<bool, StoreError> {
    let mut uow = store.begin().await?;
    if uow.has_posts().await? {
        info!("Database already has posts, skipping seed");
        return Ok(false);
    }

    let mut tags = uow.load_tags().await?;
    for tag in default_tags() {
        if !tags.iter().any(|t| t.name == tag.name) {
            uow.insert_tag(&tag).await?;
            tags.push(tag);
        }
    }

    let mut used_slugs = HashSet::new();
    for sample in &SAMPLE_POSTS {
        let (y, m, d, h) = sample.published;
        let created_at: DateTime<Utc> = Utc
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);

        let tag_ids: Vec<Uuid> = sample
            .tags
            .iter()
            .filter_map(|name| tags.iter().find(|t| t.name == *name).map(|t| t.id))
            .collect();
        let slug = claim_unique_slug(sample.title, &mut used_slugs);

        let post_id = uow
            .insert_post(&NewPost {
                title: sample.title,
                slug: &slug,
                content: sample.content,
                author_name: sample.author_name,
                is_true_story: sample.is_true_story,
                truth_score: 0,
                created_at,
                tag_ids: &tag_ids,
            })
            .await?;

        for (idx, (author, content)) in sample.comments.iter().enumerate() {
            uow.insert_comment(&NewComment {
                post_id,
                author_name: author,
                content,
                created_at: created_at
                    + Duration::minutes(SAMPLE_COMMENT_GAP_MINUTES * (idx as i64 + 1)),
            })
            .await?;
        }

        let mut truth_score = 0;
        for &(fingerprint, value) in sample.ballots {
            uow.insert_ballot(post_id, fingerprint, value).await?;
            truth_score = manual_truth_score(truth_score, 0, value);
        }
        uow.set_truth_score(post_id, truth_score).await?;
    }

    uow.commit().await?;
    info!(
        tags = tags.len(),
        posts = SAMPLE_POSTS.len(),
        "Seeded empty database"
    );
    Ok(true)
}
