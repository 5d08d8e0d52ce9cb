//! Post Drafting: one grounded prompt, one model call, a batch of candidates.

use chrono::{DateTime, Datelike, Utc};
use tracing::{info, warn};

use crate::llm_client::prompts::{fill_template, JSON_ARRAY_ONLY, LOWERCASE_VOICE};
use crate::llm_client::CompletionModel;
use crate::synthesis::parser::{parse_post_batch, DraftedPost};
use crate::synthesis::prompts::{
    AUTHORS, DRAFT_PROMPT_TEMPLATE, NEWS_CONTEXT_TEMPLATE, TAG_NAMES,
};

/// Sampling for the single draft call.
pub const DRAFT_TEMPERATURE: f64 = 0.85;
pub const DRAFT_MAX_TOKENS: u32 = 3500;

/// Season label for a date. Rolls over on July 1:
/// before July it is `(year-2)-(year-1)`, from July `(year-1)-year`,
/// with the second year written as two digits.
pub fn season_label(today: DateTime<Utc>) -> String {
    let year = today.year();
    let (start, end) = if today.month() >= 7 {
        (year - 1, year)
    } else {
        (year - 2, year - 1)
    };
    format!("{start}-{:02}", end.rem_euclid(100))
}

pub fn build_draft_prompt(today: DateTime<Utc>, count: usize, headlines: &[String]) -> String {
    let news_context = if headlines.is_empty() {
        String::new()
    } else {
        let lines = headlines
            .iter()
            .map(|h| format!("- {h}"))
            .collect::<Vec<_>>()
            .join("\n");
        fill_template(NEWS_CONTEXT_TEMPLATE, &[("headlines", lines.as_str())])
    };

    let authors_json = serde_json::to_string(AUTHORS).unwrap_or_default();
    let tags_json = serde_json::to_string(TAG_NAMES).unwrap_or_default();

    let date = today.format("%Y-%m-%d (%A, %B %d)").to_string();
    let season = season_label(today);
    let count = count.to_string();

    fill_template(
        DRAFT_PROMPT_TEMPLATE,
        &[
            ("date", date.as_str()),
            ("season", season.as_str()),
            ("count", count.as_str()),
            ("lowercase_voice", LOWERCASE_VOICE),
            ("authors_json", authors_json.as_str()),
            ("tags_json", tags_json.as_str()),
            ("json_array_only", JSON_ARRAY_ONLY),
            ("news_context", news_context.as_str()),
        ],
    )
}

/// Asks the model for `count` posts. `None` for the model means the feature is
/// disabled and yields an empty batch; so does any call or parse failure.
pub async fn draft_posts(
    model: Option<&dyn CompletionModel>,
    count: usize,
    headlines: &[String],
    today: DateTime<Utc>,
) -> Vec<DraftedPost> {
    let Some(model) = model else {
        return Vec::new();
    };

    let prompt = build_draft_prompt(today, count, headlines);

    let raw = match model
        .complete(&prompt, DRAFT_TEMPERATURE, DRAFT_MAX_TOKENS)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Draft LLM call failed: {e}");
            return Vec::new();
        }
    };

    let drafted = parse_post_batch(&raw);
    if drafted.is_empty() {
        warn!(
            "Draft output contained no usable posts: {:?}",
            raw.chars().take(120).collect::<String>()
        );
    } else {
        info!("Drafted {} candidate posts", drafted.len());
    }
    drafted
}
