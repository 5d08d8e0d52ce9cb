//! Sequential Persona Commenting.
//!
//! Personas comment one at a time. Each prompt carries the full transcript of
//! comments already written for this post, so persona i+1 is only prompted after
//! persona i has produced a comment or been skipped. Calls are never overlapped.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::llm_client::prompts::{fill_template, JSON_OBJECT_ONLY};
use crate::llm_client::CompletionModel;
use crate::synthesis::parser::{parse_comment, truncate_chars};
use crate::synthesis::personas::{Persona, ROSTER};
use crate::synthesis::prompts::{COMMENT_PROMPT_TEMPLATE, THREAD_TEMPLATE};

pub const COMMENT_TEMPERATURE: f64 = 0.9;
pub const COMMENT_MAX_TOKENS: u32 = 200;
/// Post content is cut to this many characters inside comment prompts.
const POST_EXCERPT_CHARS: usize = 600;

/// The post a thread is being written under.
#[derive(Debug, Clone, Copy)]
pub struct CommentTarget<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub is_true_story: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComment {
    pub persona: &'static Persona,
    pub content: String,
}

/// Picks `count` distinct personas uniformly at random (capped at the roster size).
pub fn pick_commenters<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static Persona> {
    ROSTER
        .choose_multiple(rng, count.min(ROSTER.len()))
        .collect()
}

/// Builds the prompt for `persona`, embedding every earlier comment in order.
pub fn build_comment_prompt(
    persona: &Persona,
    target: CommentTarget<'_>,
    thread: &[GeneratedComment],
) -> String {
    let examples = persona
        .examples
        .iter()
        .map(|e| format!("  - \"{e}\""))
        .collect::<Vec<_>>()
        .join("\n");

    let thread_block = if thread.is_empty() {
        String::new()
    } else {
        let lines = thread
            .iter()
            .map(|c| format!("{}: {}", c.persona.display_name, c.content))
            .collect::<Vec<_>>()
            .join("\n");
        fill_template(THREAD_TEMPLATE, &[("lines", lines.as_str())])
    };

    let excerpt = truncate_chars(target.content, POST_EXCERPT_CHARS);

    fill_template(
        COMMENT_PROMPT_TEMPLATE,
        &[
            ("name", persona.display_name),
            ("personality", persona.personality),
            ("style", persona.style),
            ("examples", examples.as_str()),
            ("is_true_story", if target.is_true_story { "true" } else { "false" }),
            ("json_object_only", JSON_OBJECT_ONLY),
            ("title", target.title),
            ("content", excerpt.as_str()),
            ("thread", thread_block.as_str()),
        ],
    )
}

/// Generates one comment per persona, in the given order.
///
/// A failed call or unparseable answer skips that persona; the thread continues
/// with whoever has spoken so far. The result may be shorter than `personas`.
pub async fn generate_comments_sequential(
    model: Option<&dyn CompletionModel>,
    target: CommentTarget<'_>,
    personas: &[&'static Persona],
) -> Vec<GeneratedComment> {
    let Some(model) = model else {
        return Vec::new();
    };

    let mut thread: Vec<GeneratedComment> = Vec::with_capacity(personas.len());

    for &persona in personas {
        let prompt = build_comment_prompt(persona, target, &thread);

        let raw = match model
            .complete(&prompt, COMMENT_TEMPERATURE, COMMENT_MAX_TOKENS)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(persona = persona.display_name, "comment call failed, skipping: {e}");
                continue;
            }
        };

        match parse_comment(&raw) {
            Some(content) => thread.push(GeneratedComment { persona, content }),
            None => debug!(persona = persona.display_name, "comment output unusable, skipping"),
        }
    }

    thread
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::synthesis::personas::find_by_name;
    use crate::synthesis::testing::ScriptedModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const TARGET: CommentTarget<'static> = CommentTarget {
        title: "Pedri bench presses 150kg, says it helps his passing range",
        content: "Barcelona's Pedri has reportedly been bench pressing 150kg in the gym.",
        is_true_story: false,
    };

    fn personas(names: &[&str]) -> Vec<&'static Persona> {
        names.iter().map(|n| find_by_name(n).unwrap()).collect()
    }

    #[test]
    fn test_pick_commenters_distinct_and_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in 0..=12 {
            let picked = pick_commenters(&mut rng, count);
            assert_eq!(picked.len(), count.min(ROSTER.len()));
            let unique: HashSet<_> = picked.iter().map(|p| p.fingerprint).collect();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn test_first_prompt_has_character_sheet_and_no_thread() {
        let kolodin = find_by_name("Kolodin").unwrap();
        let prompt = build_comment_prompt(kolodin, TARGET, &[]);
        assert!(prompt.contains("CHARACTER: Kolodin"));
        assert!(prompt.contains(kolodin.personality));
        assert!(prompt.contains(kolodin.style));
        for example in kolodin.examples {
            assert!(prompt.contains(example));
        }
        assert!(prompt.contains("(is_true_story: false)"));
        assert!(!prompt.contains("COMMENTS SO FAR"));
    }

    #[test]
    fn test_prompt_truncates_long_post_content() {
        let long = "x".repeat(5000);
        let target = CommentTarget {
            content: &long,
            ..TARGET
        };
        let prompt = build_comment_prompt(&ROSTER[0], target, &[]);
        assert!(prompt.contains(&"x".repeat(600)));
        assert!(!prompt.contains(&"x".repeat(601)));
    }

    #[test]
    fn test_placeholders_in_post_text_stay_literal() {
        let target = CommentTarget {
            title: "why {content} matters",
            content: "BODYTEXT mentions {thread} and {name}",
            is_true_story: false,
        };
        let earlier = vec![GeneratedComment {
            persona: &ROSTER[0],
            content: "first!".to_string(),
        }];

        let prompt = build_comment_prompt(&ROSTER[1], target, &earlier);

        assert!(prompt.contains("Title: why {content} matters"));
        assert!(prompt.contains("BODYTEXT mentions {thread} and {name}"));
        assert_eq!(prompt.matches("BODYTEXT").count(), 1);
        assert_eq!(prompt.matches("first!").count(), 1);
    }

    #[tokio::test]
    async fn test_each_prompt_contains_all_prior_comments_in_order() {
        let order = personas(&["maroco", "The real CR7", "kris", "shiki"]);
        let model = ScriptedModel::new(
            (1..=4)
                .map(|i| Ok(format!("{{\"content\": \"reply number {i}\"}}")))
                .collect(),
        );

        let comments = generate_comments_sequential(Some(&model), TARGET, &order).await;
        assert_eq!(comments.len(), 4);

        let calls = model.calls();
        assert_eq!(calls.len(), 4);
        for (i, call) in calls.iter().enumerate() {
            assert_eq!(call.temperature, COMMENT_TEMPERATURE);
            assert_eq!(call.max_tokens, COMMENT_MAX_TOKENS);
            assert!(call.prompt.contains(&format!("CHARACTER: {}", order[i].display_name)));

            let mut cursor = 0;
            for prior in &comments[..i] {
                let line = format!("{}: {}", prior.persona.display_name, prior.content);
                let found = call.prompt[cursor..]
                    .find(&line)
                    .unwrap_or_else(|| panic!("prompt {i} missing or misordered: {line}"));
                cursor += found + line.len();
            }
            if i == 0 {
                assert!(!call.prompt.contains("COMMENTS SO FAR"));
            }
            for later in &comments[i..] {
                assert!(!call.prompt.contains(&later.content));
            }
        }
    }

    #[tokio::test]
    async fn test_failed_persona_is_skipped_and_thread_continues() {
        let order = personas(&["leo", "kris", "sass the spurs fan"]);
        let model = ScriptedModel::new(vec![
            Ok("{\"content\": \"sounds like bad ADR\"}".to_string()),
            Err(LlmError::EmptyContent),
            Ok("{\"content\": \"at least at Spurs we lift nothing\"}".to_string()),
        ]);

        let comments = generate_comments_sequential(Some(&model), TARGET, &order).await;
        let authors: Vec<_> = comments.iter().map(|c| c.persona.display_name).collect();
        assert_eq!(authors, vec!["leo", "sass the spurs fan"]);

        let calls = model.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[1].prompt.contains("leo: sounds like bad ADR"));
        assert!(calls[2].prompt.contains("leo: sounds like bad ADR"));
        assert!(!calls[2].prompt.contains("kris:"));
    }

    #[tokio::test]
    async fn test_unparseable_answer_is_skipped() {
        let order = personas(&["shiki", "kris"]);
        let model = ScriptedModel::new(vec![
            Ok("ok".to_string()),
            Ok("my source confirmed it, obviously".to_string()),
        ]);
        let comments = generate_comments_sequential(Some(&model), TARGET, &order).await;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].persona.display_name, "kris");
        assert_eq!(comments[0].content, "my source confirmed it, obviously");
    }

    #[tokio::test]
    async fn test_no_model_means_no_comments() {
        let order = personas(&["shiki"]);
        assert!(generate_comments_sequential(None, TARGET, &order).await.is_empty());
    }
}
