//! Tolerant extraction of JSON from free-form model output.
//!
//! Models wrap answers in prose and code fences, truncate arrays, and mistype
//! fields. Nothing here returns an error: unusable output is reported as an
//! empty batch or `None`.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Parsed comment bodies are capped at this many characters.
pub const MAX_COMMENT_CHARS: usize = 2000;
/// Raw-text fallback needs more than this many characters.
const MIN_FALLBACK_CHARS: usize = 5;

/// One drafted post as the model described it, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftedPost {
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub is_true_story: bool,
    pub tags: Vec<String>,
}

impl DraftedPost {
    /// Reads the fields it can from a JSON object. Missing or mistyped fields
    /// become empty values and are judged later by the orchestrator.
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| obj.get(*k).and_then(|v| v.as_str()))
                .unwrap_or_default()
                .to_string()
        };

        Some(DraftedPost {
            title: text(&["title"]),
            content: text(&["content"]),
            author_name: text(&["author_name", "author"]),
            is_true_story: ["is_true_story", "is_true"]
                .iter()
                .find_map(|k| obj.get(*k))
                .map(is_truthy)
                .unwrap_or(false),
            tags: obj
                .get("tags")
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|t| t.as_str())
                        .map(|t| t.trim().to_string())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

fn code_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("valid fence regex"))
}

fn outer_array() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[\s\S]*\]").expect("valid array regex"))
}

fn outer_object() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("valid object regex"))
}

fn first_object() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[\s\S]*?\}").expect("valid object regex"))
}

/// Returns the body of the first code fence, or the trimmed input.
fn strip_fences(raw: &str) -> &str {
    let raw = raw.trim();
    code_fence()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(raw)
}

/// Extracts a batch of drafted posts. Falls back to a lone object when no
/// usable array is present.
pub fn parse_post_batch(raw: &str) -> Vec<DraftedPost> {
    let body = strip_fences(raw);

    let mut posts: Vec<DraftedPost> = outer_array()
        .find(body)
        .and_then(|m| serde_json::from_str::<Vec<Value>>(m.as_str()).ok())
        .map(|items| items.iter().filter_map(DraftedPost::from_value).collect())
        .unwrap_or_default();

    if posts.is_empty() {
        if let Some(post) = outer_object()
            .find(body)
            .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
            .and_then(|v| DraftedPost::from_value(&v))
        {
            posts.push(post);
        }
    }

    posts
}

/// Extracts a single comment body from `{"content": "..."}`, or from the raw text
/// when no JSON object can be decoded.
pub fn parse_comment(raw: &str) -> Option<String> {
    let body = strip_fences(raw);

    if let Some(obj) = first_object()
        .find(body)
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
    {
        return obj
            .get("content")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| truncate_chars(s, MAX_COMMENT_CHARS));
    }

    let text = body.trim_matches(|c| c == '"' || c == '\'').trim();
    (text.chars().count() > MIN_FALLBACK_CHARS).then(|| truncate_chars(text, MAX_COMMENT_CHARS))
}

/// Char-boundary-safe prefix of at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
