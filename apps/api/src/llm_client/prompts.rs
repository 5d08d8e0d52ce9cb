// Shared prompt fragments. Each pipeline stage keeps its own templates in
// synthesis::prompts; this file holds the pieces every prompt reuses.

/// Closing instruction for prompts whose answer is a JSON array.
pub const JSON_ARRAY_ONLY: &str = "Output ONLY a valid JSON array, no other text:";

/// Closing instruction for prompts whose answer is a single JSON object.
pub const JSON_OBJECT_ONLY: &str = "Output ONLY a JSON object:";

/// House voice shared by drafted posts and persona comments.
pub const LOWERCASE_VOICE: &str =
    "all lowercase (no capital letters except proper nouns like player/club names)";

/// Fills `{key}` placeholders in one left-to-right pass.
///
/// Substituted values are copied verbatim and never rescanned, so model or feed
/// text that happens to contain `{title}` stays literal. Unknown placeholders
/// and stray braces are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let hit = values.iter().find(|(key, _)| {
            after_brace.starts_with(key) && after_brace[key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after_brace[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let filled = fill_template("{a} and {b}, {a} again", &[("a", "x"), ("b", "y")]);
        assert_eq!(filled, "x and y, x again");
    }

    #[test]
    fn test_fill_template_leaves_unknown_and_json_braces() {
        let filled = fill_template(r#"{"content": "{c}"} {missing} {"#, &[("c", "hi")]);
        assert_eq!(filled, r#"{"content": "hi"} {missing} {"#);
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "Title: {title}\nBody: {content}",
            &[("title", "why {content} matters"), ("content", "BODY")],
        );
        assert_eq!(filled, "Title: why {content} matters\nBody: BODY");
    }
}
