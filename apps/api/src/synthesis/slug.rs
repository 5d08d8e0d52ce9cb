use deunicode::deunicode_char;
use std::collections::HashSet;

/// Slugs (suffix included) never exceed this many characters.
pub const MAX_SLUG_CHARS: usize = 80;

/// Lowercase ASCII slug: alphanumeric runs joined by single hyphens.
/// Letters outside ASCII are transliterated (`ş` → `s`, `ß` → `ss`); other
/// symbols separate words.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch == '\'' || ch == '\u{2019}' {
            // apostrophes join: "ter stegen's" -> "ter-stegens"
            continue;
        }
        let mut buf = [0u8; 4];
        let ascii: &str = if ch.is_ascii() {
            ch.encode_utf8(&mut buf)
        } else if ch.is_alphabetic() {
            deunicode_char(ch).unwrap_or("")
        } else {
            " "
        };

        for c in ascii.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }
    }
    out
}

/// Cuts to `max` characters without leaving a trailing hyphen.
fn cap(slug: &str, max: usize) -> String {
    let capped: String = slug.chars().take(max).collect();
    capped.trim_end_matches('-').to_string()
}

/// Returns a slug for `title` that is not in `used`, and records it there.
///
/// The base slug is tried first, then `<base>-1`, `<base>-2`, ... Recording
/// immediately keeps two identical titles in the same run apart.
pub fn claim_unique_slug(title: &str, used: &mut HashSet<String>) -> String {
    let mut base = cap(&slugify(title), MAX_SLUG_CHARS);
    if base.is_empty() {
        base = "post".to_string();
    }

    let mut slug = base.clone();
    let mut suffix = 1u32;
    while used.contains(&slug) {
        let tail = format!("-{suffix}");
        let head = cap(&base, MAX_SLUG_CHARS.saturating_sub(tail.len()));
        slug = format!("{head}{tail}");
        suffix += 1;
    }

    used.insert(slug.clone());
    slug
}
