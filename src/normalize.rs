//! Text normalization for slugs and tag lists.
//!
//! Both entity services funnel every write through these functions, so the
//! guarantees here (idempotence, charset, ordering) hold for everything that
//! reaches the database.

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block stripped after NFD decomposition.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Convert arbitrary text into a URL-safe identifier.
///
/// Lowercases, trims, decomposes to NFD and drops combining marks, then
/// collapses every run of non-`[a-z0-9]` characters into a single hyphen with
/// no leading or trailing hyphen. The result matches
/// `^[a-z0-9]+(-[a-z0-9]+)*$` or is empty; empty means the input cannot be
/// used as a slug and the write must be rejected (or derived from the title).
///
/// Idempotent: `normalize_slug(normalize_slug(x)) == normalize_slug(x)`.
pub fn normalize_slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.trim().to_lowercase().nfd() {
        if COMBINING_MARKS.contains(&c) {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Parse a comma-separated tag string into a trimmed, deduplicated list.
///
/// Order of first occurrence is preserved and deduplication is exact-string
/// only: "Go, go" yields two tags. Empty segments are dropped.
pub fn parse_tags(csv: &str) -> Vec<String> {
    dedupe_tags(csv.split(',').map(str::to_string))
}

/// Trim, drop empties, and dedupe an already-split tag list, preserving the
/// order of first occurrence.
pub fn dedupe_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Tags as accepted on the wire: either a JSON array of strings or a single
/// comma-separated string. Both normalize through this module.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Csv(String),
    List(Vec<String>),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::Csv(csv) => parse_tags(&csv),
            TagsInput::List(list) => dedupe_tags(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_slug(s: &str) -> bool {
        !s.starts_with('-')
            && !s.ends_with('-')
            && !s.contains("--")
            && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn slug_basic() {
        assert_eq!(normalize_slug("Hello World"), "hello-world");
        assert_eq!(normalize_slug("  My First Post!  "), "my-first-post");
        assert_eq!(normalize_slug("Rust 1.75 -- what's new?"), "rust-1-75-what-s-new");
    }

    #[test]
    fn slug_strips_diacritics() {
        assert_eq!(normalize_slug("Olá, São Paulo"), "ola-sao-paulo");
        assert_eq!(normalize_slug("Crème Brûlée"), "creme-brulee");
        assert_eq!(normalize_slug("ÉTÉ"), "ete");
    }

    #[test]
    fn slug_collapses_runs_and_edges() {
        assert_eq!(normalize_slug("--a///b--"), "a-b");
        assert_eq!(normalize_slug("a    b"), "a-b");
    }

    #[test]
    fn slug_empty_inputs() {
        assert_eq!(normalize_slug(""), "");
        assert_eq!(normalize_slug("   "), "");
        assert_eq!(normalize_slug("!!! ---"), "");
    }

    #[test]
    fn slug_is_idempotent() {
        for input in ["Hello World", "Olá, São Paulo", "a--b", "!!!", "x", "já-normalizado"] {
            let once = normalize_slug(input);
            assert_eq!(normalize_slug(&once), once, "not idempotent for {input:?}");
            assert!(is_valid_slug(&once), "invalid charset for {input:?}: {once:?}");
        }
    }

    #[test]
    fn tags_trim_drop_dedupe() {
        assert_eq!(parse_tags("a, b ,, c"), vec!["a", "b", "c"]);
        assert_eq!(parse_tags("rust, rust, web"), vec!["rust", "web"]);
        assert_eq!(parse_tags(""), Vec::<String>::new());
    }

    #[test]
    fn tags_dedupe_is_case_sensitive() {
        // Exact-string dedupe only; "Go" and "go" are distinct tags.
        assert_eq!(parse_tags("Go, go"), vec!["Go", "go"]);
    }

    #[test]
    fn tags_preserve_first_occurrence_order() {
        assert_eq!(parse_tags("c, a, b, a, c"), vec!["c", "a", "b"]);
    }

    #[test]
    fn tags_input_accepts_both_shapes() {
        let from_csv: TagsInput = serde_json::from_value(serde_json::json!("a, b")).unwrap();
        let from_list: TagsInput =
            serde_json::from_value(serde_json::json!(["a", " b ", ""])).unwrap();
        assert_eq!(from_csv.into_tags(), vec!["a", "b"]);
        assert_eq!(from_list.into_tags(), vec!["a", "b"]);
    }
}
