//! Entity services: all reads honor the published-visibility rule and all
//! writes funnel through the normalization in [`crate::normalize`].

pub mod posts;
pub mod projects;

pub use posts::PostService;
pub use projects::ProjectService;

/// Deserialize helper that distinguishes an absent key from an explicit
/// `null`: absent stays `None`, `null` becomes `Some(None)` (clear the
/// field), a value becomes `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Trim an optional text field, mapping whitespace-only values to NULL.
pub(crate) fn trim_or_null(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}
