//! Tag list parsing and limits.
//!
//! Tag input arrives as a single comma-separated string (form fields,
//! `--tags` flags, the `?tags=` import parameter). It is split, trimmed and
//! stripped of empty tokens before anything is sent to the server.

use crate::error::CoreError;

/// Maximum number of tags the server accepts on one record.
pub const MAX_TAGS: usize = 10;

/// Maximum length of a single tag.
pub const MAX_TAG_LEN: usize = 50;

/// Label shown for an automation source with no tag filter.
pub const ALL_TAGS_LABEL: &str = "All tags";

/// Label shown for an empty tag set.
pub const NO_TAGS_LABEL: &str = "No tags";

/// Split a comma-separated tag string into a normalized list.
///
/// Whitespace around each token is trimmed and empty tokens are dropped.
///
/// ```
/// use hntr_core::tags::split_tags;
/// assert_eq!(split_tags("a,,b,"), vec!["a", "b"]);
/// assert_eq!(split_tags("alpha, "), vec!["alpha"]);
/// assert!(split_tags("").is_empty());
/// ```
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a tag list back into its comma-separated input form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Check a normalized tag list against the server's limits.
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "too many tags ({}), at most {MAX_TAGS} allowed",
            tags.len()
        )));
    }
    if let Some(long) = tags.iter().find(|t| t.chars().count() > MAX_TAG_LEN) {
        return Err(CoreError::Validation(format!(
            "tag '{long}' is longer than {MAX_TAG_LEN} characters"
        )));
    }
    Ok(())
}

/// Display form of a tag set, with `empty_label` standing in for none.
pub fn tags_label(tags: &[String], empty_label: &str) -> String {
    if tags.is_empty() {
        empty_label.to_string()
    } else {
        tags.iter().map(|t| format!("[{t}]")).collect::<Vec<_>>().join(" ")
    }
}
