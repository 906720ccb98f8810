//! Scalar facts scraped from repository pages: issue, pull request and wiki counters, and the default branch.

use crate::contributors::normalize_text;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

const LOG_TARGET: &str = "  counters";

static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("invalid regex"));

/// Read the counter marked by `selector`.
///
/// Returns `None` when the marker is missing, which means the feature is disabled for the repository.
/// Only ASCII digits are read. A marker without any, or with a run too large for `u64`, counts as zero.
#[must_use]
pub fn extract_count(document: &Html, selector: &Selector) -> Option<u64> {
    let Some(element) = document.select(selector).next() else {
        log::debug!(target: LOG_TARGET, "No counter matches selector, treating the feature as disabled");
        return None;
    };

    let text = normalize_text(element);
    let Some(digits) = DIGITS_REGEX.find(&text) else {
        log::debug!(target: LOG_TARGET, "Counter text '{text}' holds no digits, counting it as 0");
        return Some(0);
    };

    let count = match digits.as_str().parse::<u64>() {
        Ok(count) => count,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Counter '{}' in '{text}' is out of range ({e}), counting it as 0", digits.as_str());
            0
        }
    };

    log::debug!(target: LOG_TARGET, "Counter text '{text}' parsed as {count}");
    Some(count)
}

/// Read the default branch name marked by `selector`, if present and non-empty.
#[must_use]
pub fn extract_default_branch(document: &Html, selector: &Selector) -> Option<String> {
    let branch = normalize_text(document.select(selector).next()?);
    if branch.is_empty() { None } else { Some(branch) }
}
