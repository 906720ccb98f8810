//! Contributor list scraped from the contributors page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const LOG_TARGET: &str = "contributors";

static REALNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("invalid regex"));

/// A repository contributor as listed on the contributors page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    username: String,
    realname: Option<String>,
}

impl Contributor {
    #[must_use]
    pub const fn new(username: String, realname: Option<String>) -> Self {
        Self { username, realname }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The contributor's real name, if the profile shows one
    #[must_use]
    pub fn realname(&self) -> Option<&str> {
        self.realname.as_deref()
    }

    /// The real name, falling back to the username
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.realname().unwrap_or(&self.username)
    }
}

/// Extract every contributor matched by `selector`, in document order.
#[must_use]
pub fn parse_contributors(document: &Html, selector: &Selector) -> Vec<Contributor> {
    let contributors: Vec<_> = document.select(selector).filter_map(parse_list_item).collect();
    log::debug!(target: LOG_TARGET, "Found {} contributors", contributors.len());
    contributors
}

fn parse_list_item(item: ElementRef<'_>) -> Option<Contributor> {
    let line = normalize_text(item);
    parse_contributor_line(&line)
}

/// Parse a normalized `username (Real Name) ...` line
fn parse_contributor_line(line: &str) -> Option<Contributor> {
    let Some(username) = line.split_whitespace().next() else {
        log::debug!(target: LOG_TARGET, "Skipping empty contributor entry");
        return None;
    };

    let realname = REALNAME_REGEX
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Some(Contributor::new(username.to_string(), realname))
}

/// Element text with interior whitespace collapsed to single spaces and the ends trimmed
pub(crate) fn normalize_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
