//! Recent commits read from the branch's Atom feed.

use crate::Result;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "   commits";

/// Upper bound on the number of entries the commit feed carries
pub const MAX_FEED_ENTRIES: usize = 20;

/// One entry of the commit feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub title: String,
    pub message: String,
    pub author: String,
    pub committed_at: DateTime<Utc>,
    pub url: String,
}

/// Parse the body of a commit Atom feed, newest entry first.
///
/// Entries without a timestamp are skipped.
pub fn parse_commit_feed(body: &str) -> Result<Vec<Commit>> {
    // Some feeds are served with a blank line ahead of the XML declaration, which XML parsers reject
    let body = body.trim_start();

    let feed = feed_rs::parser::parse(body.as_bytes()).into_app_err("parsing commit feed")?;

    let commits: Vec<_> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let Some(committed_at) = entry.updated.or(entry.published) else {
                log::debug!(target: LOG_TARGET, "Skipping feed entry '{}' without a timestamp", entry.id);
                return None;
            };

            Some(Commit {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                message: entry
                    .content
                    .and_then(|c| c.body)
                    .or_else(|| entry.summary.map(|s| s.content))
                    .unwrap_or_default(),
                author: entry.authors.into_iter().next().map(|p| p.name).unwrap_or_default(),
                committed_at,
                url: entry.links.into_iter().next().map(|l| l.href).unwrap_or_default(),
            })
        })
        .collect();

    log::debug!(target: LOG_TARGET, "Parsed {} commits from feed", commits.len());
    Ok(commits)
}

/// Mean commit time over the first `limit` commits, or `None` if there is nothing to average.
#[must_use]
pub fn average_committed_at(commits: &[Commit], limit: usize) -> Option<DateTime<Utc>> {
    let window = &commits[..limit.min(commits.len())];
    if window.is_empty() {
        return None;
    }

    let total: i128 = window.iter().map(|c| i128::from(c.committed_at.timestamp_micros())).sum();
    let mean = total.div_euclid(window.len() as i128);

    DateTime::from_timestamp_micros(i64::try_from(mean).ok()?)
}
