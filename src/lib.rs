//! github-metadata crate
//!
//! Retrieves repository facts that are not exposed by the GitHub API (contributor lists, issue, pull request
//! and wiki counts, the default branch, and the recent commit history) by scraping the repository's HTML pages
//! and its Atom commit feed.
//!
//! The entry point is [`RepositoryMetadata`], which lazily fetches each page once and memoizes every derived field.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod client;
pub mod commits;
pub mod config;
pub mod contributors;
pub mod counters;
pub mod error;
pub mod metadata;
pub mod repo_spec;
pub mod selectors;

pub use commits::Commit;
pub use config::Config;
pub use contributors::Contributor;
pub use error::MetadataError;
pub use metadata::{DEFAULT_AVERAGE_LIMIT, RepositoryMetadata, RepositorySummary};
pub use repo_spec::RepoSpec;
