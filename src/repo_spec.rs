use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

/// Identity of a hosted repository: the `(user, repo)` pair.
///
/// Both parts are treated as opaque path segments and must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    user: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    pub fn new(user: impl AsRef<str>, repo: impl AsRef<str>) -> Result<Self> {
        let user = user.as_ref().trim();
        let repo = repo.as_ref().trim();

        if user.is_empty() || repo.is_empty() {
            bail!("invalid repository: empty user or repo name: '{user}/{repo}'");
        }

        if user.contains('/') || repo.contains('/') {
            bail!("invalid repository: user and repo must be single path segments: '{user}/{repo}'");
        }

        Ok(Self {
            user: Arc::from(user),
            repo: Arc::from(repo),
        })
    }

    /// Parse a repository URL such as `https://github.com/rails/rails`.
    ///
    /// Trailing path segments and a `.git` suffix are ignored.
    pub fn parse(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 {
            bail!("invalid repository URL format: {url}");
        }

        if path_segments[0].is_empty() || path_segments[1].is_empty() {
            bail!("invalid repository URL: empty user or repo name: {url}");
        }

        Self::new(path_segments[0], path_segments[1].trim_end_matches(".git"))
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Path of the contributors page, relative to the host.
    #[must_use]
    pub fn contributors_path(&self) -> String {
        format!("/{}/{}/contributors", self.user, self.repo)
    }

    /// Path of the branches page, relative to the host.
    #[must_use]
    pub fn branches_path(&self) -> String {
        format!("/{}/{}/branches", self.user, self.repo)
    }

    /// Path of the Atom feed listing the most recent commits on `branch`.
    #[must_use]
    pub fn commits_feed_path(&self, branch: &str) -> String {
        format!("/{}/{}/commits/{branch}.atom", self.user, self.repo)
    }
}

impl FromStr for RepoSpec {
    type Err = ohno::AppError;

    /// Accepts either `user/repo` or a full repository URL.
    fn from_str(s: &str) -> Result<Self> {
        if s.contains("://") {
            let url = Url::parse(s).into_app_err_with(|| format!("invalid repository URL '{s}'"))?;
            return Self::parse(&url);
        }

        let Some((user, repo)) = s.split_once('/') else {
            bail!("invalid repository '{s}': expected 'user/repo'");
        };

        Self::new(user, repo.trim_end_matches(".git"))
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.user, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let spec = RepoSpec::new("aslakhellesoy", "cucumber").unwrap();

        assert_eq!(spec.user(), "aslakhellesoy");
        assert_eq!(spec.repo(), "cucumber");
        assert_eq!(spec.to_string(), "aslakhellesoy/cucumber");
    }

    #[test]
    fn test_new_rejects_empty_parts() {
        let _ = RepoSpec::new("", "cucumber").unwrap_err();
        let _ = RepoSpec::new("aslakhellesoy", "  ").unwrap_err();
    }

    #[test]
    fn test_new_rejects_nested_segments() {
        let _ = RepoSpec::new("a/b", "c").unwrap_err();
    }

    #[test]
    fn test_paths() {
        let spec = RepoSpec::new("colszowka", "simplecov").unwrap();

        assert_eq!(spec.contributors_path(), "/colszowka/simplecov/contributors");
        assert_eq!(spec.branches_path(), "/colszowka/simplecov/branches");
        assert_eq!(spec.commits_feed_path("master"), "/colszowka/simplecov/commits/master.atom");
    }

    #[test]
    fn test_parse_github_url() {
        let url = Url::parse("https://github.com/tokio-rs/tokio").unwrap();
        let spec = RepoSpec::parse(&url).unwrap();

        assert_eq!(spec.user(), "tokio-rs");
        assert_eq!(spec.repo(), "tokio");
    }

    #[test]
    fn test_parse_url_with_git_extension_and_path() {
        let url = Url::parse("https://github.com/serde-rs/serde.git/tree/master/serde_derive").unwrap();
        let spec = RepoSpec::parse(&url).unwrap();

        assert_eq!(spec.user(), "serde-rs");
        assert_eq!(spec.repo(), "serde");
    }

    #[test]
    fn test_parse_invalid_url_only_user() {
        let url = Url::parse("https://github.com/tokio-rs").unwrap();
        let _ = RepoSpec::parse(&url).unwrap_err();
    }

    #[test]
    fn test_parse_invalid_url_empty_repo() {
        let url = Url::parse("https://github.com/tokio-rs/").unwrap();
        let _ = RepoSpec::parse(&url).unwrap_err();
    }

    #[test]
    fn test_from_str_shorthand() {
        let spec: RepoSpec = "rails/rails".parse().unwrap();
        assert_eq!(spec, RepoSpec::new("rails", "rails").unwrap());
    }

    #[test]
    fn test_from_str_url() {
        let spec: RepoSpec = "https://github.com/rails/rails/issues".parse().unwrap();
        assert_eq!(spec, RepoSpec::new("rails", "rails").unwrap());
    }

    #[test]
    fn test_from_str_invalid() {
        let _ = "rails".parse::<RepoSpec>().unwrap_err();
        let _ = "rails/".parse::<RepoSpec>().unwrap_err();
        let _ = "rails/rails/extra".parse::<RepoSpec>().unwrap_err();
    }
}
