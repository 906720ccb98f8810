//! Repository metadata facade
//!
//! [`RepositoryMetadata`] owns one cache slot per fetched document and per derived field. Nothing is fetched
//! at construction; each accessor fetches the page it needs on first use and every later call is served from
//! the cache. A failed fetch is not cached, so calling the accessor again retries it.

use crate::client::{Client, FetchResult};
use crate::commits::{Commit, MAX_FEED_ENTRIES, average_committed_at, parse_commit_feed};
use crate::config::{Config, Page, SourceConfig};
use crate::contributors::{Contributor, parse_contributors};
use crate::counters::{extract_count, extract_default_branch};
use crate::error::MetadataError;
use crate::repo_spec::RepoSpec;
use crate::selectors::Selectors;
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

const LOG_TARGET: &str = "  metadata";

/// Number of recent commits averaged when no explicit limit is wanted
pub const DEFAULT_AVERAGE_LIMIT: usize = 100;

type MetadataResult<T> = Result<T, MetadataError>;

/// Scraped facts about a single repository
#[derive(Debug)]
pub struct RepositoryMetadata {
    spec: RepoSpec,
    client: Client,
    selectors: Selectors,
    sources: SourceConfig,

    // fetched documents
    contributors_page: OnceCell<String>,
    branches_page: OnceCell<String>,

    // derived fields
    contributors: OnceCell<Vec<Contributor>>,
    contributor_usernames: OnceCell<Vec<String>>,
    contributor_realnames: OnceCell<Vec<String>>,
    contributor_names: OnceCell<Vec<String>>,
    issues: OnceCell<Option<u64>>,
    pull_requests: OnceCell<Option<u64>>,
    wiki_pages: OnceCell<Option<u64>>,
    default_branch: OnceCell<String>,
    recent_commits: OnceCell<Option<Vec<Commit>>>,
}

/// Every scraped fact gathered in one serializable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub user: String,
    pub repo: String,
    pub default_branch: String,
    pub issues: Option<u64>,
    pub pull_requests: Option<u64>,
    pub wiki_pages: Option<u64>,
    pub contributors: Vec<Contributor>,
    pub recent_commits: Option<Vec<Commit>>,
    pub average_recent_committed_at: Option<DateTime<Utc>>,
}

impl RepositoryMetadata {
    /// Create an instance for `user/repo` against the default configuration. No request is made.
    pub fn new(user: &str, repo: &str) -> crate::Result<Self> {
        Self::with_config(RepoSpec::new(user, repo)?, &Config::default())
    }

    /// Create an instance using the host, selectors and page mapping from `config`. No request is made.
    pub fn with_config(spec: RepoSpec, config: &Config) -> crate::Result<Self> {
        let client = Client::new(config.base_url.as_str(), &config.user_agent, config.request_timeout())?;

        Ok(Self {
            spec,
            client,
            selectors: config.compile_selectors()?,
            sources: config.sources,
            contributors_page: OnceCell::new(),
            branches_page: OnceCell::new(),
            contributors: OnceCell::new(),
            contributor_usernames: OnceCell::new(),
            contributor_realnames: OnceCell::new(),
            contributor_names: OnceCell::new(),
            issues: OnceCell::new(),
            pull_requests: OnceCell::new(),
            wiki_pages: OnceCell::new(),
            default_branch: OnceCell::new(),
            recent_commits: OnceCell::new(),
        })
    }

    /// Create an instance and immediately check that the repository exists.
    ///
    /// Returns `Ok(None)` when the repository is not found. Every other failure is returned as an error.
    pub async fn fetch(user: &str, repo: &str) -> MetadataResult<Option<Self>> {
        Self::fetch_with_config(RepoSpec::new(user, repo)?, &Config::default()).await
    }

    /// Like [`fetch`](Self::fetch), using `config`.
    pub async fn fetch_with_config(spec: RepoSpec, config: &Config) -> MetadataResult<Option<Self>> {
        let instance = Self::with_config(spec, config)?;

        match instance.issues().await {
            Ok(_) => Ok(Some(instance)),
            Err(e) if e.is_not_found() => {
                log::debug!(target: LOG_TARGET, "Repository '{}' not found: {e}", instance.spec);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        self.spec.user()
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        self.spec.repo()
    }

    #[must_use]
    pub const fn spec(&self) -> &RepoSpec {
        &self.spec
    }

    /// Contributors listed on the contributors page, in page order
    pub async fn contributors(&self) -> MetadataResult<&[Contributor]> {
        let contributors = self
            .contributors
            .get_or_try_init(move || self.with_document(Page::Contributors, move |doc| parse_contributors(doc, &self.selectors.contributors)))
            .await?;

        Ok(contributors.as_slice())
    }

    pub async fn contributor_usernames(&self) -> MetadataResult<&[String]> {
        self.derive_names(&self.contributor_usernames, |c| Some(c.username())).await
    }

    /// Real names of the contributors that have one
    pub async fn contributor_realnames(&self) -> MetadataResult<&[String]> {
        self.derive_names(&self.contributor_realnames, Contributor::realname).await
    }

    /// Real names, falling back to the username for contributors without one
    pub async fn contributor_names(&self) -> MetadataResult<&[String]> {
        self.derive_names(&self.contributor_names, |c| Some(c.display_name())).await
    }

    pub async fn has_wiki(&self) -> MetadataResult<bool> {
        Ok(self.wiki_pages().await?.is_some())
    }

    /// Number of wiki pages, or `None` when the wiki is disabled
    pub async fn wiki_pages(&self) -> MetadataResult<Option<u64>> {
        self.count(&self.wiki_pages, self.sources.wiki, &self.selectors.wiki).await
    }

    pub async fn has_issues(&self) -> MetadataResult<bool> {
        Ok(self.issues().await?.is_some())
    }

    /// Number of issues, or `None` when issues are disabled
    pub async fn issues(&self) -> MetadataResult<Option<u64>> {
        self.count(&self.issues, self.sources.issues, &self.selectors.issues).await
    }

    /// Number of pull requests, or `None` when the counter is missing
    pub async fn pull_requests(&self) -> MetadataResult<Option<u64>> {
        self.count(&self.pull_requests, self.sources.pull_requests, &self.selectors.pull_requests)
            .await
    }

    pub async fn default_branch(&self) -> MetadataResult<&str> {
        let branch = self
            .default_branch
            .get_or_try_init(move || async move {
                let page = self.sources.default_branch;
                self.with_document(page, move |doc| extract_default_branch(doc, &self.selectors.default_branch))
                    .await?
                    .ok_or_else(|| MetadataError::MissingDefaultBranch {
                        url: self.client.url_for(&self.page_path(page)),
                    })
            })
            .await?;

        Ok(branch.as_str())
    }

    /// Most recent commits on the default branch, newest first.
    ///
    /// `None` when the commit feed cannot be fetched or parsed.
    pub async fn recent_commits(&self) -> MetadataResult<Option<&[Commit]>> {
        let commits = self.recent_commits.get_or_try_init(move || self.load_recent_commits()).await?;
        Ok(commits.as_deref())
    }

    /// Mean commit time of the first `limit` recent commits.
    ///
    /// `None` when there are no commits to average.
    pub async fn average_recent_committed_at(&self, limit: usize) -> MetadataResult<Option<DateTime<Utc>>> {
        Ok(self
            .recent_commits()
            .await?
            .and_then(|commits| average_committed_at(commits, limit)))
    }

    /// Gather every field, fetching whatever is not cached yet
    pub async fn summary(&self) -> MetadataResult<RepositorySummary> {
        Ok(RepositorySummary {
            user: self.user().to_string(),
            repo: self.repo().to_string(),
            default_branch: self.default_branch().await?.to_string(),
            issues: self.issues().await?,
            pull_requests: self.pull_requests().await?,
            wiki_pages: self.wiki_pages().await?,
            contributors: self.contributors().await?.to_vec(),
            recent_commits: self.recent_commits().await?.map(<[Commit]>::to_vec),
            average_recent_committed_at: self.average_recent_committed_at(DEFAULT_AVERAGE_LIMIT).await?,
        })
    }

    async fn count(&self, cell: &OnceCell<Option<u64>>, page: Page, selector: &Selector) -> MetadataResult<Option<u64>> {
        let count = cell
            .get_or_try_init(move || self.with_document(page, move |doc| extract_count(doc, selector)))
            .await?;

        Ok(*count)
    }

    async fn derive_names<'a, F>(&'a self, cell: &'a OnceCell<Vec<String>>, pick: F) -> MetadataResult<&'a [String]>
    where
        F: Fn(&Contributor) -> Option<&str>,
    {
        let pick = &pick;
        let names = cell
            .get_or_try_init(move || async move {
                let contributors = self.contributors().await?;
                Ok::<_, MetadataError>(contributors.iter().filter_map(|c| pick(c).map(str::to_string)).collect())
            })
            .await?;

        Ok(names.as_slice())
    }

    async fn load_recent_commits(&self) -> MetadataResult<Option<Vec<Commit>>> {
        let branch = self.default_branch().await?;
        let path = self.spec.commits_feed_path(branch);

        // Only the two repository pages raise; an unreachable feed just means no commits
        let body = match self.client.get(&path).await {
            Ok(FetchResult::Success(body)) => body,
            Ok(FetchResult::Status(status)) => {
                log::debug!(target: LOG_TARGET, "No commit feed for '{}' (HTTP {status})", self.spec);
                return Ok(None);
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not fetch commit feed for '{}': {e:#}", self.spec);
                return Ok(None);
            }
        };

        match parse_commit_feed(&body) {
            Ok(mut commits) => {
                if commits.len() > MAX_FEED_ENTRIES {
                    log::debug!(target: LOG_TARGET, "Feed for '{}' has {} entries, keeping {MAX_FEED_ENTRIES}", self.spec, commits.len());
                    commits.truncate(MAX_FEED_ENTRIES);
                }
                Ok(Some(commits))
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not parse commit feed for '{}': {e:#}", self.spec);
                Ok(None)
            }
        }
    }

    /// Parse `page` and run `extract` over it. The parsed document never outlives the call.
    async fn with_document<T>(&self, page: Page, extract: impl FnOnce(&Html) -> T) -> MetadataResult<T> {
        let body = self.page(page).await?;
        let document = Html::parse_document(body);
        Ok(extract(&document))
    }

    async fn page(&self, page: Page) -> MetadataResult<&str> {
        let cell = match page {
            Page::Contributors => &self.contributors_page,
            Page::Branches => &self.branches_page,
        };

        let body = cell.get_or_try_init(move || self.fetch_page(page)).await?;
        Ok(body.as_str())
    }

    async fn fetch_page(&self, page: Page) -> MetadataResult<String> {
        let path = self.page_path(page);

        match self.client.get(&path).await? {
            FetchResult::Success(body) => Ok(body),
            FetchResult::Status(status) => Err(MetadataError::RepositoryNotFound {
                url: self.client.url_for(&path),
                reason: format!("HTTP {status}"),
            }),
        }
    }

    fn page_path(&self, page: Page) -> String {
        match page {
            Page::Contributors => self.spec.contributors_path(),
            Page::Branches => self.spec.branches_path(),
        }
    }
}
