use super::common::CommonArgs;
use clap::{Parser, ValueEnum};
use github_metadata::{DEFAULT_AVERAGE_LIMIT, RepoSpec, RepositoryMetadata, RepositorySummary, Result};
use ohno::{IntoAppError, bail};

/// Output format for repository facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// Pretty-printed JSON document
    Json,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Repository to inspect (format: `user/repo` or a repository URL)
    #[arg(value_name = "REPO", value_parser = |s: &str| s.parse::<RepoSpec>().map_err(|e| e.to_string()))]
    pub repo: RepoSpec,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Number of recent commits averaged for the average commit time
    #[arg(long, value_name = "N", default_value_t = DEFAULT_AVERAGE_LIMIT)]
    pub average_limit: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn show_repository(args: &ShowArgs) -> Result<()> {
    let config = args.common.setup()?;

    let Some(metadata) = RepositoryMetadata::fetch_with_config(args.repo.clone(), &config).await? else {
        bail!("repository '{}' not found", args.repo);
    };

    let mut summary = metadata.summary().await?;
    summary.average_recent_committed_at = metadata.average_recent_committed_at(args.average_limit).await?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).into_app_err("serializing repository summary")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_text(&summary, args.average_limit)),
    }

    Ok(())
}

fn render_text(summary: &RepositorySummary, average_limit: usize) -> String {
    use core::fmt::Write;

    fn counter(value: Option<u64>) -> String {
        value.map_or_else(|| "disabled".to_string(), |v| v.to_string())
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}/{}", summary.user, summary.repo);
    let _ = writeln!(out, "  Default branch:  {}", summary.default_branch);
    let _ = writeln!(out, "  Issues:          {}", counter(summary.issues));
    let _ = writeln!(out, "  Pull requests:   {}", counter(summary.pull_requests));
    let _ = writeln!(out, "  Wiki pages:      {}", counter(summary.wiki_pages));

    let _ = writeln!(out, "  Contributors:    {}", summary.contributors.len());
    for contributor in &summary.contributors {
        match contributor.realname() {
            Some(realname) => {
                let _ = writeln!(out, "    - {realname} ({})", contributor.username());
            }
            None => {
                let _ = writeln!(out, "    - {}", contributor.username());
            }
        }
    }

    match summary.average_recent_committed_at {
        Some(at) => {
            let _ = writeln!(out, "  Average commit time (last {average_limit}): {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => {
            let _ = writeln!(out, "  Average commit time: n/a");
        }
    }

    match &summary.recent_commits {
        Some(commits) => {
            let _ = writeln!(out, "  Recent commits:  {}", commits.len());
            for commit in commits {
                let _ = writeln!(
                    out,
                    "    {}  {} ({})",
                    commit.committed_at.format("%Y-%m-%d %H:%M"),
                    commit.title,
                    commit.author
                );
            }
        }
        None => {
            let _ = writeln!(out, "  Recent commits:  feed unavailable");
        }
    }

    out
}
