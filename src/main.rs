//! Scrape repository facts that the GitHub API does not expose.
//!
//! # Usage
//!
//! Show everything known about a repository:
//!
//! ```bash
//! github-metadata show aslakhellesoy/cucumber
//! github-metadata show https://github.com/colszowka/simplecov.git --format json
//! ```
//!
//! Average over the last five commits only:
//!
//! ```bash
//! github-metadata show colszowka/simplecov --average-limit 5
//! ```
//!
//! Diagnostics go to stderr:
//!
//! ```bash
//! github-metadata show colszowka/simplecov --log-level debug
//! ```
//!
//! # Configuration
//!
//! The host, user agent, request timeout, CSS selectors and the page each counter is read from are all
//! configurable. Write the defaults out and edit them:
//!
//! ```bash
//! github-metadata init github-metadata.toml
//! ```
//!
//! **Default search locations:**
//! - `github-metadata.toml`
//! - `github-metadata.yml`
//! - `github-metadata.yaml`
//! - `github-metadata.json`
//!
//! ```toml
//! base_url = "https://github.com"
//! user_agent = "github-metadata"
//! request_timeout_secs = 30
//!
//! [selectors]
//! contributors = "#repos #watchers.members li"
//! issues = 'a[highlight="issues"]'
//!
//! [sources]
//! issues = "contributors"
//! default_branch = "branches"
//! ```
//!
//! # Exit codes
//!
//! - `0`: the repository was found and every fact was gathered
//! - `1`: the repository was not found, or a request failed

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use github_metadata::Result;

mod commands;

use crate::commands::{InitArgs, ShowArgs, init_config, show_repository};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "github-metadata", version, about, long_about = None)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape and print the metadata of a repository
    Show(Box<ShowArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Show(show_args) => show_repository(show_args).await,
        Command::Init(init_args) => init_config(init_args),
    }
}
