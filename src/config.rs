use crate::Result;
use crate::selectors::Selectors;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// File names searched, in order, when no explicit configuration path is given
pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
    "github-metadata.toml",
    "github-metadata.yml",
    "github-metadata.yaml",
    "github-metadata.json",
];

/// A scraped page that can back a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// `<host>/<user>/<repo>/contributors`
    Contributors,
    /// `<host>/<user>/<repo>/branches`
    Branches,
}

/// CSS selectors locating each fact within its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SelectorConfig {
    /// One match per contributor list item
    pub contributors: String,
    pub issues: String,
    pub pull_requests: String,
    pub wiki: String,
    pub default_branch: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            contributors: "#repos #watchers.members li".to_string(),
            issues: r#"a[highlight="issues"]"#.to_string(),
            pull_requests: r#"a[highlight="repo_pulls"]"#.to_string(),
            wiki: r#"a[highlight="repo_wiki"]"#.to_string(),
            default_branch: ".tabs .contextswitch code".to_string(),
        }
    }
}

/// Which page backs each scraped field
///
/// The contributor list always comes from the contributors page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SourceConfig {
    pub issues: Page,
    pub pull_requests: Page,
    pub wiki: Page,
    pub default_branch: Page,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            issues: Page::Contributors,
            pull_requests: Page::Contributors,
            wiki: Page::Contributors,
            default_branch: Page::Branches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Scheme and host of the scraped site
    pub base_url: String,

    pub user_agent: String,

    /// Per-request timeout in seconds, 0 disables the timeout
    pub request_timeout_secs: u64,

    pub selectors: SelectorConfig,

    pub sources: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://github.com".to_string(),
            user_agent: "github-metadata".to_string(),
            request_timeout_secs: 30,
            selectors: SelectorConfig::default(),
            sources: SourceConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// Reads `config_path` if given, otherwise the first of [`DEFAULT_CONFIG_FILES`] found in `base_dir`,
    /// otherwise returns the defaults. Returns the configuration along with any validation warnings.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let mut found = None;
            for name in DEFAULT_CONFIG_FILES {
                let path = base_dir.join(name);
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let warnings = config.validate().map_err(|e| app_err!("invalid configuration in {final_path}: {e}"))?;
        Ok((config, warnings))
    }

    /// Write the configuration, choosing the format from the file extension
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self).into_app_err("serializing configuration as TOML")?,
            "yml" | "yaml" => serde_yaml::to_string(self).into_app_err("serializing configuration as YAML")?,
            "json" => serde_json::to_string_pretty(self).into_app_err("serializing configuration as JSON")?,
            _ => bail!("unsupported configuration file extension: {extension}"),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))
    }

    /// Check the configuration, returning non-fatal warnings.
    ///
    /// Invalid selectors and a malformed base URL are errors.
    pub fn validate(&self) -> Result<Vec<String>> {
        let _ = self.compile_selectors()?;

        let url = Url::parse(&self.base_url).into_app_err_with(|| format!("invalid base_url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("base_url '{}' must use http or https", self.base_url);
        }

        let mut warnings = Vec::new();
        if self.request_timeout_secs == 0 {
            warnings.push("request_timeout_secs is 0, requests will never time out".to_string());
        }

        if self.user_agent.trim().is_empty() {
            warnings.push("user_agent is empty, the site may reject requests".to_string());
        }

        Ok(warnings)
    }

    pub fn compile_selectors(&self) -> Result<Selectors> {
        Selectors::compile(&self.selectors)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
