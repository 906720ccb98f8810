//! Compiled CSS selectors used to scrape the repository pages.

use crate::Result;
use crate::config::SelectorConfig;
use ohno::app_err;
use scraper::Selector;

/// The set of selectors the extractors run against, compiled once per [`RepositoryMetadata`](crate::RepositoryMetadata).
#[derive(Debug, Clone)]
pub struct Selectors {
    pub contributors: Selector,
    pub issues: Selector,
    pub pull_requests: Selector,
    pub wiki: Selector,
    pub default_branch: Selector,
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            contributors: compile_one("contributors", &config.contributors)?,
            issues: compile_one("issues", &config.issues)?,
            pull_requests: compile_one("pull_requests", &config.pull_requests)?,
            wiki: compile_one("wiki", &config.wiki)?,
            default_branch: compile_one("default_branch", &config.default_branch)?,
        })
    }
}

fn compile_one(name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| app_err!("invalid {name} selector '{css}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let _ = Selectors::compile(&SelectorConfig::default()).unwrap();
    }

    #[test]
    fn test_invalid_selector_names_field() {
        let config = SelectorConfig {
            wiki: "a[highlight=".to_string(),
            ..SelectorConfig::default()
        };

        let err = Selectors::compile(&config).unwrap_err();
        assert!(err.to_string().contains("wiki"));
    }
}
