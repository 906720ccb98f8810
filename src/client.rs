//! HTTP client for the scraped site
//!
//! Fetches pages and feeds relative to a fixed base URL and classifies the response by status.

use crate::Result;
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::StatusCode;

const LOG_TARGET: &str = "    client";

/// Result of fetching a document
#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response, carrying the body text
    Success(String),

    /// Any non-success status
    Status(StatusCode),
}

/// Document fetcher bound to a single host
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new client for `base_url` (e.g. `https://github.com`)
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder().user_agent(user_agent);
        if !timeout.is_zero() {
            client_builder = client_builder.timeout(timeout);
        }

        let base_url: String = base_url.into();

        Ok(Self {
            client: client_builder.build().into_app_err("unable to create HTTP client")?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a host-relative path
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch a host-relative path and classify the result
    ///
    /// Network failures and unreadable bodies are errors; HTTP failures are reported as [`FetchResult::Status`].
    pub async fn get(&self, path: &str) -> Result<FetchResult> {
        let url = self.url_for(path);
        log::info!(target: LOG_TARGET, "Fetching '{url}'");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("could not send HTTP request to '{url}'"))?;

        let status = resp.status();
        if !status.is_success() {
            log::debug!(target: LOG_TARGET, "'{url}' answered with HTTP {status}");
            return Ok(FetchResult::Status(status));
        }

        let body = resp
            .text()
            .await
            .into_app_err_with(|| format!("could not read response body from '{url}'"))?;

        log::debug!(target: LOG_TARGET, "Fetched {} bytes from '{url}'", body.len());
        Ok(FetchResult::Success(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_base_url() {
        let client = Client::new("https://github.com", "github-metadata", Duration::from_secs(30)).unwrap();
        assert_eq!(client.base_url(), "https://github.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = Client::new("https://github.com/", "github-metadata", Duration::ZERO).unwrap();
        assert_eq!(client.base_url(), "https://github.com");
        assert_eq!(client.url_for("/rails/rails/branches"), "https://github.com/rails/rails/branches");
    }

    #[tokio::test]
    async fn test_get_unreachable_host_is_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP connections
        let client = Client::new("http://127.0.0.1:9", "github-metadata", Duration::from_secs(5)).unwrap();
        let _ = client.get("/a/b/contributors").await.unwrap_err();
    }
}
