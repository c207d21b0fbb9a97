//! HTTP page fetcher shared by every walk in a campaign.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ScraperError;

/// Thin wrapper over one `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool, so concurrent walks
/// reuse connections without any other shared state. There is no retry: a
/// failed fetch is reported once and the caller treats the page as empty.
#[derive(Debug, Clone)]
pub struct DealsClient {
    client: Client,
}

impl DealsClient {
    /// Creates a `DealsClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Issues a single GET and returns the body of a `200 OK` response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any status other than 200.
    /// - [`ScraperError::Http`] for DNS, connect, timeout, or body read failures.
    pub async fn try_fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Like [`Self::try_fetch`], but never fails: errors are logged and
    /// reported as `None` ("no content").
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(body) => Some(body),
            Err(ScraperError::UnexpectedStatus { status, .. }) => {
                tracing::warn!(url, status, "failed to fetch page");
                None
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "error fetching page");
                None
            }
        }
    }
}
