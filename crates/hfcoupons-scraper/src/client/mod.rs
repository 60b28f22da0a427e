//! HTTP client for the paginated coupon listing at `{base_url}/page/{n}/`.

mod origin;
mod scrape;

use std::time::Duration;

use hfcoupons_core::AppConfig;
use reqwest::Client;
use scraper::Html;

use crate::error::ScraperError;

pub use origin::{normalize_base_url, resolve_url};

/// Hard ceiling on the page count a listing may advertise.
///
/// A discovered count above this is treated as broken markup rather than
/// scraped page by page.
pub const MAX_PAGES: u32 = 200;

/// Fetches coupon listing pages.
///
/// Every non-2xx response is a typed error and nothing is retried: the first
/// failed page aborts whatever scrape is in progress.
#[derive(Debug, Clone)]
pub struct CouponClient {
    pub(super) client: Client,
    /// Site root without a trailing slash.
    pub(super) base_url: String,
}

impl CouponClient {
    /// Creates a `CouponClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates a `CouponClient` from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`CouponClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the listing URL for a 1-based page number.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/page/{page}/", self.base_url)
    }

    /// Fetches one listing page and parses it into a document tree.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] for HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ScraperError::Http`] for network failures and timeouts.
    pub async fn fetch_page(&self, page: u32) -> Result<Html, ScraperError> {
        let body = self.fetch_page_body(page).await?;
        Ok(Html::parse_document(&body))
    }

    /// Fetches the raw HTML of one listing page.
    ///
    /// Callers inside this crate parse the body synchronously so no `Html`
    /// value is held across an `.await`.
    pub(super) async fn fetch_page_body(&self, page: u32) -> Result<String, ScraperError> {
        let url = self.page_url(page);
        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        tracing::debug!(page, bytes = body.len(), "fetched coupon listing page");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
