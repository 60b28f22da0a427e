//! Page discovery and sequential multi-page scrape loops for `CouponClient`.

use std::time::Duration;

use hfcoupons_core::Coupon;
use scraper::Html;

use crate::error::ScraperError;
use crate::extract::extract_coupons;
use crate::pagination::locate_total_pages;
use crate::types::{PageExtraction, ScrapeReport};

use super::CouponClient;
use super::MAX_PAGES;

impl CouponClient {
    /// Fetches page 1 and works out how many listing pages exist.
    ///
    /// # Errors
    ///
    /// Propagates any error from fetching page 1. Returns
    /// [`ScraperError::PaginationLimit`] if the listing advertises more than
    /// [`MAX_PAGES`] pages.
    pub async fn discover_total_pages(&self) -> Result<u32, ScraperError> {
        let body = self.fetch_page_body(1).await?;
        let (total_pages, source) = locate_total_pages(&Html::parse_document(&body));
        tracing::debug!(total_pages, ?source, "resolved coupon page count");

        if total_pages > MAX_PAGES {
            return Err(ScraperError::PaginationLimit {
                base_url: self.base_url.clone(),
                pages: total_pages,
                max_pages: MAX_PAGES,
            });
        }

        Ok(total_pages)
    }

    /// Scrapes one listing page, returning its coupons in document order.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`]. Extraction misses are
    /// never errors.
    pub async fn scrape_page(&self, page: u32) -> Result<Vec<Coupon>, ScraperError> {
        Ok(self.scrape_page_report(page).await?.coupons)
    }

    /// Scrapes one listing page, returning coupons plus skip counters.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`].
    pub async fn scrape_page_report(&self, page: u32) -> Result<PageExtraction, ScraperError> {
        let body = self.fetch_page_body(page).await?;
        let extraction = extract_coupons(&Html::parse_document(&body), &self.base_url);

        tracing::debug!(
            page,
            articles = extraction.articles,
            coupons = extraction.coupons.len(),
            non_coupon = extraction.non_coupon,
            malformed = extraction.malformed,
            "extracted coupon listing page"
        );
        if extraction.coupons.is_empty() && extraction.malformed > 0 {
            tracing::warn!(
                page,
                malformed = extraction.malformed,
                "every coupon-like article on page failed extraction; listing markup may have changed"
            );
        }

        Ok(extraction)
    }

    /// Scrapes every listing page and returns all coupons in page order.
    ///
    /// `inter_request_delay_ms` is slept between consecutive pages, never after
    /// the last one.
    ///
    /// **All-or-nothing semantics**: on any page failure, coupons from earlier
    /// pages are discarded and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::discover_total_pages`] or
    /// [`Self::scrape_page`].
    pub async fn scrape_all(&self, inter_request_delay_ms: u64) -> Result<Vec<Coupon>, ScraperError> {
        Ok(self.scrape_all_report(inter_request_delay_ms).await?.coupons)
    }

    /// Same traversal as [`Self::scrape_all`], also returning the page count
    /// and summed skip counters.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::discover_total_pages`] or
    /// [`Self::scrape_page_report`].
    pub async fn scrape_all_report(
        &self,
        inter_request_delay_ms: u64,
    ) -> Result<ScrapeReport, ScraperError> {
        let total_pages = self.discover_total_pages().await?;
        let mut report = ScrapeReport::new(total_pages);

        for page in 1..=total_pages {
            let extraction = self.scrape_page_report(page).await?;
            report.absorb(extraction);

            if page < total_pages && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
        }

        tracing::info!(
            total_pages,
            coupons = report.coupons.len(),
            articles = report.articles,
            non_coupon = report.non_coupon,
            malformed = report.malformed,
            "coupon scrape complete"
        );

        Ok(report)
    }
}
