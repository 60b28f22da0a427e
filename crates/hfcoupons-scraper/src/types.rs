//! Result shapes for page and site scrapes.
//!
//! The coupon site publishes no markup contract, so extraction silently drops
//! nodes it cannot read. The counters here make those drops visible without
//! changing which coupons come out.

use hfcoupons_core::Coupon;

/// Coupons extracted from one listing page, plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Extracted coupons in document order.
    pub coupons: Vec<Coupon>,
    /// Number of `article` nodes examined.
    pub articles: usize,
    /// Articles rejected because their text lacks the `Code` / `Exp` markers.
    pub non_coupon: usize,
    /// Articles that looked like coupons but were missing a required field.
    pub malformed: usize,
}

impl PageExtraction {
    /// Articles that did not produce a coupon, for any reason.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.non_coupon + self.malformed
    }
}

/// Aggregate of a full multi-page scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// All coupons, page order first, then document order within a page.
    pub coupons: Vec<Coupon>,
    /// Page count used for the traversal.
    pub total_pages: u32,
    pub articles: usize,
    pub non_coupon: usize,
    pub malformed: usize,
}

impl ScrapeReport {
    #[must_use]
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.non_coupon + self.malformed
    }

    /// Appends one page's coupons and adds its counters.
    pub fn absorb(&mut self, page: PageExtraction) {
        self.articles += page.articles;
        self.non_coupon += page.non_coupon;
        self.malformed += page.malformed;
        self.coupons.extend(page.coupons);
    }
}
