//! Total page count discovery from the page-1 listing markup.
//!
//! The listing links to its pages as `/page/<n>/`. The markup around those
//! links has changed before, so discovery is an ordered list of locator
//! strategies with decreasing structural assumptions:
//!
//! 1. [`PageCountSource::Container`]: the first pagination container found
//!    (`div.nav-links`, then `nav.navigation`, then `div.pagination`). A found
//!    container always decides, even when it holds no page links.
//! 2. [`PageCountSource::Document`]: every anchor in the document. Only
//!    decides when it finds a page beyond 1.
//! 3. [`PageCountSource::Default`]: [`DEFAULT_TOTAL_PAGES`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Page count used when the markup yields no usable pagination links.
pub const DEFAULT_TOTAL_PAGES: u32 = 8;

static PAGE_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/page/(\d+)/").expect("valid page href regex"));

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

static CONTAINER_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["div.nav-links", "nav.navigation", "div.pagination"]
        .iter()
        .map(|s| Selector::parse(s).expect("valid pagination container selector"))
        .collect()
});

/// Which locator strategy decided the page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCountSource {
    Container,
    Document,
    Default,
}

type Locator = fn(&Html) -> Option<u32>;

const LOCATORS: [(PageCountSource, Locator); 2] = [
    (PageCountSource::Container, from_container),
    (PageCountSource::Document, from_document),
];

/// Returns the total number of listing pages advertised by `document`.
#[must_use]
pub fn total_pages(document: &Html) -> u32 {
    locate_total_pages(document).0
}

/// Like [`total_pages`], also reporting which strategy decided.
#[must_use]
pub fn locate_total_pages(document: &Html) -> (u32, PageCountSource) {
    LOCATORS
        .iter()
        .find_map(|(source, locate)| locate(document).map(|pages| (pages, *source)))
        .unwrap_or((DEFAULT_TOTAL_PAGES, PageCountSource::Default))
}

fn from_container(document: &Html) -> Option<u32> {
    let container = CONTAINER_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())?;
    let highest = max_page_number(container.select(&ANCHOR_SELECTOR)).unwrap_or(1);
    Some(highest.max(1))
}

fn from_document(document: &Html) -> Option<u32> {
    max_page_number(document.select(&ANCHOR_SELECTOR)).filter(|&pages| pages > 1)
}

fn max_page_number<'a>(anchors: impl Iterator<Item = ElementRef<'a>>) -> Option<u32> {
    anchors
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(page_number_from_href)
        .max()
}

/// Extracts `n` from the first `/page/<n>/` segment of an href.
#[must_use]
pub fn page_number_from_href(href: &str) -> Option<u32> {
    PAGE_HREF_RE
        .captures(href)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
}
