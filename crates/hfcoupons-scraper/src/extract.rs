//! Coupon extraction from listing `article` nodes.
//!
//! Listing markup is heterogeneous and unversioned. Each field therefore has
//! its own rule function so a markup change can be patched in one place:
//!
//! | Field | Rule | Source |
//! |-------|------|--------|
//! | gate | [`looks_like_coupon`] | node text contains `Code` and `Exp` |
//! | name, url | [`extract_name_and_url`] | first `h2`/`h3`, then its anchor |
//! | price | [`extract_price`] | first `$1,234.56`-style amount |
//! | code | [`extract_code`] | `Code`, `Code:` or `Code #` then digits |
//! | expiration | [`extract_expiration`] | `Exp` / `Exp.` then `M/D/YY(YY)` |
//! | image | [`extract_image_url`] | first `img` `src`, else `data-src` |
//!
//! Text rules operate on the concatenated text of the whole article node.
//! A node missing any field is dropped without error.

use std::str::FromStr;
use std::sync::LazyLock;

use hfcoupons_core::{Coupon, MIN_NAME_CHARS};
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::client::resolve_url;
use crate::types::PageExtraction;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([0-9,]+\.?\d*)").expect("valid price regex"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Code\s*[:#]?\s*(\d+)").expect("valid code regex"));
static EXPIRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Exp\.?\s*(\d{1,2}/\d{1,2}/\d{2,4})").expect("valid expiration regex")
});

static ARTICLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article").expect("valid article selector"));
static H2_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("valid h2 selector"));
static H3_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("valid h3 selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid img selector"));

/// What a single `article` node turned out to be.
#[derive(Debug)]
pub(crate) enum ArticleOutcome {
    NotACoupon,
    Malformed,
    Coupon(Coupon),
}

/// Extracts every coupon on a listing page, in document order.
///
/// Links are resolved against `base_url`. Skipped nodes are counted in the
/// returned [`PageExtraction`] but never reported as errors.
#[must_use]
pub fn extract_coupons(document: &Html, base_url: &str) -> PageExtraction {
    let mut extraction = PageExtraction::default();

    for article in document.select(&ARTICLE_SELECTOR) {
        extraction.articles += 1;
        match classify_article(article, base_url) {
            ArticleOutcome::NotACoupon => extraction.non_coupon += 1,
            ArticleOutcome::Malformed => extraction.malformed += 1,
            ArticleOutcome::Coupon(coupon) => extraction.coupons.push(coupon),
        }
    }

    extraction
}

pub(crate) fn classify_article(article: ElementRef<'_>, base_url: &str) -> ArticleOutcome {
    let text = element_text(article);
    if !looks_like_coupon(&text) {
        return ArticleOutcome::NotACoupon;
    }
    parse_article(article, base_url).map_or(ArticleOutcome::Malformed, ArticleOutcome::Coupon)
}

/// Builds a coupon from an article node, or `None` if any field is missing.
///
/// Does not apply the [`looks_like_coupon`] gate; [`extract_coupons`] does.
#[must_use]
pub fn parse_article(article: ElementRef<'_>, base_url: &str) -> Option<Coupon> {
    let (name, url) = extract_name_and_url(article, base_url)?;

    let text = element_text(article);
    let code = extract_code(&text)?;
    let expiration = extract_expiration(&text)?;
    let price = extract_price(&text)?;
    let image_url = extract_image_url(article)?;

    Coupon::new(&name, price, &code, &expiration, &image_url, &url).ok()
}

/// Cheap gate: coupon articles always print both `Code` and `Exp`.
///
/// Case-sensitive, unlike the field rules.
#[must_use]
pub fn looks_like_coupon(text: &str) -> bool {
    text.contains("Code") && text.contains("Exp")
}

/// Product name and absolute detail URL from the article's heading link.
///
/// The heading is the first `h2`, else the first `h3`. The link is the first
/// anchor inside the heading, else the first anchor anywhere in the article.
/// Returns `None` without a heading or anchor, with an empty `href`, or when
/// the name is shorter than [`MIN_NAME_CHARS`].
#[must_use]
pub fn extract_name_and_url(article: ElementRef<'_>, base_url: &str) -> Option<(String, String)> {
    let heading = article
        .select(&H2_SELECTOR)
        .next()
        .or_else(|| article.select(&H3_SELECTOR).next())?;
    let link = heading
        .select(&ANCHOR_SELECTOR)
        .next()
        .or_else(|| article.select(&ANCHOR_SELECTOR).next())?;

    let name = collapse_whitespace(&element_text(link));
    if name.chars().count() < MIN_NAME_CHARS {
        return None;
    }

    let href = link.value().attr("href").map(str::trim).unwrap_or_default();
    if href.is_empty() {
        return None;
    }

    Some((name, resolve_url(href, base_url)))
}

/// First dollar amount in `text`, e.g. `$1,299.99` → `1299.99`.
///
/// Only the first match is considered. If it does not parse, or is zero, the
/// price is absent.
#[must_use]
pub fn extract_price(text: &str) -> Option<Decimal> {
    let raw = PRICE_RE.captures(text)?.get(1)?.as_str().replace(',', "");
    let price = Decimal::from_str(raw.trim_end_matches('.')).ok()?;
    (price > Decimal::ZERO).then_some(price)
}

/// Digits following `Code`, `Code:` or `Code #`, case-insensitive.
#[must_use]
pub fn extract_code(text: &str) -> Option<String> {
    CODE_RE
        .captures(text)?
        .get(1)
        .map(|m| m.as_str().to_owned())
}

/// Date following `Exp` or `Exp.`, case-insensitive, kept as printed.
#[must_use]
pub fn extract_expiration(text: &str) -> Option<String> {
    EXPIRATION_RE
        .captures(text)?
        .get(1)
        .map(|m| m.as_str().to_owned())
}

/// `src` of the first image, or its `data-src` for lazy-loaded images.
#[must_use]
pub fn extract_image_url(article: ElementRef<'_>) -> Option<String> {
    let img = article.select(&IMG_SELECTOR).next()?;
    let attr = |name: &str| {
        img.value()
            .attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };
    attr("src").or_else(|| attr("data-src")).map(str::to_owned)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
