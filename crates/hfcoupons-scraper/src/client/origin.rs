//! Base URL validation and relative link resolution for the coupon client.

use crate::error::ScraperError;

/// Validates a coupon site root and strips trailing slashes.
///
/// Given `"https://go.harborfreight.com/"`, returns
/// `"https://go.harborfreight.com"` so page URLs can be built by plain
/// concatenation.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] when `base_url` does not parse as
/// an absolute `http` or `https` URL.
pub fn normalize_base_url(base_url: &str) -> Result<String, ScraperError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
        });
    }

    Ok(trimmed.to_owned())
}

/// Makes a listing link absolute.
///
/// Hrefs that already carry a scheme are returned untouched. Anything else is
/// joined onto `base_url`; if the join fails the href is appended verbatim.
#[must_use]
pub fn resolve_url(href: &str, base_url: &str) -> String {
    if reqwest::Url::parse(href).is_ok() {
        return href.to_owned();
    }

    reqwest::Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map_or_else(
            |e| {
                tracing::debug!(href, base_url, error = %e, "could not join href onto base URL");
                format!("{base_url}{href}")
            },
            |url| url.to_string(),
        )
}
