//! The coupon record produced by a scrape pass.
//!
//! A [`Coupon`] can only be built through [`Coupon::new`], which rejects any
//! candidate with a missing field.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

/// Shortest accepted display name, counted in characters.
///
/// Heading links shorter than this are navigation noise ("More", "Shop")
/// rather than product names.
pub const MIN_NAME_CHARS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    #[error("coupon field `{field}` is empty")]
    Missing { field: &'static str },

    #[error("coupon name \"{name}\" is shorter than {MIN_NAME_CHARS} characters")]
    NameTooShort { name: String },

    #[error("coupon price {price} is not positive")]
    NonPositivePrice { price: Decimal },
}

/// A fully populated promotional offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    name: String,
    price: Decimal,
    code: String,
    expiration: String,
    image_url: String,
    url: String,
}

impl Coupon {
    /// Builds a coupon, validating every field.
    ///
    /// `name` is trimmed before the length check. All string fields must be
    /// non-empty after trimming and `price` must be strictly positive.
    ///
    /// # Errors
    ///
    /// - [`CouponError::Missing`] when any string field is blank.
    /// - [`CouponError::NameTooShort`] when the trimmed name has fewer than
    ///   [`MIN_NAME_CHARS`] characters.
    /// - [`CouponError::NonPositivePrice`] when `price <= 0`.
    pub fn new(
        name: &str,
        price: Decimal,
        code: &str,
        expiration: &str,
        image_url: &str,
        url: &str,
    ) -> Result<Self, CouponError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CouponError::Missing { field: "name" });
        }
        if name.chars().count() < MIN_NAME_CHARS {
            return Err(CouponError::NameTooShort {
                name: name.to_owned(),
            });
        }
        if price <= Decimal::ZERO {
            return Err(CouponError::NonPositivePrice { price });
        }

        Ok(Self {
            name: name.to_owned(),
            price,
            code: required("code", code)?,
            expiration: required("expiration", expiration)?,
            image_url: required("image_url", image_url)?,
            url: required("url", url)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Numeric coupon code as printed on the listing (e.g. `"12345"`).
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Expiration date exactly as printed, `M/D/YY` or `M/D/YYYY`.
    #[must_use]
    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Absolute URL of the product detail page.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CouponError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CouponError::Missing { field });
    }
    Ok(value.to_owned())
}

/// Renders a price with thousands separators and exactly two decimals.
///
/// `1299.99` becomes `"1,299.99"` and `49` becomes `"49.00"`. Values are
/// rounded half away from zero.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{rounded:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
#[path = "coupons_test.rs"]
mod tests;
