//! Markdown context text for the coupon assistant.

use hfcoupons_core::{format_price, Coupon};

const ASSISTANT_INSTRUCTIONS: &str = "You are a helpful Harbor Freight coupon assistant. You have access to the current Harbor Freight coupons and can help users find deals.

When answering questions:
- Always include the coupon code, price, and expiration date when recommending items
- If multiple items match a query, list the top options
- Be concise but helpful
- If no coupons match what the user is looking for, say so honestly";

/// Serializes coupons into one markdown block, in input order.
///
/// ```text
/// # Harbor Freight Coupons (2 deals)
///
/// ## Cordless Drill
/// - Price: $1,299.99
/// - Code: 12345
/// - Expires: 12/31/25
///
/// ## ...
/// ```
///
/// No filtering, reordering or deduplication happens here.
#[must_use]
pub fn to_llm_context(coupons: &[Coupon]) -> String {
    let mut lines = Vec::with_capacity(1 + coupons.len() * 5);
    lines.push(format!("# Harbor Freight Coupons ({} deals)\n", coupons.len()));

    for coupon in coupons {
        lines.push(format!("## {}", coupon.name()));
        lines.push(format!("- Price: ${}", format_price(coupon.price())));
        lines.push(format!("- Code: {}", coupon.code()));
        lines.push(format!("- Expires: {}", coupon.expiration()));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// System prompt for the chat layer: fixed instructions, then the context.
#[must_use]
pub fn system_prompt(coupon_context: &str) -> String {
    format!("{ASSISTANT_INSTRUCTIONS}\n\n{coupon_context}")
}
