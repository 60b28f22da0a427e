pub mod client;
pub mod context;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod types;

pub use client::CouponClient;
pub use context::{system_prompt, to_llm_context};
pub use error::ScraperError;
pub use extract::extract_coupons;
pub use pagination::{total_pages, DEFAULT_TOTAL_PAGES};
pub use types::{PageExtraction, ScrapeReport};
