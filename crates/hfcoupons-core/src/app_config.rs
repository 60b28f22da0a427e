/// Coupon site root used when `HFC_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://go.harborfreight.com";

/// Desktop Chrome `User-Agent`; the coupon site turns away obvious bot agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_page_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            log_level: "info".to_owned(),
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            inter_page_delay_ms: 50,
        }
    }
}
