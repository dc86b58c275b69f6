use std::time::Duration;

pub const DEFAULT_STRIDE_API_URL: &str = "https://stridegpt-api-production.up.railway.app";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const USER_AGENT: &str = "STRIDE-GPT-Action/1.0";

/// Literal mention that triggers comment-mode runs.
pub const TRIGGER_MENTION: &str = "@stride-gpt";

pub const ANALYZE_TIMEOUT_SECS: u64 = 180;
pub const USAGE_TIMEOUT_SECS: u64 = 10;
pub const HEALTH_TIMEOUT_SECS: u64 = 5;

// Analysis submission is the only retried call
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
pub const RETRY_BASE_DELAY_SECS: u64 = 4;
pub const RETRY_MAX_DELAY_SECS: u64 = 10;

// Free tier limits
pub const FREE_TIER_ANALYSES_PER_MONTH: u32 = 50;
pub const FREE_TIER_MAX_THREATS: u32 = 5;

pub const PRICING_URL: &str = "https://stridegpt.ai/pricing";
pub const DOCS_URL: &str = "https://stridegpt.ai/docs";
pub const SUPPORT_URL: &str = "https://stridegpt.ai/support";

pub fn analyze_timeout() -> Duration {
    Duration::from_secs(ANALYZE_TIMEOUT_SECS)
}

pub fn usage_timeout() -> Duration {
    Duration::from_secs(USAGE_TIMEOUT_SECS)
}

pub fn health_timeout() -> Duration {
    Duration::from_secs(HEALTH_TIMEOUT_SECS)
}
