use anyhow::{Context, Result};
use std::time::Duration;

// -----------------------------------------------
// NSE ENDPOINTS
// -----------------------------------------------
pub const NSE_BASE_URL: &str = "https://www.nseindia.com";

/// Human-facing option chain page; fetching it yields the session cookies.
pub fn landing_url(base: &str) -> String {
    format!("{}/option-chain", base)
}

pub fn option_chain_url(base: &str, symbol: &str, expiry: &str) -> String {
    format!(
        "{}/api/option-chain-v3?type=Indices&symbol={}&expiry={}",
        base,
        urlencoding::encode(symbol),
        urlencoding::encode(expiry)
    )
}

pub fn contract_info_url(base: &str, symbol: &str) -> String {
    format!(
        "{}/api/option-chain-contract-info?symbol={}",
        base,
        urlencoding::encode(symbol)
    )
}

// -----------------------------------------------
// TELEGRAM
// -----------------------------------------------
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/129.0.0.0 Safari/537.36";

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_HTML: &str = "text/html";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const CONNECTION_KEEP_ALIVE: &str = "keep-alive";
pub const HEADER_X_REQUESTED_WITH: &str = "XMLHttpRequest";

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

// -----------------------------------------------
// RETRY CONFIG
// -----------------------------------------------
pub const RETRY_MAX_ATTEMPTS: usize = 3;
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Attempt budget and backoff base for one logical fetch. Delays double
/// between attempts: base, 2x base, 4x base, ...
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            base_delay: RETRY_BASE_DELAY,
        }
    }
}

// -----------------------------------------------
// POLL LOOP
// -----------------------------------------------
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_SYMBOL: &str = "NIFTY";

// -----------------------------------------------
// RUNTIME CONFIGURATION (environment)
// -----------------------------------------------
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub symbol: String,
    /// Expiry as the provider spells it ("03-Jul-2025"). When unset the
    /// nearest expiry from the contract-info endpoint is used.
    pub expiry: Option<String>,
    pub poll_interval: Duration,
    pub telegram_token: String,
    pub telegram_chat_id: i64,
    pub retry: RetryConfig,
}

impl MonitorConfig {
    /// Build configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let symbol =
            std::env::var("NSE_SYMBOL").unwrap_or_else(|_| DEFAULT_SYMBOL.to_string());

        let expiry = std::env::var("NSE_EXPIRY").ok().filter(|s| !s.is_empty());

        let poll_interval = std::env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let telegram_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is not set")?;

        let telegram_chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID is not set")?
            .parse::<i64>()
            .context("TELEGRAM_CHAT_ID must be an integer chat id")?;

        Ok(Self {
            symbol,
            expiry,
            poll_interval,
            telegram_token,
            telegram_chat_id,
            retry: RetryConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_chain_url_encodes_expiry() {
        let url = option_chain_url(NSE_BASE_URL, "NIFTY", "03-Jul-2025");
        assert_eq!(
            url,
            "https://www.nseindia.com/api/option-chain-v3?type=Indices&symbol=NIFTY&expiry=03-Jul-2025"
        );
    }

    #[test]
    fn test_contract_info_url_encodes_symbol() {
        let url = contract_info_url(NSE_BASE_URL, "M&M");
        assert_eq!(
            url,
            "https://www.nseindia.com/api/option-chain-contract-info?symbol=M%26M"
        );
    }

    #[test]
    fn test_retry_defaults() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.base_delay, Duration::from_secs(1));
    }
}
