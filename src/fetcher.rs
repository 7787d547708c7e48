use crate::config::{self, RetryConfig};
use crate::error::FetchError;
use crate::models::{ContractInfo, OptionChain, Snapshot};
use crate::session::SessionManager;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;
use tracing::{debug, warn};

// -----------------------------------------------
// RESILIENT FETCHER
// -----------------------------------------------
/// Wraps a data GET with bounded retries, doubling backoff and a single
/// cookie-refresh on 401. A bootstrap failure aborts the whole fetch without
/// consuming backoff; everything else is retried up to the attempt budget.
pub struct Fetcher {
    client: Client,
    session: Arc<SessionManager>,
    base_url: String,
    retry: RetryConfig,
}

impl Fetcher {
    pub fn new(
        client: Client,
        session: Arc<SessionManager>,
        base_url: impl Into<String>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            client,
            session,
            base_url: base_url.into(),
            retry,
        }
    }

    /// Fetch the option chain for one symbol/expiry, or the final error once
    /// all attempts are spent. The poll loop treats any error as "no data
    /// this cycle".
    pub async fn fetch_snapshot(
        &self,
        symbol: &str,
        expiry: &str,
    ) -> Result<Snapshot, FetchError> {
        let url = config::option_chain_url(&self.base_url, symbol, expiry);
        let chain: OptionChain = self.fetch_json(&url).await?;
        Ok(Snapshot::new(chain))
    }

    /// Nearest (first) expiry from the contract-info endpoint, for when no
    /// expiry is configured.
    pub async fn fetch_nearest_expiry(&self, symbol: &str) -> Result<String, FetchError> {
        let url = config::contract_info_url(&self.base_url, symbol);
        let info: ContractInfo = self.fetch_json(&url).await?;
        info.expiry_dates
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse("No expiry dates in contract info".to_string()))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let result = RetryIf::spawn(
            self.backoff(),
            || self.attempt(url),
            |err: &FetchError| {
                let retry = err.is_retryable();
                if retry {
                    warn!(error = %err, "fetch attempt failed, backing off");
                }
                retry
            },
        )
        .await;

        if let Err(err) = &result {
            warn!(url, error = %err, "fetch gave up");
        }
        result
    }

    /// One attempt per the session contract: ensure cookies, GET, refresh
    /// once on 401 and re-GET, parse on 200.
    async fn attempt<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        if !self.session.has_cookies().await {
            self.session.bootstrap().await?;
        }

        let mut response = self.send(url).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("session expired, refreshing cookies");
            self.session.bootstrap().await?;
            response = self.send(url).await?;
            if response.status() != StatusCode::OK {
                return Err(FetchError::Unauthorized(response.status()));
            }
        } else if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send(&self, url: &str) -> Result<Response, reqwest::Error> {
        let mut request = self
            .client
            .get(url)
            .header(header::REFERER, config::landing_url(&self.base_url))
            .header("X-Requested-With", config::HEADER_X_REQUESTED_WITH);

        if let Some(cookie) = self.session.cookie_header().await {
            request = request.header(header::COOKIE, cookie);
        }

        request.send().await
    }

    /// Doubling delays: base, 2x, 4x, ... with one delay fewer than the
    /// attempt budget.
    fn backoff(&self) -> impl Iterator<Item = Duration> {
        let base_ms = (self.retry.base_delay.as_millis() as u64).max(2);
        ExponentialBackoff::from_millis(2)
            .factor(base_ms / 2)
            .take(self.retry.max_attempts.saturating_sub(1))
    }
}
