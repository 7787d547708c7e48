use crate::config;
use crate::error::SessionError;
use anyhow::{Context, Result};
use reqwest::{header, Client};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

// -----------------------------------------------
// SESSION MANAGER: COOKIE OWNERSHIP
// -----------------------------------------------
/// Sole owner of the provider session cookies. The fetcher never touches the
/// map directly; it asks for a rendered `Cookie` header and triggers
/// `bootstrap` on 401. The lock serializes refreshes if pollers ever run in
/// parallel.
pub struct SessionManager {
    client: Client,
    base_url: String,
    cookies: RwLock<HashMap<String, String>>,
}

impl SessionManager {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cookies: RwLock::new(HashMap::new()),
        }
    }

    pub async fn has_cookies(&self) -> bool {
        !self.cookies.read().await.is_empty()
    }

    /// Fetch the landing page and replace the cookie map wholesale with
    /// whatever the response sets. No retries here; the caller decides.
    pub async fn bootstrap(&self) -> Result<(), SessionError> {
        let response = self
            .client
            .get(config::landing_url(&self.base_url))
            .header(header::ACCEPT, config::ACCEPT_HTML)
            .send()
            .await?;

        let fresh: HashMap<String, String> = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();

        if fresh.is_empty() {
            return Err(SessionError::NoCookies);
        }

        debug!(count = fresh.len(), "session cookies refreshed");
        *self.cookies.write().await = fresh;
        Ok(())
    }

    /// Current cookies rendered as a `Cookie` header value, or `None` when
    /// no bootstrap has succeeded yet.
    pub async fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.read().await;
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub async fn clear(&self) {
        self.cookies.write().await.clear();
    }
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
/// Shared client with the browser header set the provider expects. The gzip
/// feature supplies Accept-Encoding; cookies stay out of the jar and in the
/// session manager.
pub fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(config::ACCEPT_JSON),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(config::ACCEPT_LANGUAGE),
    );
    headers.insert(
        header::CONNECTION,
        header::HeaderValue::from_static(config::CONNECTION_KEEP_ALIVE),
    );

    Client::builder()
        .default_headers(headers)
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}
