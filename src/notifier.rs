use crate::config;
use crate::error::NotifyError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Outbound message boundary. The poll loop only ever sees this trait; the
/// concrete transport and destination are wiring concerns.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Telegram Bot API adapter: one `sendMessage` call per cycle.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
    chat_id: i64,
}

impl TelegramNotifier {
    pub fn new(client: Client, token: impl Into<String>, chat_id: i64) -> Self {
        Self::with_api_base(client, config::TELEGRAM_API_BASE, token, chat_id)
    }

    pub fn with_api_base(
        client: Client,
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: i64,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            token: token.into(),
            chat_id,
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }
        debug!(chat_id = self.chat_id, "notification delivered");
        Ok(())
    }
}
