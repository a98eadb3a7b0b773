use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::domain::errors::DomainError;
use crate::domain::ports::ReportNotifier;

const TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Posts report text to a Telegram chat through the Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_api_base(TELEGRAM_API, token, chat_id)
    }

    pub fn with_api_base(
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl ReportNotifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.send_url())
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| DomainError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Telegram rejected message ({status}): {body}");
            return Err(DomainError::Delivery(format!("telegram returned {status}")));
        }
        Ok(())
    }
}

/// Writes reports to the log when no chat channel is configured.
pub struct LogNotifier;

#[async_trait]
impl ReportNotifier for LogNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DomainError> {
        log::info!("Report delivery (no channel configured):\n{text}");
        Ok(())
    }
}
