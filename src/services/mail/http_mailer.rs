//! Mail relay reached over HTTP.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;

use super::mailer::{MailMessage, Mailer};
use crate::config::MailConfig;
use crate::error::{AppError, AppResult};

/// POSTs each message as JSON to the configured relay endpoint.
///
/// The API key, when set, is sent as a bearer token.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration {
                key: "mail".to_string(),
                source: anyhow::Error::from(e),
            })?;

        let api_key = Some(config.api_key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let start = Instant::now();

        let mut request = self.client.post(&self.endpoint).json(&json!({
            "from": self.from,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Mail relay request failed: {}", e),
            })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), duration_ms, body = %body, "Mail relay rejected message");
            return Err(AppError::Internal {
                source: anyhow::anyhow!("Mail relay responded with {}", status),
            });
        }

        tracing::debug!(status = status.as_u16(), duration_ms, to = %message.to, "Mail sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
