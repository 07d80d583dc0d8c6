use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;

/// A plain-text message to one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Email-verification message pointing at `link`.
    pub fn verification(to: impl Into<String>, link: &str) -> Self {
        Self {
            to: to.into(),
            subject: "Confirm your email".to_string(),
            body: format!("Follow this link to confirm your email address: {}", link),
        }
    }
}

/// Trait for mail transports
///
/// Must not be called while a database transaction is open.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> AppResult<()>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}
