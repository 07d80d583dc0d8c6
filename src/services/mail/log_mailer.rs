use async_trait::async_trait;

use super::mailer::{MailMessage, Mailer};
use crate::error::AppResult;

/// Writes messages to the log instead of sending them.
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Mail logged"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
