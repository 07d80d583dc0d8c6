//! Outgoing mail.
//!
//! Mail is delivered by an external relay; the application only knows the
//! `Mailer` trait and picks an implementation from the `[mail]` section.

mod http_mailer;
mod log_mailer;
mod mailer;

pub use http_mailer::HttpMailer;
pub use log_mailer::LogMailer;
pub use mailer::{MailMessage, Mailer};

use std::sync::Arc;

use crate::config::{MailBackend, MailConfig};
use crate::error::AppResult;

/// Builds the mailer selected by `config.backend`.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match config.backend {
        MailBackend::Log => Arc::new(LogMailer::new(config.from.clone())),
        MailBackend::Http => Arc::new(HttpMailer::new(config)?),
    };
    tracing::info!(mailer = mailer.name(), "Mailer initialized");
    Ok(mailer)
}
