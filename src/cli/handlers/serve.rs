//! `serve` subcommand.

use crate::config::Settings;
use crate::server::Server;

pub struct ServeCommandHandler {
    settings: Settings,
}

impl ServeCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Starts the server, or with `dry_run` only reports what it would do.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.report();
            return Ok(());
        }
        Server::new(self.settings).run().await
    }

    fn report(&self) {
        let s = &self.settings;
        println!("Configuration is valid");
        println!("  bind address:    {}", s.server.address());
        println!("  database pool:   {}..{} connections", s.database.min_connections, s.database.max_connections);
        println!("  auto migrate:    {}", s.database.auto_migrate);
        println!("  cache backend:   {:?}", s.cache.backend);
        println!("  mail backend:    {:?}", s.mail.backend);
        println!("  log level:       {}", s.logger.level);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dry_run_does_not_start_the_server() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(true).await.is_ok());
    }
}
