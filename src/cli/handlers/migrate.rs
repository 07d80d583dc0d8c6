//! `migrate` subcommand.

use crate::config::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};

pub struct MigrateCommandHandler {
    settings: Settings,
}

impl MigrateCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Lists (`dry_run`), reverts (`rollback`) or applies migrations.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> anyhow::Result<()> {
        let url = self.settings.database.url.as_str();

        if dry_run {
            let pending = pending_migrations(url).await?;
            if pending.is_empty() {
                println!("No pending migrations, the database is up to date");
            } else {
                println!("{} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            tracing::warn!(steps, "Reverting migrations");
            let reverted = revert_migrations(url, steps).await?;
            print_versions("Reverted", &reverted);
            return Ok(());
        }

        let applied = run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("No migrations to apply, the database is up to date");
        } else {
            tracing::info!(count = applied.len(), "Migrations applied");
            print_versions("Applied", &applied);
        }
        Ok(())
    }
}

fn print_versions(verb: &str, versions: &[String]) {
    println!("{} {} migration(s):", verb, versions.len());
    for version in versions {
        println!("  - {}", version);
    }
}
