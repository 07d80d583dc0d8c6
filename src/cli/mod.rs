//! Command-line interface: argument parsing, configuration overrides and
//! subcommand dispatch.

mod executor;
mod handlers;
mod parser;
mod validation;

pub use executor::execute_command;
pub use handlers::{MigrateCommandHandler, ServeCommandHandler};
pub use parser::{Cli, CliEnvironment, Commands, LogLevel};

use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Loads settings and applies command-line overrides.
///
/// Precedence, lowest first: configuration files, `STOREFRONT_*`
/// environment variables, command-line flags.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut loader = ConfigLoader::new()?;
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path.clone());
    }
    if let Some(env) = cli.env {
        loader = loader.with_environment(env.into());
    }

    let mut settings = loader.load()?;
    apply_overrides(cli, &mut settings);
    settings.validate()?;
    Ok(settings)
}

fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(Commands::Serve { host, port, .. }) = &cli.command {
        if let Some(host) = host {
            settings.server.host = host.clone();
        }
        if let Some(port) = port {
            settings.server.port = *port;
        }
    }
    if let Some(level) = cli.log_level_override() {
        settings.logger.level = level.as_str().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn serve_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--verbose",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9100",
        ])
        .unwrap();
        let mut settings = Settings::default();
        apply_overrides(&cli, &mut settings);

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn migrate_leaves_server_untouched() {
        let cli = Cli::try_parse_from(["storefront", "migrate"]).unwrap();
        let mut settings = Settings::default();
        let before = settings.clone();
        apply_overrides(&cli, &mut settings);
        assert_eq!(settings, before);
    }
}
