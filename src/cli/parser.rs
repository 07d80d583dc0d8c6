//! Command-line definition.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::validation;

/// Storefront API server
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Storefront API server and schema migrations")]
#[command(long_about = "
Storefront serves the catalog, account, delivery and order API over HTTP
and manages its PostgreSQL schema.

EXAMPLES:
    storefront serve
    storefront serve --host 0.0.0.0 --port 8080
    storefront --config /etc/storefront/production.toml serve
    storefront --env production --quiet serve
    storefront serve --dry-run
    storefront migrate
    storefront migrate --dry-run
    storefront migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single TOML configuration file, replacing the layered config directory
    #[arg(short, long, value_name = "FILE", value_parser = validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment whose `{env}.toml` overlay is loaded
    #[arg(short, long, value_enum)]
    pub env: Option<CliEnvironment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default when no subcommand is given)
    Serve {
        /// Address to bind, overrides `server.host`
        #[arg(long, value_name = "ADDRESS", value_parser = validation::validate_host_address)]
        host: Option<String>,

        /// Port to listen on, overrides `server.port`
        #[arg(short, long, value_name = "PORT", value_parser = validation::validate_port)]
        port: Option<u16>,

        /// Log level for this run, takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, list or revert schema migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the last STEPS migrations
        #[arg(long, value_name = "STEPS", value_parser = validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliEnvironment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<CliEnvironment> for crate::config::Environment {
    fn from(env: CliEnvironment) -> Self {
        match env {
            CliEnvironment::Development => crate::config::Environment::Development,
            CliEnvironment::Test => crate::config::Environment::Test,
            CliEnvironment::Staging => crate::config::Environment::Staging,
            CliEnvironment::Production => crate::config::Environment::Production,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Command to run; a bare invocation serves.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: None,
            port: None,
            log_level: None,
            dry_run: false,
        })
    }

    /// Log level requested on the command line, if any.
    pub fn log_level_override(&self) -> Option<LogLevel> {
        if let Some(Commands::Serve {
            log_level: Some(level),
            ..
        }) = &self.command
        {
            return Some(*level);
        }
        if self.verbose {
            Some(LogLevel::Debug)
        } else if self.quiet {
            Some(LogLevel::Error)
        } else {
            None
        }
    }
}
