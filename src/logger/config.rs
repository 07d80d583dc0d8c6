//! Runtime logger configuration, built from the `[logger]` settings section.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

use crate::logger::error::LoggerError;

/// Dependencies that stay at `warn` unless the configured level is `trace`.
const QUIET_DEPENDENCIES: &[&str] = &["hyper", "h2", "rustls", "reqwest", "bb8"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    pub level: String,
}

impl LoggerConfig {
    pub fn new(console: ConsoleConfig, file: FileConfig, level: String) -> Result<Self, LoggerError> {
        let config = Self {
            console,
            file,
            level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::NoOutput);
        }
        Ok(())
    }

    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LoggerError::UnknownLevel(self.level.clone())),
        }
    }

    /// `EnvFilter` directive for the configured level.
    ///
    /// Connection-level chatter from the HTTP, TLS and pool crates is capped
    /// at `warn` so `debug` stays readable.
    pub fn filter_directive(&self) -> Result<String, LoggerError> {
        let level = self.parse_level()?;
        let mut directive = level.as_str().to_lowercase();
        if level > Level::WARN && level != Level::TRACE {
            for dependency in QUIET_DEPENDENCIES {
                directive.push_str(&format!(",{}=warn", dependency));
            }
        }
        Ok(directive)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Colour is applied only when stdout is a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    /// Keep earlier content instead of truncating on start
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    pub fn new(enabled: bool, path: PathBuf, append: bool, format: LogFormat) -> Result<Self, LoggerError> {
        let config = Self {
            enabled,
            path,
            append,
            format,
        };
        config.validate()?;
        Ok(config)
    }

    /// The writer creates missing directories, so only the path is checked.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.enabled && self.path.as_os_str().is_empty() {
            return Err(LoggerError::MissingFilePath);
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/storefront.log"),
            append: true,
            format: LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: &str) -> LoggerConfig {
        LoggerConfig {
            level: level.to_string(),
            ..LoggerConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(
            with_level("verbose").validate(),
            Err(LoggerError::UnknownLevel(level)) if level == "verbose"
        ));
    }

    #[test]
    fn requires_at_least_one_output() {
        let result = LoggerConfig::new(
            ConsoleConfig::new(false, false),
            FileConfig::default(),
            "info".to_string(),
        );
        assert!(matches!(result, Err(LoggerError::NoOutput)));
    }

    #[test]
    fn enabled_file_needs_a_path() {
        assert!(matches!(
            FileConfig::new(true, PathBuf::new(), true, LogFormat::Full),
            Err(LoggerError::MissingFilePath)
        ));
        assert!(FileConfig::new(false, PathBuf::new(), true, LogFormat::Full).is_ok());
    }

    #[test]
    fn debug_filter_quiets_connection_crates() {
        let directive = with_level("DEBUG").filter_directive().unwrap();
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("hyper=warn"));
        assert!(directive.contains("bb8=warn"));

        assert_eq!(with_level("trace").filter_directive().unwrap(), "trace");
        assert_eq!(with_level("warn").filter_directive().unwrap(), "warn");
    }

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!(matches!("xml".parse::<LogFormat>(), Err(LoggerError::UnknownFormat(_))));
        assert_eq!(LogFormat::Full.as_str(), "full");
    }
}
