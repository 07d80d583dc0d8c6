use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while checking logger settings or installing the subscriber
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log level '{0}', expected trace, debug, info, warn or error")]
    UnknownLevel(String),

    #[error("unknown log format '{0}', expected full, compact or json")]
    UnknownFormat(String),

    #[error("at least one log output (console or file) must be enabled")]
    NoOutput,

    #[error("file logging is enabled but no path is set")]
    MissingFilePath,

    #[error("cannot open log file {}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("global subscriber already installed: {0}")]
    Install(String),
}
