use std::path::PathBuf;

use thiserror::Error;

/// Failures while locating, reading or checking settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required configuration file {} is missing", path.display())]
    MissingFile { path: PathBuf },

    /// Both a config directory and a single config file were requested
    #[error("{dir_var} and {file_var} cannot both be set; use the directory for layered files or the file alone")]
    ConflictingSources {
        dir_var: &'static str,
        file_var: &'static str,
    },

    #[error("unknown environment '{0}', expected development, test, staging or production")]
    UnknownEnvironment(String),

    #[error("settings do not match the expected shape: {0}")]
    Deserialize(#[source] config::ConfigError),

    #[error("invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted settings key the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
