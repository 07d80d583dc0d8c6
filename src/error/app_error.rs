use crate::cache::CacheError;
use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// A single failed field from request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type.
///
/// Repositories only produce the two structured storage variants they can
/// recognise (`UniqueValue`, `IdNotFound`); every other storage failure is
/// wrapped in `Storage`. The HTTP layer maps variants to status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Shape, range or length violation in caller input
    #[error("{message}")]
    InvalidInput { message: String },

    /// Field-level failures reported by `validator`
    #[error("validation failed: {}", join_field_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// A required referent is absent
    #[error("{field}[{id}] not found")]
    IdNotFound { field: String, id: i64 },

    /// A unique constraint was violated
    #[error("{field} already exists")]
    UniqueValue { field: String },

    /// Update of a delivery that does not exist
    #[error("delivery not found")]
    DeliveryNotFound,

    #[error("{message}")]
    NotAuthenticated { message: String },

    #[error("{message}")]
    NotAuthorized { message: String },

    /// The caller has not verified their email yet
    #[error("user email is not verified")]
    UserNotCompleted,

    /// Unrecognised storage failure
    #[error("Storage operation failed: {operation}")]
    Storage {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to begin transaction")]
    TransactionBegin {
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to commit transaction")]
    TransactionCommit {
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    #[error("Cache error")]
    Cache {
        #[source]
        source: CacheError,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn id_not_found(field: impl Into<String>, id: impl Into<i64>) -> Self {
        AppError::IdNotFound {
            field: field.into(),
            id: id.into(),
        }
    }

    pub fn not_authenticated(message: impl Into<String>) -> Self {
        AppError::NotAuthenticated {
            message: message.into(),
        }
    }

    pub fn not_authorized(message: impl Into<String>) -> Self {
        AppError::NotAuthorized {
            message: message.into(),
        }
    }

    pub fn storage(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Storage {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// Returns the field name when this is an `IdNotFound` error.
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            AppError::IdNotFound { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

fn join_field_errors(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flattens nested `validator` errors into `path.to.field` entries.
fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidationFieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", error.code));
                    out.push(ValidationFieldError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect_field_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(error: diesel_async::pooled_connection::bb8::RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut collected = Vec::new();
        collect_field_errors("", &errors, &mut collected);
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: collected }
    }
}

impl From<CacheError> for AppError {
    fn from(error: CacheError) -> Self {
        AppError::Cache { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
