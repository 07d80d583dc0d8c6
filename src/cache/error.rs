use thiserror::Error;

/// Failures of the key/value cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend unreachable: {0}")]
    Connection(String),

    #[error("cache command failed: {0}")]
    Command(String),

    /// A stored value did not match the type it was read back as
    #[error("cached value under '{key}' is malformed")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
