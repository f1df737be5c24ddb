//! Error types for port operations.

/// Key-value storage errors with the key involved for actionable messages.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem or device failure.
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Payload could not be encoded or decoded.
    #[error("Serialization error on key '{key}': {message}")]
    Serialization { key: String, message: String },

    /// Anything else the backend reports (poisoned locks, invalid keys).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    pub fn serialization(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Serialization {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn backend(message: impl ToString) -> Self {
        Self::Backend(message.to_string())
    }
}
