//! Domain-level error taxonomy for recshare.

/// Recshare domain errors.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("confirmation failed: {0}")]
    Confirmation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShareError {
    /// Shorthand for [`ShareError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for recshare domain operations.
pub type Result<T> = std::result::Result<T, ShareError>;
