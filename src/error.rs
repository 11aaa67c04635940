//! Error types for dragnet.

use thiserror::Error;

/// Errors surfaced by index construction, ingest, and query operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A hash failed the input acceptor (wrong length or non-hex character).
    #[error("invalid hash {hash:?}: expected {expected_len} characters of [0-9a-fA-F]")]
    InvalidHash { hash: String, expected_len: usize },

    /// Malformed hex passed to a conversion primitive.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),

    /// Invalid configuration or primitive parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two bit sequences of different lengths were compared.
    #[error("length mismatch: {left} vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },

    /// A query was issued before the index was trained.
    #[error("index is not trained: call train() before querying")]
    NotTrained,

    /// An update was attempted on a frozen index.
    #[error("index is already trained: updates are frozen")]
    AlreadyTrained,
}

impl IndexError {
    /// True for lifecycle violations (update after training, query before).
    #[must_use]
    pub fn is_state_violation(&self) -> bool {
        matches!(self, IndexError::NotTrained | IndexError::AlreadyTrained)
    }
}

/// Result type alias for dragnet operations.
pub type Result<T> = std::result::Result<T, IndexError>;
