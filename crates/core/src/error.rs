//! Error types for the codec layer
//!
//! Two enums cover everything the layer reports:
//! - `StoreError`: failures raised by a key-value store implementation
//! - `CodecError`: encode/decode failures, plus store failures passed through
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

use crate::record::RecordKind;

/// Result type alias for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a key-value store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or is shut down
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store refused a write
    #[error("Write rejected for key {key}: {reason}")]
    Rejected {
        /// Key being written
        key: String,
        /// Reason given by the store
        reason: String,
    },

    /// A key expected to hold a value was absent
    #[error("Key not found: {0}")]
    Missing(String),
}

/// Errors raised while encoding or decoding records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No field codec is registered for the record kind
    #[error("Unsupported type: no field codec registered for {0}")]
    UnsupportedType(RecordKind),

    /// Text or bytes do not form a valid instance of the requested shape
    ///
    /// Covers truncated, corrupt, and structurally invalid payloads.
    #[error("Malformed encoding (codec={codec}): {detail}")]
    MalformedEncoding {
        /// Codec that rejected the payload
        codec: &'static str,
        /// Human-readable error description
        detail: String,
    },

    /// The payload's embedded type differs from the requested type
    #[error("Type mismatch: expected {expected}, payload holds {actual}")]
    TypeMismatch {
        /// Kind the caller asked for
        expected: RecordKind,
        /// Kind carried by the payload
        actual: RecordKind,
    },

    /// Store failure, carried unmodified
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

impl CodecError {
    /// Create a malformed-encoding error
    pub fn malformed(codec: &'static str, detail: impl Into<String>) -> Self {
        CodecError::MalformedEncoding {
            codec,
            detail: detail.into(),
        }
    }

    /// True for `MalformedEncoding`
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MalformedEncoding { .. })
    }
}
