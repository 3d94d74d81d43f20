//! Error types for the SDK.
//!
//! Every codec and model operation that can fail returns an [`Error`]. The
//! variants map one-to-one onto the failure modes of the wire formats:
//! integers that do not fit, malformed identifiers, unknown discriminants,
//! truncated or inconsistent buffers, unimplemented paths, and listener
//! frames of unknown shape.

use thiserror::Error;

use crate::crypto::keys::KeyError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the codec and model layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A value exceeds the declared bit width, or a byte buffer is wider
    /// than the integer it should decode into.
    #[error("integer overflow: {0}")]
    Overflow(String),

    /// Malformed address text or bytes, bad key length, bad checksum.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An enumerated value, network identifier or transaction type has no
    /// known mapping.
    #[error("unknown {kind}: {value}")]
    Lookup {
        /// What was being looked up (e.g. "network type").
        kind: &'static str,
        /// The offending value, formatted for humans.
        value: String,
    },

    /// A declared size does not match the bytes actually consumed, or the
    /// buffer ended early, or a DTO is missing a required key.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The operation exists on the wire but is not implemented here.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A listener frame matched none of the known message shapes.
    #[error("unrecognized listener message, keys are {keys:?}")]
    UnrecognizedMessage {
        /// The top-level keys of the offending message.
        keys: Vec<String>,
    },

    /// Key material could not be parsed or used.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// JSON text could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex text could not be decoded.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The listener transport failed or was closed underneath us.
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Shorthand for a [`Error::Lookup`] on an unknown transaction type.
    pub fn unknown_transaction_type(code: u16) -> Self {
        Error::Lookup {
            kind: "transaction type",
            value: format!("0x{code:04X} ({code})"),
        }
    }

    /// Shorthand for a truncated-buffer [`Error::MalformedPayload`].
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        Error::MalformedPayload(format!(
            "buffer truncated: needed {needed} bytes, {available} available"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_transaction_type_names_discriminant() {
        let err = Error::unknown_transaction_type(0x9999);
        assert!(matches!(err, Error::Lookup { .. }));
        assert!(err.to_string().contains("0x9999"));
    }

    #[test]
    fn unrecognized_message_lists_keys() {
        let err = Error::UnrecognizedMessage {
            keys: vec!["foo".to_string()],
        };
        assert!(err.to_string().contains("foo"));
    }
}
