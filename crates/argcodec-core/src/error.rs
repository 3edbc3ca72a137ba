//! Error types for type resolution and the per-value codec.

use thiserror::Error;

/// Errors raised while turning an ABI fragment into a [`DynSolType`](crate::DynSolType).
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid type '{ty}': {reason}")]
    InvalidType { ty: String, reason: String },

    #[error("argument json err: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn invalid(ty: &str, reason: impl ToString) -> Self {
        SchemaError::InvalidType {
            ty: ty.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised by the per-value codec while packing or decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("value {value} overflows {ty}")]
    Overflow { ty: String, value: String },

    #[error("length mismatch for {ty}: expected {expected}, got {got}")]
    LengthMismatch {
        ty: String,
        expected: usize,
        got: usize,
    },

    #[error("read out of bounds: need {need} bytes at offset {offset}, have {len}")]
    OutOfBounds {
        offset: usize,
        need: usize,
        len: usize,
    },

    #[error("offset word {word} does not fit in usize")]
    InvalidOffset { word: String },

    #[error("type {ty} is too large: more than {max} head words")]
    TooLarge { ty: String, max: usize },

    #[error("could not decode {ty}: {reason}")]
    Decode { ty: String, reason: String },

    #[error("invalid {what} '{input}': {reason}")]
    Parse {
        what: &'static str,
        input: String,
        reason: String,
    },
}

impl CodecError {
    pub(crate) fn mismatch(expected: impl ToString, got: impl ToString) -> Self {
        CodecError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
