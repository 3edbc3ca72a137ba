//! Error types for argument-list encoding, decoding and destination assembly.

use argcodec_core::{value_kind, CodecError, DynSolValue, SchemaError};
use thiserror::Error;

/// Errors from the argument-list layer.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Assign(#[from] AssignError),

    #[error("argument count mismatch: {got} for {want}")]
    ArgumentCount { got: usize, want: usize },

    #[error("insufficient number of arguments for unpack, want {want}, got {got}")]
    InsufficientSlots { want: usize, got: usize },

    #[error("no values unmarshalled into {destination}")]
    NoValues { destination: &'static str },

    #[error("cannot unpack into a nil map")]
    NilMap,

    #[error("cannot unmarshal tuple into {destination}")]
    UnsupportedDestination { destination: &'static str },

    #[error("field {name} can't be found in the given value")]
    UnresolvedField { name: String },

    #[error("ambiguous field: argument {name} matches both {first} and {second}")]
    AmbiguousField {
        name: String,
        first: String,
        second: String,
    },

    #[error("multiple arguments map to the same field {field}")]
    DuplicateField { field: String },

    #[error("argument list head size overflows usize")]
    HeadTooLarge,

    #[error("too many embedded addresses for a u16 count: {count}")]
    TooManyAddresses { count: usize },
}

/// Errors assigning a decoded value into a destination location.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignError {
    #[error("cannot assign {got} value to {target}")]
    Incompatible { target: &'static str, got: &'static str },

    #[error("value {value} does not fit in {target}")]
    Overflow { target: &'static str, value: String },

    #[error("length mismatch assigning into {target}: expected {expected}, got {got}")]
    Length {
        target: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{path}: {source}")]
    At {
        path: String,
        #[source]
        source: Box<AssignError>,
    },
}

impl AssignError {
    pub fn incompatible(target: &'static str, value: &DynSolValue) -> Self {
        AssignError::Incompatible {
            target,
            got: value_kind(value),
        }
    }

    /// Attach a field name or element index to a nested failure.
    pub fn at(path: impl ToString, source: AssignError) -> Self {
        AssignError::At {
            path: path.to_string(),
            source: Box::new(source),
        }
    }
}
