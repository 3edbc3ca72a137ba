//! # argcodec-core
//!
//! The per-value layer every other argcodec crate is built on. Types and
//! values are alloy's [`DynSolType`] / [`DynSolValue`]; this crate adds what an
//! argument-list codec needs on top of them:
//!
//! - head sizes with overflow-checked arithmetic and a size cap,
//! - value/type shape checks and integer range checks before encoding,
//! - decoding a single value at a head-slot offset of a larger buffer,
//! - the embedded-address walk,
//! - type-directed JSON conversion.
//!
//! Argument-list layout (head/tail offsets, virtual arguments, destination
//! assembly) lives in `argcodec-abi`.

pub mod codec;
pub mod error;
pub mod json;

pub use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
pub use alloy_json_abi::{EventParam, Param};
pub use codec::{decode_at, encode_value, get_all_address, head_words, value_kind, WORD};
pub use error::{CodecError, SchemaError};
