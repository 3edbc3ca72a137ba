//! # argcodec-abi
//!
//! Encodes and decodes whole contract argument lists. Argument types and
//! values are alloy's [`DynSolType`] and [`DynSolValue`]; fragments are read as
//! alloy JSON ABI parameters.
//!
//! ## Layout
//! - Every top-level argument gets one 32-byte head slot, except static arrays
//!   and static tuples, which are flattened inline into the head.
//! - Dynamic arguments (`bytes`, `string`, `T[]`, and composites containing
//!   them) store an absolute offset in their head slot; their payloads follow
//!   the head in argument order.
//! - Indexed (event topic) arguments are skipped by every decode path.
//!
//! ## Decoding into Rust values
//! [`Arguments::unpack`] assembles decoded values into an explicit
//! [`Destination`]: a struct ([`AbiStruct`]), positional slots, a name-keyed
//! map, or a single value. Struct field lookup goes through a pluggable
//! [`FieldResolver`].

pub mod argument;
pub mod assign;
pub mod config;
pub mod destination;
pub mod error;
pub mod naming;
pub mod pack;
pub mod resolve;
pub mod selector;
pub mod unpack;

pub use argcodec_core::{DynSolType, DynSolValue};
pub use argument::{Argument, ArgumentMarshaling, Arguments};
pub use assign::AbiAssign;
pub use config::{FieldNaming, TupleDispatch, UnpackConfig, UnpackOptions};
pub use destination::{AbiStruct, Destination, OrderedSlots, ValueMap};
pub use error::{AbiError, AssignError};
pub use naming::{capitalise, to_camel_case};
pub use resolve::{ExactResolver, FieldResolver, NormalizedResolver};
pub use selector::{event_topic, function_selector, keccak256};
pub use unpack::get_array_size;
