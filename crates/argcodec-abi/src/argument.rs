//! Argument descriptors and argument lists.
//!
//! Fragments are read as alloy [`EventParam`]s and resolved into a
//! [`DynSolType`] once, when the argument is built.

use alloy_dyn_abi::{DynSolType, Specifier};
use alloy_json_abi::{EventParam, InternalType, Param};
use argcodec_core::{head_words, SchemaError};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One entry of a contract ABI `inputs` / `outputs` array, as it appears in JSON.
pub type ArgumentMarshaling = EventParam;

/// A named, typed argument slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventParam", into = "EventParam")]
pub struct Argument {
    /// May be empty for unnamed (positional) arguments
    pub name: String,
    pub ty: DynSolType,
    /// Only events have indexed arguments; they travel in topics, not the body
    pub indexed: bool,
    /// Tuple component fragments; the source of struct field names
    pub components: Vec<Param>,
    pub internal_type: Option<InternalType>,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: DynSolType) -> Self {
        Self {
            name: name.into(),
            ty,
            indexed: false,
            components: Vec::new(),
            internal_type: None,
        }
    }

    pub fn indexed(name: impl Into<String>, ty: DynSolType) -> Self {
        Self {
            indexed: true,
            ..Self::new(name, ty)
        }
    }

    /// Names of the tuple components, in order; empty when the fragment had none.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|p| p.name.as_str()).collect()
    }
}

impl TryFrom<EventParam> for Argument {
    type Error = SchemaError;

    fn try_from(param: EventParam) -> Result<Self, Self::Error> {
        let ty: DynSolType = param
            .resolve()
            .map_err(|e| SchemaError::invalid(&param.ty, e))?;
        head_words(&ty).map_err(|e| SchemaError::invalid(&param.ty, e))?;
        Ok(Self {
            name: param.name,
            ty,
            indexed: param.indexed,
            components: param.components,
            internal_type: param.internal_type,
        })
    }
}

impl From<Argument> for EventParam {
    fn from(arg: Argument) -> Self {
        let ty = if arg.components.is_empty() {
            arg.ty.to_string()
        } else {
            fragment_type(&arg.ty)
        };
        EventParam {
            ty,
            name: arg.name,
            indexed: arg.indexed,
            components: arg.components,
            internal_type: arg.internal_type,
        }
    }
}

/// The fragment `type` string of a tuple-based type, e.g. `tuple[2][]`.
fn fragment_type(ty: &DynSolType) -> String {
    match ty {
        DynSolType::Tuple(_) => "tuple".to_string(),
        DynSolType::Array(elem) => format!("{}[]", fragment_type(elem)),
        DynSolType::FixedArray(elem, size) => format!("{}[{size}]", fragment_type(elem)),
        other => other.to_string(),
    }
}

/// An ordered argument list; order is wire order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    pub fn new(args: Vec<Argument>) -> Self {
        Self(args)
    }

    /// Parse a JSON array of argument fragments (an ABI `inputs` / `outputs` array).
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of arguments not flagged `indexed`.
    pub fn len_non_indexed(&self) -> usize {
        self.0.iter().filter(|arg| !arg.indexed).count()
    }

    /// Arguments not flagged `indexed`, in order.
    pub fn non_indexed(&self) -> impl Iterator<Item = &Argument> {
        self.0.iter().filter(|arg| !arg.indexed)
    }

    /// A copy of this list with indexed arguments removed.
    pub fn without_indexed(&self) -> Self {
        self.non_indexed().cloned().collect()
    }

    /// True for multi-argument lists; decided on the full list, indexed arguments included.
    pub fn is_tuple(&self) -> bool {
        self.0.len() > 1
    }

    /// Canonical parameter list, e.g. `(address,uint256[])`.
    pub fn signature(&self) -> String {
        let types: Vec<_> = self.0.iter().map(|arg| arg.ty.sol_type_name()).collect();
        format!("({})", types.join(","))
    }
}

impl Deref for Arguments {
    type Target = [Argument];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Argument>> for Arguments {
    fn from(args: Vec<Argument>) -> Self {
        Self(args)
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_EVENT: &str = r#"[
        {"name": "from",  "type": "address", "indexed": true},
        {"name": "to",    "type": "address", "indexed": true},
        {"name": "value", "type": "uint256", "indexed": false}
    ]"#;

    #[test]
    fn parses_event_inputs() {
        let args = Arguments::from_json(TRANSFER_EVENT).unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args.len_non_indexed(), 1);
        assert!(args.is_tuple());
        let names: Vec<_> = args.non_indexed().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["value"]);
        assert_eq!(args.signature(), "(address,address,uint256)");
    }

    #[test]
    fn bad_type_is_schema_error() {
        let err = Arguments::from_json(r#"[{"name": "x", "type": "uint7"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
        assert!(err.to_string().contains("uint7"));
    }

    #[test]
    fn oversized_fixed_array_is_schema_error() {
        let err = Arguments::from_json(r#"[{"name": "x", "type": "uint256[1000000000000]"}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn serializes_back_to_fragments() {
        let args = Arguments::from_json(TRANSFER_EVENT).unwrap();
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json[0]["type"], "address");
        assert_eq!(json[0]["indexed"], true);
        assert_eq!(json[2]["name"], "value");
    }

    #[test]
    fn tuple_array_fragment_survives_reparse() {
        let json = r#"[{
            "name": "orders",
            "type": "tuple[2]",
            "internalType": "struct Book.Order[2]",
            "components": [
                {"name": "maker", "type": "address"},
                {"name": "sizes", "type": "uint64[]"}
            ]
        }]"#;
        let args = Arguments::from_json(json).unwrap();
        assert_eq!(args[0].component_names(), ["maker", "sizes"]);
        assert_eq!(args.signature(), "((address,uint64[])[2])");

        let back = serde_json::to_string(&args).unwrap();
        assert_eq!(Arguments::from_json(&back).unwrap(), args);
        let value: serde_json::Value = serde_json::from_str(&back).unwrap();
        assert_eq!(value[0]["type"], "tuple[2]");
    }

    #[test]
    fn without_indexed_keeps_order() {
        let args = Arguments::new(vec![
            Argument::new("a", DynSolType::Bool),
            Argument::indexed("b", DynSolType::Address),
            Argument::new("c", DynSolType::Bytes),
        ]);
        let body = args.without_indexed();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].name, "a");
        assert_eq!(body[1].name, "c");
        assert!(!args.without_indexed().iter().any(|a| a.indexed));
    }
}
