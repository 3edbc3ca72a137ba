//! Type-directed conversion between JSON and [`DynSolValue`].
//!
//! Used by the CLI to read `--values` and print decoded output. Integers
//! accept JSON numbers or decimal / `0x` strings; byte types take `0x` hex;
//! tuples take either a positional array or an object keyed by component name.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::Param;
use alloy_primitives::{Address, B256, I256, U256};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::{codec::value_kind, error::CodecError};

/// Read a JSON value as an instance of `ty`.
///
/// `components` names the fields of a tuple `ty` (or of the tuple inside an
/// array type); pass an empty slice when only positional input is expected.
pub fn from_json(
    ty: &DynSolType,
    components: &[Param],
    json: &Value,
) -> Result<DynSolValue, CodecError> {
    match ty {
        DynSolType::Uint(bits) => Ok(DynSolValue::Uint(json_u256(json)?, *bits)),
        DynSolType::Int(bits) => Ok(DynSolValue::Int(json_i256(json)?, *bits)),
        DynSolType::Bool => json
            .as_bool()
            .map(DynSolValue::Bool)
            .ok_or_else(|| CodecError::mismatch("bool", json)),
        DynSolType::Address => {
            let s = json_str(json, "address")?;
            let addr = Address::from_str(s).map_err(|e| parse_err("address", s, e))?;
            Ok(DynSolValue::Address(addr))
        }
        DynSolType::FixedBytes(n) => {
            let bytes = json_hex(json)?;
            if bytes.len() != *n {
                return Err(CodecError::LengthMismatch {
                    ty: ty.to_string(),
                    expected: *n,
                    got: bytes.len(),
                });
            }
            Ok(DynSolValue::FixedBytes(B256::right_padding_from(&bytes), *n))
        }
        DynSolType::Bytes => Ok(DynSolValue::Bytes(json_hex(json)?)),
        DynSolType::String => Ok(DynSolValue::String(json_str(json, "string")?.to_string())),
        DynSolType::Array(elem) => {
            let values = json_array(json)?
                .iter()
                .map(|v| from_json(elem, components, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::Array(values))
        }
        DynSolType::FixedArray(elem, size) => {
            let items = json_array(json)?;
            if items.len() != *size {
                return Err(CodecError::LengthMismatch {
                    ty: ty.to_string(),
                    expected: *size,
                    got: items.len(),
                });
            }
            let values = items
                .iter()
                .map(|v| from_json(elem, components, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DynSolValue::FixedArray(values))
        }
        DynSolType::Tuple(types) => tuple_from_json(ty, types, components, json),
        other => Err(CodecError::mismatch("supported type", other)),
    }
}

fn tuple_from_json(
    ty: &DynSolType,
    types: &[DynSolType],
    components: &[Param],
    json: &Value,
) -> Result<DynSolValue, CodecError> {
    let nested = |i: usize| components.get(i).map_or(&[][..], |p| p.components.as_slice());
    let values = match json {
        Value::Array(items) => {
            if items.len() != types.len() {
                return Err(CodecError::LengthMismatch {
                    ty: ty.to_string(),
                    expected: types.len(),
                    got: items.len(),
                });
            }
            types
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (t, v))| from_json(t, nested(i), v))
                .collect::<Result<Vec<_>, _>>()?
        }
        Value::Object(fields) if components.len() == types.len() => types
            .iter()
            .zip(components)
            .enumerate()
            .map(|(i, (t, p))| {
                let v = fields.get(&p.name).ok_or_else(|| {
                    CodecError::mismatch(format!("field '{}'", p.name), "missing")
                })?;
                from_json(t, nested(i), v)
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(CodecError::mismatch(ty, other)),
    };
    Ok(DynSolValue::Tuple(values))
}

/// Render as JSON. Integers become decimal strings so 256-bit values survive.
pub fn to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Uint(v, _) => Value::String(v.to_string()),
        DynSolValue::Int(v, _) => Value::String(v.to_string()),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Address(a) => Value::String(a.to_checksum(None)),
        DynSolValue::FixedBytes(word, n) => {
            Value::String(format!("0x{}", hex::encode(&word[..*n])))
        }
        DynSolValue::Bytes(b) => Value::String(format!("0x{}", hex::encode(b))),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Function(f) => Value::String(format!("0x{}", hex::encode(f.as_slice()))),
        DynSolValue::FixedArray(v) | DynSolValue::Array(v) | DynSolValue::Tuple(v) => {
            Value::Array(v.iter().map(to_json).collect())
        }
        #[allow(unreachable_patterns)]
        other => Value::String(value_kind(other).to_string()),
    }
}

/// Render tuples as JSON objects keyed by component name.
///
/// Unnamed components are keyed by their position.
pub fn to_json_named(value: &DynSolValue, components: &[Param]) -> Value {
    match value {
        DynSolValue::Tuple(values) if !components.is_empty() => {
            let mut map = Map::new();
            for (i, (p, v)) in components.iter().zip(values).enumerate() {
                let key = if p.name.is_empty() {
                    i.to_string()
                } else {
                    p.name.clone()
                };
                map.insert(key, to_json_named(v, &p.components));
            }
            Value::Object(map)
        }
        DynSolValue::FixedArray(values) | DynSolValue::Array(values) => Value::Array(
            values
                .iter()
                .map(|v| to_json_named(v, components))
                .collect(),
        ),
        _ => to_json(value),
    }
}

fn parse_err(what: &'static str, input: &str, e: impl std::fmt::Display) -> CodecError {
    CodecError::Parse {
        what,
        input: input.to_string(),
        reason: e.to_string(),
    }
}

fn json_str<'a>(json: &'a Value, what: &'static str) -> Result<&'a str, CodecError> {
    json.as_str().ok_or_else(|| CodecError::mismatch(what, json))
}

fn json_array(json: &Value) -> Result<&Vec<Value>, CodecError> {
    json.as_array().ok_or_else(|| CodecError::mismatch("array", json))
}

fn json_hex(json: &Value) -> Result<Vec<u8>, CodecError> {
    let s = json_str(json, "hex string")?;
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| parse_err("hex", s, e))
}

fn json_u256(json: &Value) -> Result<U256, CodecError> {
    match json {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| parse_err("uint", &n.to_string(), "not a non-negative integer")),
        Value::String(s) => U256::from_str(s).map_err(|e| parse_err("uint", s, e)),
        other => Err(CodecError::mismatch("uint", other)),
    }
}

fn json_i256(json: &Value) -> Result<I256, CodecError> {
    match json {
        Value::Number(n) => n
            .as_i64()
            .and_then(|i| I256::try_from(i).ok())
            .ok_or_else(|| parse_err("int", &n.to_string(), "not an integer")),
        Value::String(s) => I256::from_str(s).map_err(|e| parse_err("int", s, e)),
        other => Err(CodecError::mismatch("int", other)),
    }
}
