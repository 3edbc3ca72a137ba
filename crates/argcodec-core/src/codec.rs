//! The per-value layer over alloy's dynamic ABI codec.
//!
//! alloy encodes and decodes whole values; argument lists need a little more:
//! the out-of-line payload of a dynamic value without its pointer word,
//! decoding a value whose head slot sits at some offset of a larger buffer,
//! and head sizes that can be trusted before anything is allocated.
//!
//! # Layout rules
//! - Static scalars occupy exactly one 32-byte word.
//! - `bytes` / `string`: length word followed by right-padded data.
//! - `T[]`: length word followed by the element sequence.
//! - `T[N]` / tuples: the element sequence with no length word.
//! - Dynamic values are reached through an offset word in the enclosing head.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, U256};

use crate::error::CodecError;

/// ABI word size in bytes.
pub const WORD: usize = 32;

/// Largest inline footprint, in words, accepted for any type or nested component.
///
/// Fixed-size arrays are laid out element by element, so a declared size is
/// only trusted once it passes this bound.
pub const MAX_HEAD_WORDS: usize = 1 << 16;

/// Encode an offset or length as a big-endian 32-byte word.
pub fn pack_num(n: usize) -> [u8; WORD] {
    U256::from(n).to_be_bytes::<WORD>()
}

/// Number of words `ty` occupies in the head of an enclosing sequence.
///
/// Dynamic types take one slot for their offset; static arrays and tuples are
/// inlined. Every nested component is checked against [`MAX_HEAD_WORDS`].
pub fn head_words(ty: &DynSolType) -> Result<usize, CodecError> {
    let inline = inline_words(ty)?;
    Ok(if ty.is_dynamic() { 1 } else { inline })
}

/// Words of the element sequence `ty` lays out inline, ignoring whether it is dynamic.
fn inline_words(ty: &DynSolType) -> Result<usize, CodecError> {
    let words = match ty {
        DynSolType::FixedArray(elem, size) => size.checked_mul(head_words(elem)?),
        DynSolType::Tuple(types) => {
            let mut total = Some(0usize);
            for t in types {
                let w = head_words(t)?;
                total = total.and_then(|acc| acc.checked_add(w));
            }
            total
        }
        DynSolType::Array(elem) => head_words(elem).map(|_| Some(1))?,
        _ => Some(1),
    };
    words
        .filter(|w| *w <= MAX_HEAD_WORDS)
        .ok_or_else(|| CodecError::TooLarge {
            ty: ty.to_string(),
            max: MAX_HEAD_WORDS,
        })
}

/// Short kind label used in error messages.
pub fn value_kind(value: &DynSolValue) -> &'static str {
    match value {
        DynSolValue::Bool(_) => "bool",
        DynSolValue::Int(..) => "int",
        DynSolValue::Uint(..) => "uint",
        DynSolValue::FixedBytes(..) => "fixed bytes",
        DynSolValue::Address(_) => "address",
        DynSolValue::Function(_) => "function",
        DynSolValue::Bytes(_) => "bytes",
        DynSolValue::String(_) => "string",
        DynSolValue::Array(_) => "array",
        DynSolValue::FixedArray(_) => "fixed array",
        DynSolValue::Tuple(_) => "tuple",
        #[allow(unreachable_patterns)]
        _ => "struct",
    }
}

/// Check that `value` has the shape of `ty` and that integers fit the declared width.
///
/// The width tag carried by integer values is not compared; the range is.
pub fn check_value(ty: &DynSolType, value: &DynSolValue) -> Result<(), CodecError> {
    match (ty, value) {
        (DynSolType::Uint(bits), DynSolValue::Uint(v, _)) => {
            if v.bit_len() > *bits {
                return Err(CodecError::Overflow {
                    ty: ty.to_string(),
                    value: v.to_string(),
                });
            }
            Ok(())
        }
        (DynSolType::Int(bits), DynSolValue::Int(v, _)) => {
            if !int_fits(v.into_raw(), *bits) {
                return Err(CodecError::Overflow {
                    ty: ty.to_string(),
                    value: v.to_string(),
                });
            }
            Ok(())
        }
        (DynSolType::FixedBytes(n), DynSolValue::FixedBytes(_, len)) if len != n => {
            Err(CodecError::LengthMismatch {
                ty: ty.to_string(),
                expected: *n,
                got: *len,
            })
        }
        (DynSolType::Array(elem), DynSolValue::Array(values)) => {
            values.iter().try_for_each(|v| check_value(elem, v))
        }
        (DynSolType::FixedArray(elem, size), DynSolValue::FixedArray(values)) => {
            check_len(ty, *size, values.len())?;
            values.iter().try_for_each(|v| check_value(elem, v))
        }
        (DynSolType::Tuple(types), DynSolValue::Tuple(values)) => {
            check_len(ty, types.len(), values.len())?;
            types
                .iter()
                .zip(values)
                .try_for_each(|(t, v)| check_value(t, v))
        }
        _ if ty.matches(value) => Ok(()),
        _ => Err(CodecError::mismatch(ty, value_kind(value))),
    }
}

fn check_len(ty: &DynSolType, expected: usize, got: usize) -> Result<(), CodecError> {
    if expected != got {
        return Err(CodecError::LengthMismatch {
            ty: ty.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

/// Two's-complement range check: the bits above `bits - 1` must all equal the sign bit.
fn int_fits(raw: U256, bits: usize) -> bool {
    if bits == 0 || bits >= 256 {
        return bits != 0;
    }
    let high = raw >> (bits - 1);
    high == U256::ZERO || high == (U256::MAX >> (bits - 1))
}

/// Pack a single value into its ABI byte form.
///
/// For dynamic types the result is the out-of-line payload (length word and
/// data); placing the offset word is the caller's job.
pub fn encode_value(ty: &DynSolType, value: &DynSolValue) -> Result<Vec<u8>, CodecError> {
    head_words(ty)?;
    check_value(ty, value)?;
    let mut encoded = value.abi_encode();
    // alloy wraps the value in a one-element sequence; drop the pointer word.
    if value.is_dynamic() && encoded.len() >= WORD {
        encoded.drain(..WORD);
    }
    Ok(encoded)
}

/// Decode the value of type `ty` whose head slot starts at byte `offset` of `data`.
///
/// Dynamic types follow the absolute offset word stored in that slot; static
/// arrays and tuples are read inline starting at `offset`. Sizes are checked
/// against the buffer before anything is decoded.
pub fn decode_at(offset: usize, ty: &DynSolType, data: &[u8]) -> Result<DynSolValue, CodecError> {
    let words = head_words(ty)?;
    let decoded = if ty.is_dynamic() {
        let start = read_usize(data, offset)?;
        let payload = data.get(start..).ok_or(CodecError::OutOfBounds {
            offset: start,
            need: 0,
            len: data.len(),
        })?;
        if let DynSolType::Array(elem) = ty {
            check_array_room(start, elem, payload)?;
        }
        let mut buf = Vec::with_capacity(WORD + payload.len());
        buf.extend_from_slice(&pack_num(WORD));
        buf.extend_from_slice(payload);
        ty.abi_decode(&buf)
    } else {
        let need = words * WORD;
        let end = offset
            .checked_add(need)
            .filter(|end| *end <= data.len())
            .ok_or(CodecError::OutOfBounds {
                offset,
                need,
                len: data.len(),
            })?;
        ty.abi_decode(&data[offset..end])
    };
    let value = decoded.map_err(|e| CodecError::Decode {
        ty: ty.to_string(),
        reason: e.to_string(),
    })?;
    check_value(ty, &value)?;
    Ok(value)
}

/// Reject length words that promise more elements than the payload can hold.
fn check_array_room(start: usize, elem: &DynSolType, payload: &[u8]) -> Result<(), CodecError> {
    let len = read_usize(payload, 0)?;
    let avail = payload.len() - WORD;
    let need = head_words(elem)?
        .checked_mul(WORD)
        .and_then(|per| per.checked_mul(len));
    match need {
        Some(need) if need <= avail => Ok(()),
        need => Err(CodecError::OutOfBounds {
            offset: start + WORD,
            need: need.unwrap_or(usize::MAX),
            len: avail,
        }),
    }
}

fn read_word(data: &[u8], offset: usize) -> Result<[u8; WORD], CodecError> {
    let end = offset.checked_add(WORD).filter(|end| *end <= data.len());
    match end {
        Some(end) => {
            let mut word = [0u8; WORD];
            word.copy_from_slice(&data[offset..end]);
            Ok(word)
        }
        None => Err(CodecError::OutOfBounds {
            offset,
            need: WORD,
            len: data.len(),
        }),
    }
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, CodecError> {
    let word = U256::from_be_bytes(read_word(data, offset)?);
    usize::try_from(word).map_err(|_| CodecError::InvalidOffset {
        word: word.to_string(),
    })
}

/// Collect every address embedded in `value`, in encounter order.
pub fn get_all_address(ty: &DynSolType, value: &DynSolValue) -> Result<Vec<Address>, CodecError> {
    match (ty, value) {
        (DynSolType::Address, DynSolValue::Address(a)) => Ok(vec![*a]),
        (DynSolType::FixedArray(elem, size), DynSolValue::FixedArray(values)) => {
            check_len(ty, *size, values.len())?;
            collect_addresses(std::iter::repeat(elem.as_ref()).zip(values))
        }
        (DynSolType::Array(elem), DynSolValue::Array(values)) => {
            collect_addresses(std::iter::repeat(elem.as_ref()).zip(values))
        }
        (DynSolType::Tuple(types), DynSolValue::Tuple(values)) => {
            check_len(ty, types.len(), values.len())?;
            collect_addresses(types.iter().zip(values))
        }
        _ if ty.matches(value) => Ok(Vec::new()),
        _ => Err(CodecError::mismatch(ty, value_kind(value))),
    }
}

fn collect_addresses<'a>(
    items: impl Iterator<Item = (&'a DynSolType, &'a DynSolValue)>,
) -> Result<Vec<Address>, CodecError> {
    let mut out = Vec::new();
    for (ty, value) in items {
        out.extend(get_all_address(ty, value)?);
    }
    Ok(out)
}
