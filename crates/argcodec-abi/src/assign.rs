//! Coercion of decoded values into Rust destination locations.
//!
//! [`AbiAssign`] is the single write primitive the structural decoder uses:
//! struct fields, positional slots and single-value destinations all end up
//! calling `assign` on some location.

use alloy_primitives::{Address, B256, I256, U256};
use argcodec_core::DynSolValue;

use crate::{destination::AbiStruct, error::AssignError};

/// A location a decoded [`DynSolValue`] can be written into.
pub trait AbiAssign {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError>;
}

impl AbiAssign for DynSolValue {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        *self = value;
        Ok(())
    }
}

impl<T: AbiAssign + ?Sized> AbiAssign for &mut T {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        (**self).assign(value)
    }
}

impl AbiAssign for U256 {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        match value {
            DynSolValue::Uint(v, _) => {
                *self = v;
                Ok(())
            }
            other => Err(AssignError::incompatible("U256", &other)),
        }
    }
}

impl AbiAssign for I256 {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        match value {
            DynSolValue::Int(v, _) => {
                *self = v;
                Ok(())
            }
            other => Err(AssignError::incompatible("I256", &other)),
        }
    }
}

impl AbiAssign for bool {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        match value {
            DynSolValue::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(AssignError::incompatible("bool", &other)),
        }
    }
}

impl AbiAssign for Address {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        match value {
            DynSolValue::Address(a) => {
                *self = a;
                Ok(())
            }
            other => Err(AssignError::incompatible("Address", &other)),
        }
    }
}

impl AbiAssign for B256 {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        match value {
            DynSolValue::FixedBytes(word, _) => {
                *self = word;
                Ok(())
            }
            other => Err(AssignError::incompatible("B256", &other)),
        }
    }
}

impl AbiAssign for String {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        match value {
            DynSolValue::String(s) => {
                *self = s;
                Ok(())
            }
            other => Err(AssignError::incompatible("String", &other)),
        }
    }
}

macro_rules! impl_assign_uint {
    ($($t:ty),*) => {$(
        impl AbiAssign for $t {
            fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
                match value {
                    DynSolValue::Uint(v, _) => {
                        *self = <$t>::try_from(v).map_err(|_| AssignError::Overflow {
                            target: stringify!($t),
                            value: v.to_string(),
                        })?;
                        Ok(())
                    }
                    other => Err(AssignError::incompatible(stringify!($t), &other)),
                }
            }
        }
    )*};
}

macro_rules! impl_assign_int {
    ($($t:ty),*) => {$(
        impl AbiAssign for $t {
            fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
                match value {
                    DynSolValue::Int(v, _) => {
                        *self = <$t>::try_from(v).map_err(|_| AssignError::Overflow {
                            target: stringify!($t),
                            value: v.to_string(),
                        })?;
                        Ok(())
                    }
                    other => Err(AssignError::incompatible(stringify!($t), &other)),
                }
            }
        }
    )*};
}

impl_assign_uint!(u8, u16, u32, u64, u128, usize);
impl_assign_int!(i8, i16, i32, i64, i128);

/// Elements of a sequence-shaped value. Byte strings count as sequences of
/// `uint8` so they land in `Vec<u8>` / `[u8; N]`.
fn sequence_items(
    target: &'static str,
    value: DynSolValue,
) -> Result<Vec<DynSolValue>, AssignError> {
    match value {
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => Ok(items),
        DynSolValue::Bytes(bytes) => Ok(bytes_as_uint8(&bytes)),
        DynSolValue::FixedBytes(word, n) => Ok(bytes_as_uint8(&word[..n])),
        other => Err(AssignError::incompatible(target, &other)),
    }
}

fn bytes_as_uint8(bytes: &[u8]) -> Vec<DynSolValue> {
    bytes
        .iter()
        .map(|b| DynSolValue::Uint(U256::from(*b), 8))
        .collect()
}

impl<T: AbiAssign + Default> AbiAssign for Vec<T> {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        let items = sequence_items("Vec", value)?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let mut slot = T::default();
            slot.assign(item).map_err(|e| AssignError::at(i, e))?;
            out.push(slot);
        }
        *self = out;
        Ok(())
    }
}

impl<T: AbiAssign, const N: usize> AbiAssign for [T; N] {
    fn assign(&mut self, value: DynSolValue) -> Result<(), AssignError> {
        let items = sequence_items("array", value)?;
        if items.len() != N {
            return Err(AssignError::Length {
                target: "array",
                expected: N,
                got: items.len(),
            });
        }
        for (i, (slot, item)) in self.iter_mut().zip(items).enumerate() {
            slot.assign(item).map_err(|e| AssignError::at(i, e))?;
        }
        Ok(())
    }
}

/// Assign a tuple value into a struct field by field, in declaration order.
pub fn assign_struct_positional<S: AbiStruct + ?Sized>(
    dst: &mut S,
    value: DynSolValue,
) -> Result<(), AssignError> {
    let DynSolValue::Tuple(items) = value else {
        return Err(AssignError::incompatible("struct", &value));
    };
    let names = dst.field_names();
    if items.len() != names.len() {
        return Err(AssignError::Length {
            target: "struct",
            expected: names.len(),
            got: items.len(),
        });
    }
    for (name, item) in names.iter().zip(items) {
        if let Some(slot) = dst.field_mut(name) {
            slot.assign(item).map_err(|e| AssignError::at(name, e))?;
        }
    }
    Ok(())
}

/// Implement [`AbiStruct`] and positional [`AbiAssign`] for a plain struct.
///
/// ```ignore
/// #[derive(Default)]
/// struct Transfer { to: Address, amount: U256 }
/// argcodec_abi::abi_struct!(Transfer { to, amount });
/// ```
#[macro_export]
macro_rules! abi_struct {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::AbiStruct for $ty {
            fn field_names(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),+]
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn $crate::AbiAssign> {
                $(
                    if name == stringify!($field) {
                        return ::core::option::Option::Some(&mut self.$field);
                    }
                )+
                ::core::option::Option::None
            }
        }

        impl $crate::AbiAssign for $ty {
            fn assign(
                &mut self,
                value: $crate::DynSolValue,
            ) -> ::core::result::Result<(), $crate::AssignError> {
                $crate::assign::assign_struct_positional(self, value)
            }
        }
    };
}
