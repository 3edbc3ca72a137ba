//! Argument-list decoding.
//!
//! [`Arguments::unpack_values`] walks the head region slot by slot. Static
//! arrays and static tuples are flattened inline, so after each of them the
//! cursor skips the extra slots they occupy ("virtual arguments").
//! The structural entry points then hand the decoded values to a
//! [`Destination`].

use argcodec_core::{decode_at, head_words, DynSolType, DynSolValue, WORD};
use tracing::trace;

use crate::{
    argument::Arguments,
    assign::assign_struct_positional,
    config::{TupleDispatch, UnpackOptions},
    destination::{AbiStruct, Destination, OrderedSlots, ValueMap},
    error::{AbiError, AssignError},
    resolve::FieldResolver,
};

/// Total element count of a (possibly nested) static array.
///
/// Multiplies the declared sizes down the chain of fixed-size array types and
/// stops at the first element that is not one: `uint256[3][2]` gives 6,
/// `uint256[][3]` gives 3. Saturates instead of overflowing.
pub fn get_array_size(ty: &DynSolType) -> usize {
    let mut size = 1usize;
    let mut cur = ty;
    while let DynSolType::FixedArray(elem, n) = cur {
        size = size.saturating_mul(*n);
        cur = elem;
    }
    size
}

impl Arguments {
    /// Decode every non-indexed argument into a flat value list, in order.
    ///
    /// A list with one non-indexed argument yields a one-element vector.
    pub fn unpack_values(&self, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
        let mut values = Vec::with_capacity(self.len_non_indexed());
        // head slot of the next argument: its index plus the virtual slots
        // taken by inlined static arrays and tuples before it
        let mut slot = 0usize;
        for arg in self.non_indexed() {
            let offset = slot.checked_mul(WORD).ok_or(AbiError::HeadTooLarge)?;
            values.push(decode_at(offset, &arg.ty, data)?);
            slot = slot
                .checked_add(head_words(&arg.ty)?)
                .ok_or(AbiError::HeadTooLarge)?;
        }
        trace!(
            values = values.len(),
            head_slots = slot,
            data_len = data.len(),
            "unpacked argument values"
        );
        Ok(values)
    }

    /// Decode `data` into `dst` with default options.
    pub fn unpack(&self, dst: Destination<'_>, data: &[u8]) -> Result<(), AbiError> {
        self.unpack_with(dst, data, &UnpackOptions::default())
    }

    /// Decode `data` into `dst`.
    ///
    /// Tuple-shaped lists distribute one value per non-indexed argument;
    /// otherwise the single value is assigned as a whole. Which lists count as
    /// tuple-shaped is controlled by [`TupleDispatch`].
    pub fn unpack_with(
        &self,
        dst: Destination<'_>,
        data: &[u8],
        opts: &UnpackOptions<'_>,
    ) -> Result<(), AbiError> {
        let mut values = self.unpack_values(data)?;
        if values.is_empty() {
            return Err(AbiError::NoValues {
                destination: dst.kind(),
            });
        }

        let tuple_shaped = match opts.dispatch {
            TupleDispatch::FullList => self.is_tuple(),
            TupleDispatch::NonIndexed => values.len() > 1,
        };
        trace!(
            destination = dst.kind(),
            tuple_shaped,
            values = values.len(),
            "dispatching decoded values"
        );

        if tuple_shaped {
            self.unpack_tuple(dst, values, opts.resolver)
        } else {
            let value = values.swap_remove(0);
            self.unpack_atomic(dst, value, opts.resolver)
        }
    }

    /// Decode `data` into a name-keyed map.
    ///
    /// `None` is rejected before anything is decoded.
    pub fn unpack_into_map<M: ValueMap + ?Sized>(
        &self,
        map: Option<&mut M>,
        data: &[u8],
    ) -> Result<(), AbiError> {
        let Some(map) = map else {
            return Err(AbiError::NilMap);
        };
        let values = self.unpack_values(data)?;
        self.fill_map(map, values);
        Ok(())
    }

    /// Later arguments with a repeated name overwrite earlier ones.
    fn fill_map<M: ValueMap + ?Sized>(&self, map: &mut M, values: Vec<DynSolValue>) {
        for (arg, value) in self.non_indexed().zip(values) {
            map.insert_value(arg.name.clone(), value);
        }
    }

    fn unpack_tuple(
        &self,
        dst: Destination<'_>,
        values: Vec<DynSolValue>,
        resolver: &dyn FieldResolver,
    ) -> Result<(), AbiError> {
        match dst {
            Destination::Fields(target) => {
                let names: Vec<&str> = self.non_indexed().map(|arg| arg.name.as_str()).collect();
                assign_named(target, &names, values, resolver)
            }
            Destination::Slots(slots) => assign_positional(slots, values),
            Destination::Map(map) => {
                self.fill_map(map, values);
                Ok(())
            }
            Destination::Single(_) => Err(AbiError::UnsupportedDestination {
                destination: "value",
            }),
        }
    }

    fn unpack_atomic(
        &self,
        dst: Destination<'_>,
        value: DynSolValue,
        resolver: &dyn FieldResolver,
    ) -> Result<(), AbiError> {
        let arg = self.non_indexed().next().ok_or(AbiError::NoValues {
            destination: dst.kind(),
        })?;

        match dst {
            Destination::Single(slot) => Ok(slot.assign(value)?),
            Destination::Fields(target) => match (&arg.ty, value) {
                (DynSolType::Tuple(_), DynSolValue::Tuple(items))
                    if !arg.components.is_empty() =>
                {
                    assign_named(target, &arg.component_names(), items, resolver)
                }
                (DynSolType::Tuple(_), tuple @ DynSolValue::Tuple(_)) => {
                    Ok(assign_struct_positional(target, tuple)?)
                }
                (_, value) => {
                    let first = target.field_names().first().copied().ok_or(
                        AbiError::UnsupportedDestination {
                            destination: "struct without fields",
                        },
                    )?;
                    let slot = target.field_mut(first).ok_or_else(|| AbiError::UnresolvedField {
                        name: first.to_string(),
                    })?;
                    slot.assign(value).map_err(|e| AssignError::at(first, e))?;
                    Ok(())
                }
            },
            Destination::Slots(slots) => match value {
                DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
                    assign_positional(slots, items)
                }
                scalar => assign_positional(slots, vec![scalar]),
            },
            Destination::Map(map) => {
                map.insert_value(arg.name.clone(), value);
                Ok(())
            }
        }
    }
}

/// Write `values[i]` into the struct field resolved for `names[i]`.
fn assign_named(
    target: &mut dyn AbiStruct,
    names: &[&str],
    values: Vec<DynSolValue>,
    resolver: &dyn FieldResolver,
) -> Result<(), AbiError> {
    let mapping = resolver.resolve(names, target.field_names())?;
    for (name, value) in names.iter().zip(values) {
        let field = mapping
            .get(*name)
            .ok_or_else(|| AbiError::UnresolvedField {
                name: name.to_string(),
            })?;
        let slot = target
            .field_mut(field)
            .ok_or_else(|| AbiError::UnresolvedField {
                name: name.to_string(),
            })?;
        slot.assign(value).map_err(|e| AssignError::at(field, e))?;
    }
    Ok(())
}

fn assign_positional(slots: &mut dyn OrderedSlots, values: Vec<DynSolValue>) -> Result<(), AbiError> {
    let got = slots.slot_count();
    if got < values.len() {
        return Err(AbiError::InsufficientSlots {
            want: values.len(),
            got,
        });
    }
    for (i, value) in values.into_iter().enumerate() {
        let slot = slots.slot_mut(i).ok_or(AbiError::InsufficientSlots { want: i + 1, got })?;
        slot.assign(value).map_err(|e| AssignError::at(i, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;
    use alloy_primitives::U256;
    use std::collections::HashMap;

    fn fixed(elem: DynSolType, n: usize) -> DynSolType {
        DynSolType::FixedArray(Box::new(elem), n)
    }

    fn uint256(n: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(n), 256)
    }

    #[test]
    fn array_size_multiplies_fixed_dimensions() {
        assert_eq!(get_array_size(&fixed(DynSolType::Uint(256), 3)), 3);
        assert_eq!(get_array_size(&fixed(fixed(DynSolType::Uint(256), 3), 2)), 6);
        let dyn_inner = fixed(DynSolType::Array(Box::new(DynSolType::Uint(256))), 3);
        assert_eq!(get_array_size(&dyn_inner), 3);
    }

    #[test]
    fn array_size_saturates() {
        let huge = fixed(fixed(DynSolType::Bool, usize::MAX), 2);
        assert_eq!(get_array_size(&huge), usize::MAX);
    }

    #[test]
    fn single_value_into_single_destination() {
        let args = Arguments::new(vec![Argument::new("n", DynSolType::Uint(64))]);
        let data = args.pack(&[DynSolValue::Uint(U256::from(42u64), 64)]).unwrap();
        let mut n = 0u64;
        args.unpack(Destination::Single(&mut n), &data).unwrap();
        assert_eq!(n, 42);
    }

    #[test]
    fn empty_list_reports_no_values() {
        let args = Arguments::default();
        let mut n = 0u64;
        let err = args.unpack(Destination::Single(&mut n), &[]).unwrap_err();
        assert!(matches!(err, AbiError::NoValues { destination: "value" }));
    }

    #[test]
    fn tuple_into_single_is_unsupported() {
        let args = Arguments::new(vec![
            Argument::new("a", DynSolType::Bool),
            Argument::new("b", DynSolType::Bool),
        ]);
        let data = args
            .pack(&[DynSolValue::Bool(true), DynSolValue::Bool(false)])
            .unwrap();
        let mut v = DynSolValue::Bool(false);
        let err = args.unpack(Destination::Single(&mut v), &data).unwrap_err();
        assert!(matches!(err, AbiError::UnsupportedDestination { .. }));
    }

    #[test]
    fn slots_too_short() {
        let args = Arguments::new(vec![
            Argument::new("a", DynSolType::Bool),
            Argument::new("b", DynSolType::Bool),
        ]);
        let data = args
            .pack(&[DynSolValue::Bool(true), DynSolValue::Bool(false)])
            .unwrap();
        let mut one = [false; 1];
        let err = args.unpack(Destination::Slots(&mut one), &data).unwrap_err();
        assert!(matches!(err, AbiError::InsufficientSlots { want: 2, got: 1 }));
    }

    #[test]
    fn atomic_array_spreads_over_slots() {
        let args = Arguments::new(vec![Argument::new(
            "xs",
            DynSolType::Array(Box::new(DynSolType::Uint(256))),
        )]);
        let data = args
            .pack(&[DynSolValue::Array(vec![uint256(1), uint256(2)])])
            .unwrap();
        let mut out = vec![U256::ZERO; 3];
        args.unpack(Destination::Slots(&mut out), &data).unwrap();
        assert_eq!(out, vec![U256::from(1u64), U256::from(2u64), U256::ZERO]);
    }

    #[test]
    fn atomic_value_into_map() {
        let args = Arguments::new(vec![Argument::new("flag", DynSolType::Bool)]);
        let data = args.pack(&[DynSolValue::Bool(true)]).unwrap();
        let mut map: HashMap<String, DynSolValue> = HashMap::new();
        args.unpack(Destination::Map(&mut map), &data).unwrap();
        assert_eq!(map["flag"], DynSolValue::Bool(true));
    }

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        left: u64,
        right: bool,
    }
    crate::abi_struct!(Pair { left, right });

    #[test]
    fn unnamed_tuple_fills_struct_in_declaration_order() {
        let ty = DynSolType::Tuple(vec![DynSolType::Uint(64), DynSolType::Bool]);
        let args = Arguments::new(vec![Argument::new("pair", ty)]);
        let value = DynSolValue::Tuple(vec![uint256(7), DynSolValue::Bool(true)]);
        let data = args.pack(&[value]).unwrap();
        let mut pair = Pair::default();
        args.unpack(Destination::Fields(&mut pair), &data).unwrap();
        assert_eq!(pair, Pair { left: 7, right: true });
    }

    #[test]
    fn truncated_data_is_codec_error() {
        let args = Arguments::new(vec![Argument::new("n", DynSolType::Uint(256))]);
        let err = args.unpack_values(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, AbiError::Codec(_)));
    }

    #[test]
    fn oversized_fixed_array_rejected_before_decoding() {
        let ty: DynSolType = "uint256[1000000000000]".parse().unwrap();
        let args = Arguments::new(vec![
            Argument::new("xs", ty),
            Argument::new("n", DynSolType::Uint(256)),
        ]);
        let err = args.unpack_values(&[0u8; 64]).unwrap_err();
        assert!(matches!(
            err,
            AbiError::Codec(argcodec_core::CodecError::TooLarge { .. })
        ));
    }
}
