//! Property tests: decoding what was packed gives back the same values.

use alloy_primitives::{Address, B256, I256, U256};
use argcodec_abi::{Argument, Arguments, DynSolType, DynSolValue};
use argcodec_core::head_words;
use proptest::collection::vec;
use proptest::prelude::*;

fn leaf_type() -> impl Strategy<Value = DynSolType> {
    prop_oneof![
        (1usize..=32).prop_map(|n| DynSolType::Uint(n * 8)),
        (1usize..=32).prop_map(|n| DynSolType::Int(n * 8)),
        Just(DynSolType::Bool),
        Just(DynSolType::Address),
        (1usize..=32).prop_map(DynSolType::FixedBytes),
        Just(DynSolType::Bytes),
        Just(DynSolType::String),
    ]
}

fn abi_type() -> impl Strategy<Value = DynSolType> {
    leaf_type().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), 1usize..4).prop_map(|(t, n)| DynSolType::FixedArray(Box::new(t), n)),
            inner.clone().prop_map(|t| DynSolType::Array(Box::new(t))),
            vec(inner, 1..4).prop_map(DynSolType::Tuple),
        ]
    })
}

/// Values that are always in range for `ty`.
fn value_for(ty: &DynSolType) -> BoxedStrategy<DynSolValue> {
    match ty {
        DynSolType::Uint(bits) => {
            let bits = *bits;
            any::<[u8; 32]>()
                .prop_map(move |b| {
                    let v = U256::from_be_bytes(b) & (U256::MAX >> (256 - bits));
                    DynSolValue::Uint(v, bits)
                })
                .boxed()
        }
        DynSolType::Int(bits) => {
            let bits = *bits;
            any::<i64>()
                .prop_map(move |x| {
                    let v = if bits < 64 {
                        (x << (64 - bits)) >> (64 - bits)
                    } else {
                        x
                    };
                    DynSolValue::Int(I256::try_from(v).unwrap(), bits)
                })
                .boxed()
        }
        DynSolType::Bool => any::<bool>().prop_map(DynSolValue::Bool).boxed(),
        DynSolType::Address => any::<[u8; 20]>()
            .prop_map(|b| DynSolValue::Address(Address::from(b)))
            .boxed(),
        DynSolType::FixedBytes(n) => {
            let n = *n;
            vec(any::<u8>(), n)
                .prop_map(move |b| DynSolValue::FixedBytes(B256::right_padding_from(&b), n))
                .boxed()
        }
        DynSolType::Bytes => vec(any::<u8>(), 0..70).prop_map(DynSolValue::Bytes).boxed(),
        DynSolType::String => "\\PC{0,24}".prop_map(DynSolValue::String).boxed(),
        DynSolType::FixedArray(elem, n) => vec(value_for(elem), *n)
            .prop_map(DynSolValue::FixedArray)
            .boxed(),
        DynSolType::Array(elem) => vec(value_for(elem), 0..4)
            .prop_map(DynSolValue::Array)
            .boxed(),
        DynSolType::Tuple(types) => {
            let parts: Vec<_> = types.iter().map(value_for).collect();
            parts.prop_map(DynSolValue::Tuple).boxed()
        }
        other => panic!("no strategy for {other}"),
    }
}

fn argument_list() -> impl Strategy<Value = (Arguments, Vec<DynSolValue>)> {
    vec(abi_type(), 1..5).prop_flat_map(|types| {
        let values: Vec<_> = types.iter().map(value_for).collect();
        let args: Arguments = types
            .into_iter()
            .enumerate()
            .map(|(i, ty)| Argument::new(format!("a{i}"), ty))
            .collect();
        (Just(args), values)
    })
}

proptest! {
    #[test]
    fn unpack_inverts_pack((args, values) in argument_list()) {
        let data = args.pack(&values).unwrap();
        prop_assert_eq!(data.len() % 32, 0);
        let head: usize = args.iter().map(|a| head_words(&a.ty).unwrap() * 32).sum();
        prop_assert!(data.len() >= head);
        let decoded = args.unpack_values(&data).unwrap();
        prop_assert_eq!(decoded, values);
    }

    #[test]
    fn address_prefix_counts_every_address((args, values) in argument_list()) {
        let out = args.pack_prefix(&values).unwrap();
        let count = u16::from_be_bytes([out[0], out[1]]) as usize;
        prop_assert_eq!(out.len(), 2 + count * 20);
    }

    #[test]
    fn truncated_data_never_panics((args, values) in argument_list(), cut in 0usize..64) {
        let data = args.pack(&values).unwrap();
        let end = data.len().saturating_sub(cut + 1);
        let _ = args.unpack_values(&data[..end]);
    }
}
