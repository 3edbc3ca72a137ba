//! Argument-list encoding.
//!
//! Produces the body of a call or return payload (no selector): a head with
//! one slot per argument, inline static composites, and offsets pointing into
//! a tail holding dynamic payloads in argument order.

use alloy_primitives::Address;
use argcodec_core::{codec::pack_num, encode_value, get_all_address, head_words, DynSolValue, WORD};
use tracing::trace;

use crate::{argument::Arguments, error::AbiError};

impl Arguments {
    /// Encode `values` against the full argument list.
    ///
    /// Offsets are absolute from the start of the returned buffer.
    pub fn pack(&self, values: &[DynSolValue]) -> Result<Vec<u8>, AbiError> {
        self.check_count(values)?;

        let head_size = self.head_size()?;
        let mut head = Vec::with_capacity(head_size);
        let mut tail = Vec::new();

        for (arg, value) in self.iter().zip(values) {
            let packed = encode_value(&arg.ty, value)?;
            if arg.ty.is_dynamic() {
                head.extend_from_slice(&pack_num(head_size + tail.len()));
                tail.extend_from_slice(&packed);
            } else {
                head.extend_from_slice(&packed);
            }
        }

        trace!(
            args = self.len(),
            head_size,
            tail_size = tail.len(),
            "packed argument list"
        );
        head.extend_from_slice(&tail);
        Ok(head)
    }

    /// Same as [`pack`](Self::pack); the counterpart of
    /// [`unpack_values`](Self::unpack_values).
    pub fn pack_values(&self, values: &[DynSolValue]) -> Result<Vec<u8>, AbiError> {
        self.pack(values)
    }

    /// Encode every address embedded in `values` as a `u16` big-endian count
    /// followed by the raw 20-byte records, in argument order.
    pub fn pack_prefix(&self, values: &[DynSolValue]) -> Result<Vec<u8>, AbiError> {
        self.check_count(values)?;

        let mut addresses: Vec<Address> = Vec::new();
        for (arg, value) in self.iter().zip(values) {
            addresses.extend(get_all_address(&arg.ty, value)?);
        }

        let count = u16::try_from(addresses.len()).map_err(|_| AbiError::TooManyAddresses {
            count: addresses.len(),
        })?;
        trace!(addresses = count, "packed address list");

        let mut out = Vec::with_capacity(2 + addresses.len() * 20);
        out.extend_from_slice(&count.to_be_bytes());
        for address in &addresses {
            out.extend_from_slice(address.as_slice());
        }
        Ok(out)
    }

    /// Bytes of head the full list occupies.
    fn head_size(&self) -> Result<usize, AbiError> {
        let mut words = 0usize;
        for arg in self.iter() {
            words = words
                .checked_add(head_words(&arg.ty)?)
                .ok_or(AbiError::HeadTooLarge)?;
        }
        words.checked_mul(WORD).ok_or(AbiError::HeadTooLarge)
    }

    fn check_count(&self, values: &[DynSolValue]) -> Result<(), AbiError> {
        if values.len() != self.len() {
            return Err(AbiError::ArgumentCount {
                got: values.len(),
                want: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;
    use alloy_primitives::{address, U256};
    use argcodec_core::{CodecError, DynSolType};

    fn word(n: u64) -> [u8; 32] {
        pack_num(n as usize)
    }

    fn uint256(n: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(n), 256)
    }

    #[test]
    fn count_mismatch_before_packing() {
        let args = Arguments::new(vec![Argument::new("a", DynSolType::Uint(256))]);
        let err = args.pack(&[]).unwrap_err();
        assert!(matches!(err, AbiError::ArgumentCount { got: 0, want: 1 }));
        assert_eq!(err.to_string(), "argument count mismatch: 0 for 1");
    }

    #[test]
    fn dynamic_offsets_are_absolute() {
        let args = Arguments::new(vec![
            Argument::new("a", DynSolType::Bytes),
            Argument::new("b", DynSolType::Uint(256)),
            Argument::new("c", DynSolType::Bytes),
        ]);
        let out = args
            .pack(&[
                DynSolValue::Bytes(b"hi".to_vec()),
                uint256(7),
                DynSolValue::Bytes(b"yo".to_vec()),
            ])
            .unwrap();
        assert_eq!(out.len(), 96 + 64 + 64);
        assert_eq!(out[0..32], word(96));
        assert_eq!(out[32..64], word(7));
        assert_eq!(out[64..96], word(160));
        assert_eq!(out[96..128], word(2));
        assert_eq!(&out[128..130], b"hi");
        assert_eq!(out[160..192], word(2));
        assert_eq!(&out[192..194], b"yo");
    }

    #[test]
    fn static_array_inlined() {
        let args = Arguments::new(vec![
            Argument::new(
                "xs",
                DynSolType::FixedArray(Box::new(DynSolType::Uint(256)), 3),
            ),
            Argument::new("s", DynSolType::String),
        ]);
        let xs = DynSolValue::FixedArray((1..=3u64).map(uint256).collect());
        let out = args.pack(&[xs, DynSolValue::String("z".into())]).unwrap();
        assert_eq!(out[64..96], word(3));
        assert_eq!(out[96..128], word(128));
        assert_eq!(out[128..160], word(1));
    }

    #[test]
    fn codec_error_propagates() {
        let args = Arguments::new(vec![Argument::new("a", DynSolType::Uint(8))]);
        let err = args
            .pack(&[DynSolValue::Uint(U256::from(256u64), 8)])
            .unwrap_err();
        assert!(matches!(err, AbiError::Codec(CodecError::Overflow { .. })));
    }

    #[test]
    fn oversized_fixed_array_rejected_before_packing() {
        let ty: DynSolType = "uint256[1000000000000]".parse().unwrap();
        let args = Arguments::new(vec![Argument::new("xs", ty)]);
        let err = args.pack(&[DynSolValue::FixedArray(vec![])]).unwrap_err();
        assert!(matches!(err, AbiError::Codec(CodecError::TooLarge { .. })));
    }

    #[test]
    fn address_prefix_flattens_in_order() {
        let a = address!("00000000000000000000000000000000000000aa");
        let b = address!("00000000000000000000000000000000000000bb");
        let c = address!("00000000000000000000000000000000000000cc");
        let args = Arguments::new(vec![
            Argument::new("owner", DynSolType::Address),
            Argument::new("amount", DynSolType::Uint(256)),
            Argument::new("to", DynSolType::Array(Box::new(DynSolType::Address))),
        ]);
        let out = args
            .pack_prefix(&[
                DynSolValue::Address(a),
                uint256(1),
                DynSolValue::Array(vec![DynSolValue::Address(b), DynSolValue::Address(c)]),
            ])
            .unwrap();
        assert_eq!(out.len(), 2 + 3 * 20);
        assert_eq!(&out[..2], &[0, 3]);
        assert_eq!(&out[2..22], a.as_slice());
        assert_eq!(&out[42..62], c.as_slice());
    }

    #[test]
    fn address_prefix_empty() {
        let args = Arguments::new(vec![Argument::new("n", DynSolType::Uint(256))]);
        assert_eq!(args.pack_prefix(&[uint256(5)]).unwrap(), vec![0, 0]);
    }

    #[test]
    fn address_prefix_rejects_shape_mismatch() {
        let args = Arguments::new(vec![Argument::new("owner", DynSolType::Address)]);
        let err = args.pack_prefix(&[DynSolValue::Bool(true)]).unwrap_err();
        assert!(matches!(
            err,
            AbiError::Codec(CodecError::TypeMismatch { ref expected, ref got })
                if expected == "address" && got == "bool"
        ));
    }

    #[test]
    fn address_prefix_count_must_fit_u16() {
        let args = Arguments::new(vec![Argument::new(
            "to",
            DynSolType::Array(Box::new(DynSolType::Address)),
        )]);
        let many = DynSolValue::Array(vec![DynSolValue::Address(Address::ZERO); 65_536]);
        let err = args.pack_prefix(&[many]).unwrap_err();
        assert!(matches!(err, AbiError::TooManyAddresses { count: 65_536 }));

        let most = DynSolValue::Array(vec![DynSolValue::Address(Address::ZERO); 65_535]);
        let out = args.pack_prefix(&[most]).unwrap();
        assert_eq!(&out[..2], &[0xff, 0xff]);
        assert_eq!(out.len(), 2 + 65_535 * 20);
    }
}
