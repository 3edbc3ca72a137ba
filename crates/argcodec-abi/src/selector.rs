//! Function selectors and event topics.
//!
//! Both are keccak256 of the canonical signature `name(t1,t2,...)`; a selector
//! keeps the first 4 bytes, an event topic the whole hash.

use alloy_primitives::B256;
use tiny_keccak::{Hasher, Keccak};

use crate::argument::Arguments;

pub fn keccak256(data: &[u8]) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    B256::from(output)
}

/// Canonical signature over every argument, indexed ones included.
pub fn signature(name: &str, args: &Arguments) -> String {
    format!("{name}{}", args.signature())
}

pub fn function_selector(name: &str, args: &Arguments) -> [u8; 4] {
    let hash = keccak256(signature(name, args).as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// topics[0] of a non-anonymous event.
pub fn event_topic(name: &str, args: &Arguments) -> B256 {
    keccak256(signature(name, args).as_bytes())
}
