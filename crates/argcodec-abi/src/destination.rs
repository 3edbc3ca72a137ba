//! Decode destinations.
//!
//! A [`Destination`] says what shape the caller wants decoded arguments in.
//! The variant chosen drives how [`Arguments::unpack`](crate::Arguments::unpack)
//! distributes values.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use argcodec_core::DynSolValue;
use indexmap::IndexMap;

use crate::assign::AbiAssign;

/// A struct whose fields can be looked up and written by name.
///
/// Usually implemented with [`abi_struct!`](crate::abi_struct).
pub trait AbiStruct {
    /// Field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn AbiAssign>;
}

/// An ordered, fixed-length collection of assignable slots.
pub trait OrderedSlots {
    fn slot_count(&self) -> usize;

    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn AbiAssign>;
}

impl<T: AbiAssign> OrderedSlots for Vec<T> {
    fn slot_count(&self) -> usize {
        self.len()
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn AbiAssign> {
        self.get_mut(index).map(|slot| slot as &mut dyn AbiAssign)
    }
}

impl<T: AbiAssign, const N: usize> OrderedSlots for [T; N] {
    fn slot_count(&self) -> usize {
        N
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn AbiAssign> {
        self.get_mut(index).map(|slot| slot as &mut dyn AbiAssign)
    }
}

impl<T: AbiAssign> OrderedSlots for [T] {
    fn slot_count(&self) -> usize {
        self.len()
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn AbiAssign> {
        self.get_mut(index).map(|slot| slot as &mut dyn AbiAssign)
    }
}

/// A string-keyed map decoded values can be inserted into.
pub trait ValueMap {
    fn insert_value(&mut self, key: String, value: DynSolValue);
}

impl<S: BuildHasher> ValueMap for HashMap<String, DynSolValue, S> {
    fn insert_value(&mut self, key: String, value: DynSolValue) {
        self.insert(key, value);
    }
}

impl ValueMap for BTreeMap<String, DynSolValue> {
    fn insert_value(&mut self, key: String, value: DynSolValue) {
        self.insert(key, value);
    }
}

impl<S: BuildHasher> ValueMap for IndexMap<String, DynSolValue, S> {
    fn insert_value(&mut self, key: String, value: DynSolValue) {
        self.insert(key, value);
    }
}

/// Where decoded arguments go.
pub enum Destination<'a> {
    /// Named struct fields, matched through a [`FieldResolver`](crate::FieldResolver).
    Fields(&'a mut dyn AbiStruct),
    /// Positional slots, one per non-indexed argument.
    Slots(&'a mut dyn OrderedSlots),
    /// Name-keyed map; absent maps are rejected.
    Map(&'a mut dyn ValueMap),
    /// A single location receiving the lone argument.
    Single(&'a mut dyn AbiAssign),
}

impl<'a> Destination<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Destination::Fields(_) => "struct",
            Destination::Slots(_) => "slice",
            Destination::Map(_) => "map",
            Destination::Single(_) => "value",
        }
    }
}

impl std::fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Destination::{}", self.kind())
    }
}
