//! Decode-time configuration.

use serde::{Deserialize, Serialize};

use crate::resolve::{ExactResolver, FieldResolver, NormalizedResolver};

/// How [`Arguments::unpack`](crate::Arguments::unpack) decides between
/// tuple-shaped and single-value assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TupleDispatch {
    /// Tuple-shaped whenever the full list (indexed arguments included) has
    /// more than one entry. Matches existing decode destinations.
    #[default]
    FullList,
    /// Tuple-shaped only when more than one value is actually decoded.
    NonIndexed,
}

/// Built-in field-name resolution strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    #[default]
    Normalized,
    Exact,
}

impl FieldNaming {
    pub fn resolver(self) -> &'static dyn FieldResolver {
        match self {
            FieldNaming::Normalized => &NormalizedResolver,
            FieldNaming::Exact => &ExactResolver,
        }
    }
}

/// Serializable decode settings, e.g. from a CLI config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackConfig {
    #[serde(default)]
    pub dispatch: TupleDispatch,
    #[serde(default)]
    pub field_naming: FieldNaming,
}

impl UnpackConfig {
    pub fn options(&self) -> UnpackOptions<'static> {
        UnpackOptions {
            dispatch: self.dispatch,
            resolver: self.field_naming.resolver(),
        }
    }
}

/// Runtime decode settings; `resolver` may be any caller-supplied strategy.
#[derive(Clone, Copy)]
pub struct UnpackOptions<'r> {
    pub dispatch: TupleDispatch,
    pub resolver: &'r dyn FieldResolver,
}

impl Default for UnpackOptions<'static> {
    fn default() -> Self {
        UnpackConfig::default().options()
    }
}

impl std::fmt::Debug for UnpackOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnpackOptions")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}
