//! Argument-name → struct-field resolution.

use std::collections::HashMap;

use crate::{
    error::AbiError,
    naming::{capitalise, to_camel_case},
};

/// Maps argument names onto the field names of a destination struct.
///
/// Implementations return one entry per argument name, or fail if any name
/// has no field.
pub trait FieldResolver: Send + Sync {
    fn resolve(
        &self,
        arg_names: &[&str],
        field_names: &[&str],
    ) -> Result<HashMap<String, String>, AbiError>;
}

/// Matches names after stripping underscores and case, so `_tokenId`,
/// `token_id` and `TokenId` all meet.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizedResolver;

/// Matches names verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactResolver;

/// Comparison key used by [`NormalizedResolver`].
pub fn field_key(name: &str) -> String {
    to_camel_case(&capitalise(name)).to_lowercase()
}

impl FieldResolver for NormalizedResolver {
    fn resolve(
        &self,
        arg_names: &[&str],
        field_names: &[&str],
    ) -> Result<HashMap<String, String>, AbiError> {
        let keyed: Vec<(String, &str)> = field_names.iter().map(|f| (field_key(f), *f)).collect();
        let mut mapping = HashMap::with_capacity(arg_names.len());
        let mut claimed: HashMap<&str, &str> = HashMap::new();

        for &arg in arg_names {
            let key = field_key(arg);
            let mut hits = keyed.iter().filter(|(k, _)| *k == key).map(|(_, f)| *f);
            let field = hits.next().ok_or_else(|| AbiError::UnresolvedField {
                name: arg.to_string(),
            })?;
            if let Some(second) = hits.next() {
                return Err(AbiError::AmbiguousField {
                    name: arg.to_string(),
                    first: field.to_string(),
                    second: second.to_string(),
                });
            }
            claim(&mut claimed, field, arg)?;
            mapping.insert(arg.to_string(), field.to_string());
        }
        Ok(mapping)
    }
}

impl FieldResolver for ExactResolver {
    fn resolve(
        &self,
        arg_names: &[&str],
        field_names: &[&str],
    ) -> Result<HashMap<String, String>, AbiError> {
        let mut mapping = HashMap::with_capacity(arg_names.len());
        let mut claimed: HashMap<&str, &str> = HashMap::new();
        for &arg in arg_names {
            let field = field_names
                .iter()
                .copied()
                .find(|f| *f == arg)
                .ok_or_else(|| AbiError::UnresolvedField {
                    name: arg.to_string(),
                })?;
            claim(&mut claimed, field, arg)?;
            mapping.insert(arg.to_string(), field.to_string());
        }
        Ok(mapping)
    }
}

/// Record that `arg` owns `field`; two distinct arguments may not share one.
fn claim<'a>(
    claimed: &mut HashMap<&'a str, &'a str>,
    field: &'a str,
    arg: &'a str,
) -> Result<(), AbiError> {
    match claimed.insert(field, arg) {
        Some(prev) if prev != arg => Err(AbiError::DuplicateField {
            field: field.to_string(),
        }),
        _ => Ok(()),
    }
}
