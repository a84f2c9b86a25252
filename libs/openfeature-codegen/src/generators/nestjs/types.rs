//! TypeScript type names and default value literals for NestJS output

use crate::flagset::{FlagType, Flagset};
use heck::ToUpperCamelCase;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Literal used when a default value cannot be encoded
pub const FALLBACK_LITERAL: &str = "{}";

/// TypeScript type for a flag type. Unknown types map to an empty string so a
/// single bad flag never aborts rendering.
pub fn open_feature_type(flag_type: FlagType) -> &'static str {
    match flag_type {
        FlagType::Integer | FlagType::Float => "number",
        FlagType::Boolean => "boolean",
        FlagType::String => "string",
        FlagType::Object => "object",
        FlagType::Unknown => "",
    }
}

/// JSON literal for a default value, or [`FALLBACK_LITERAL`] if encoding fails
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| FALLBACK_LITERAL.to_string())
}

/// Name of the decorator function generated for a flag key.
///
/// PascalCase of the key, with a leading `_` when that would not start a
/// valid TypeScript identifier (empty, or starting with a digit).
pub fn decorator_name(key: &str) -> String {
    let name = key.to_upper_camel_case();
    match name.chars().next() {
        Some(c) if !c.is_ascii_digit() => name,
        _ => format!("_{}", name),
    }
}

/// Decorator names produced by more than one flag key, with those keys
pub fn colliding_decorator_names(flagset: &Flagset) -> BTreeMap<String, Vec<String>> {
    let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for flag in flagset.flags() {
        by_name
            .entry(decorator_name(&flag.key))
            .or_default()
            .push(flag.key.clone());
    }
    by_name.retain(|_, keys| keys.len() > 1);
    by_name
}

/// `DecoratorName` template function
pub(super) fn decorator_name_fn(value: &Value) -> Value {
    let name = match value {
        Value::String(key) => decorator_name(key),
        other => decorator_name(&other.to_string()),
    };
    Value::String(name)
}

/// `OpenFeatureType` template function: accepts a flag type name
pub(super) fn open_feature_type_fn(value: &Value) -> Value {
    let flag_type = value.as_str().map_or(FlagType::Unknown, FlagType::from);
    Value::String(open_feature_type(flag_type).to_string())
}

/// `ToJSONString` template function
pub(super) fn to_json_string_fn(value: &Value) -> Value {
    Value::String(to_json_string(value))
}
