//! Parser for OpenFeature flag manifests
//!
//! A manifest is a JSON document of the form
//! `{ "flags": { "<key>": { "flagType": "...", "defaultValue": ..., "description": "..." } } }`.
//! Flags are returned ordered by key so repeated runs render identical files.

use super::{Flag, FlagType, Flagset};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    flags: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestFlag {
    flag_type: FlagType,
    #[serde(default)]
    default_value: Value,
    #[serde(default)]
    description: Option<String>,
}

/// Parse a manifest document into a flag set
pub(super) fn parse_manifest(source: &str) -> Result<Flagset> {
    let manifest: Manifest = serde_json::from_str(source)?;

    let flags = match manifest.flags {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => map
            .into_iter()
            .map(|(key, body)| parse_flag(&key, body).map(|flag| (key, flag)))
            .collect::<Result<BTreeMap<_, _>>>()?,
        Some(other) => {
            return Err(Error::InvalidManifest(format!(
                "'flags' must be an object, found {}",
                json_kind(&other)
            )))
        }
    };

    Ok(Flagset::from_flags(flags.into_values().collect()))
}

fn parse_flag(key: &str, body: Value) -> Result<Flag> {
    let parsed: ManifestFlag = serde_json::from_value(body)
        .map_err(|e| Error::InvalidManifest(format!("flag '{}': {}", key, e)))?;

    Ok(Flag {
        key: key.to_string(),
        flag_type: parsed.flag_type,
        default_value: parsed.default_value,
        description: parsed.description,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
