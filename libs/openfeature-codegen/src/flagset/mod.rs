//! Flag set model
//!
//! Language-agnostic representation of the feature flags a generator renders.
//! Every generator receives the same `Flagset`; what differs between target
//! languages is how each `FlagType` is spelled and which types are accepted.

mod manifest;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Declared value domain of a feature flag.
///
/// `Unknown` absorbs any type name outside the known set so that loading and
/// rendering never fail on it; generators map it to an empty type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    Integer,
    Float,
    Boolean,
    String,
    Object,
    #[serde(other)]
    Unknown,
}

impl FlagType {
    /// The known flag types, in declaration order.
    pub const KNOWN: [FlagType; 5] = [
        FlagType::Integer,
        FlagType::Float,
        FlagType::Boolean,
        FlagType::String,
        FlagType::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlagType::Integer => "integer",
            FlagType::Float => "float",
            FlagType::Boolean => "boolean",
            FlagType::String => "string",
            FlagType::Object => "object",
            FlagType::Unknown => "unknown",
        }
    }
}

impl From<&str> for FlagType {
    fn from(name: &str) -> Self {
        match name {
            "integer" => FlagType::Integer,
            "float" => FlagType::Float,
            "boolean" => FlagType::Boolean,
            "string" => FlagType::String,
            "object" => FlagType::Object,
            _ => FlagType::Unknown,
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single feature flag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    /// Flag key as evaluated by the OpenFeature SDK (e.g., "enableFoo")
    pub key: String,
    pub flag_type: FlagType,
    /// Default value, of arbitrary JSON shape
    pub default_value: Value,
    pub description: Option<String>,
}

impl Flag {
    pub fn new(key: impl Into<String>, flag_type: FlagType, default_value: Value) -> Self {
        Self {
            key: key.into(),
            flag_type,
            default_value,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered collection of flags. Order is preserved in generated output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Flagset {
    flags: Vec<Flag>,
}

impl Flagset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a flag set that keeps the given order
    pub fn from_flags(flags: Vec<Flag>) -> Self {
        Self { flags }
    }

    /// Parse a flag manifest document
    pub fn from_manifest_str(source: &str) -> Result<Self> {
        manifest::parse_manifest(source)
    }

    /// Read and parse a flag manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_manifest_str(&source)
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.key == key)
    }

    /// Copy of this flag set without the flags whose type is unsupported
    pub fn filter(&self, unsupported: &UnsupportedTypes) -> Flagset {
        let flags = self
            .flags
            .iter()
            .filter(|flag| !unsupported.contains(flag.flag_type))
            .cloned()
            .collect();
        Flagset { flags }
    }
}

/// Flag types a target language cannot express.
///
/// A declared capability only: validation outside the generator consults it
/// to reject incompatible flags before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsupportedTypes(BTreeSet<FlagType>);

impl UnsupportedTypes {
    /// The empty set: every flag type is accepted
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, flag_type: FlagType) -> bool {
        self.0.contains(&flag_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<FlagType> for UnsupportedTypes {
    fn from_iter<I: IntoIterator<Item = FlagType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
