//! Configuration sources.
//!
//! A [`ConfigSource`] is the flat option map handed to every component in a
//! pipeline. It can come from a structured settings record (any
//! `Serialize` type whose top level is a struct or map), from an explicit
//! key/value mapping, or from JSON/YAML text.
//!
//! Entries keep their insertion order (field order for records), and both
//! binding passes iterate in that order.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Ordered option map: option name to value.
pub type ConfigMap = IndexMap<String, Value>;

/// A set of option overrides shared by many targets.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Flattened fields of a structured settings record.
    Record(ConfigMap),

    /// A plain string-keyed mapping.
    Mapping(ConfigMap),
}

impl ConfigSource {
    /// Flatten a structured record into its top-level fields.
    ///
    /// Fails with [`ConfigError::InvalidSource`] if the record does not
    /// serialize to a string-keyed map.
    pub fn from_record<T: Serialize + ?Sized>(record: &T) -> Result<Self, ConfigError> {
        let value = serde_json::to_value(record)
            .map_err(|e| ConfigError::invalid_source(format!("an unserializable record ({e})")))?;
        into_map(value).map(Self::Record)
    }

    /// Build a mapping source from key/value pairs.
    pub fn from_mapping<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Parse a JSON object into a mapping source.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        Self::try_from(value)
    }

    /// Parse a YAML mapping into a mapping source.
    ///
    /// Keys must be strings; an empty document is not a mapping and is
    /// rejected like any other non-mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            format: "yaml",
            message: e.to_string(),
        })?;
        Self::try_from(value)
    }

    /// Check if this source came from a structured record.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// The normalized key/value view shared by both variants.
    pub fn as_map(&self) -> &ConfigMap {
        match self {
            Self::Record(map) | Self::Mapping(map) => map,
        }
    }

    /// Iterate entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.as_map().iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.as_map().len()
    }

    /// Check if the source has no entries.
    pub fn is_empty(&self) -> bool {
        self.as_map().is_empty()
    }
}

impl TryFrom<Value> for ConfigSource {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        into_map(value).map(Self::Mapping)
    }
}

impl From<ConfigMap> for ConfigSource {
    fn from(map: ConfigMap) -> Self {
        Self::Mapping(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ConfigSource {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from_mapping(iter)
    }
}

fn into_map(value: Value) -> Result<ConfigMap, ConfigError> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ConfigError::invalid_source(describe(&other))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
