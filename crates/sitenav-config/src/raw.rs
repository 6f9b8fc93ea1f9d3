//! Typed access to loosely-typed configuration values.
//!
//! Configuration arrives as a [`serde_json::Value`] tree regardless of the
//! file format it was read from. [`Table`] wraps one mapping node together
//! with its location so every accessor can report precise errors.

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Human-readable name of a value's shape, used in type errors.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Join a parent location and a field name.
pub(crate) fn field_location(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

/// Interpret a value as a sequence.
pub(crate) fn expect_array<'a>(value: &'a Value, location: &str) -> Result<&'a [Value], ConfigError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(ConfigError::type_mismatch(location, "a sequence", other)),
    }
}

/// Interpret a value as a string.
pub(crate) fn expect_str<'a>(value: &'a Value, location: &str) -> Result<&'a str, ConfigError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ConfigError::type_mismatch(location, "a string", other)),
    }
}

/// A mapping node with its location in the configuration.
pub(crate) struct Table<'a> {
    map: &'a Map<String, Value>,
    location: String,
}

impl<'a> Table<'a> {
    /// Wrap a value that must be a mapping.
    pub(crate) fn new(value: &'a Value, location: impl Into<String>) -> Result<Self, ConfigError> {
        let location = location.into();
        match value {
            Value::Object(map) => Ok(Self { map, location }),
            other => Err(ConfigError::type_mismatch(
                display_location(&location),
                "a mapping",
                other,
            )),
        }
    }

    /// Location of this table, `<root>` for the top level.
    pub(crate) fn location(&self) -> &str {
        display_location(&self.location)
    }

    pub(crate) fn field_location(&self, key: &str) -> String {
        field_location(&self.location, key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.map.keys().map(String::as_str)
    }

    /// Look up a field. Explicit nulls count as absent.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn str(&self, key: &str) -> Result<Option<&'a str>, ConfigError> {
        self.get(key)
            .map(|v| expect_str(v, &self.field_location(key)))
            .transpose()
    }

    /// Look up a string field that must be present and non-empty.
    pub(crate) fn require_str(&self, key: &str) -> Result<&'a str, ConfigError> {
        match self.str(key)? {
            None => Err(ConfigError::validation(
                self.location(),
                format!("missing required field `{key}`"),
            )),
            Some(s) if s.trim().is_empty() => Err(ConfigError::validation(
                self.location(),
                format!("`{key}` must not be empty"),
            )),
            Some(s) => Ok(s),
        }
    }

    pub(crate) fn bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(ConfigError::type_mismatch(
                self.field_location(key),
                "a boolean",
                other,
            )),
        }
    }

    pub(crate) fn array(&self, key: &str) -> Result<Option<&'a [Value]>, ConfigError> {
        self.get(key)
            .map(|v| expect_array(v, &self.field_location(key)))
            .transpose()
    }

    pub(crate) fn table(&self, key: &str) -> Result<Option<Table<'a>>, ConfigError> {
        self.get(key)
            .map(|v| Table::new(v, self.field_location(key)))
            .transpose()
    }

    /// Log fields that are not part of the grammar.
    pub(crate) fn warn_unknown(&self, known: &[&str]) {
        for key in self.keys().filter(|k| !known.contains(k)) {
            tracing::warn!(location = self.location(), key, "Ignoring unknown configuration field");
        }
    }
}

fn display_location(location: &str) -> &str {
    if location.is_empty() {
        "<root>"
    } else {
        location
    }
}
