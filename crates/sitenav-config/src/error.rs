//! Configuration error types.

use std::path::PathBuf;

use serde_json::Value;

use crate::raw::kind;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Config file extension is not one of the supported formats.
    #[error(
        "Unsupported configuration format: {} (expected .toml, .json, .yaml or .yml)",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),
    /// Malformed or incomplete declaration.
    #[error("Configuration error at {location}: {message}")]
    Validation {
        /// Field path or navigation breadcrumb (e.g., "`sidebar > Development > [index 2]`").
        location: String,
        /// What is wrong with the declaration.
        message: String,
    },
    /// Field present but of the wrong shape.
    #[error("Type error at {location}: expected {expected}, found {found}")]
    Type {
        /// Field path or navigation breadcrumb.
        location: String,
        /// Expected shape (e.g., "a sequence").
        expected: &'static str,
        /// Shape actually found.
        found: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn validation(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            location: location.into(),
            message: message.into(),
        }
    }

    pub(crate) fn type_mismatch(
        location: impl Into<String>,
        expected: &'static str,
        found: &Value,
    ) -> Self {
        Self::Type {
            location: location.into(),
            expected,
            found: kind(found),
        }
    }

    /// Location of the offending declaration, for validation and type errors.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Validation { location, .. } | Self::Type { location, .. } => Some(location),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_display() {
        let err = ConfigError::validation("sidebar > [index 0]", "missing required field `text`");
        assert_eq!(
            err.to_string(),
            "Configuration error at sidebar > [index 0]: missing required field `text`"
        );
        assert_eq!(err.location(), Some("sidebar > [index 0]"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ConfigError::type_mismatch("sidebar", "a sequence", &json!({"a": 1}));
        assert_eq!(
            err.to_string(),
            "Type error at sidebar: expected a sequence, found a mapping"
        );
    }

    #[test]
    fn test_location_absent_for_io() {
        let err = ConfigError::NotFound(PathBuf::from("sitenav.toml"));
        assert!(err.location().is_none());
    }
}
