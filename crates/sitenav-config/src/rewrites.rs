//! Source path rewrites.
//!
//! A rewrite serves a source document under a different output path, e.g.
//! `README.md` → `index.md` makes the README the site's home page.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::raw::{Table, expect_str, field_location};

/// Validated source → destination mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rewrites {
    map: BTreeMap<String, String>,
}

impl Rewrites {
    /// Destination of a source path, if it is rewritten.
    #[must_use]
    pub fn get(&self, source: &str) -> Option<&str> {
        self.map.get(source).map(String::as_str)
    }

    /// Output path of a source document: its rewrite target, or itself.
    #[must_use]
    pub fn destination_of<'a>(&'a self, source: &'a str) -> &'a str {
        self.get(source).unwrap_or(source)
    }

    /// Iterate over `(source, destination)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Re-serialize into the raw declaration grammar.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        Value::Object(
            self.map
                .iter()
                .map(|(s, d)| (s.clone(), Value::from(d.as_str())))
                .collect::<Map<_, _>>(),
        )
    }
}

/// Validate a rewrite mapping.
///
/// # Errors
///
/// Returns `ConfigError::Type` if the value is not a mapping of strings, and
/// `ConfigError::Validation` if a path is not relative or two sources are
/// rewritten to the same destination.
pub fn resolve_rewrites(raw: &Value) -> Result<Rewrites, ConfigError> {
    const LOCATION: &str = "rewrites";

    let table = Table::new(raw, LOCATION)?;
    let mut map = BTreeMap::new();
    let mut claimed: HashMap<&str, &str> = HashMap::new();

    for source in table.keys() {
        let location = field_location(LOCATION, source);
        let Some(value) = table.get(source) else {
            return Err(ConfigError::validation(location, "missing destination path"));
        };
        let destination = expect_str(value, &location)?;
        check_relative(source, &location, "source")?;
        check_relative(destination, &location, "destination")?;

        if let Some(previous) = claimed.insert(destination, source) {
            return Err(ConfigError::validation(
                LOCATION,
                format!(
                    "sources {previous:?} and {source:?} both rewrite to destination {destination:?}"
                ),
            ));
        }
        map.insert(source.to_owned(), destination.to_owned());
    }

    Ok(Rewrites { map })
}

/// Require a forward-slash path relative to the source root.
fn check_relative(path: &str, location: &str, role: &str) -> Result<(), ConfigError> {
    let problem = if path.trim().is_empty() {
        "must not be empty"
    } else if path.starts_with('/') {
        "must be relative to the source directory"
    } else if path.contains('\\') {
        "must use '/' as separator"
    } else if path.split('/').any(|segment| segment == "..") {
        "must not contain '..'"
    } else {
        return Ok(());
    };
    Err(ConfigError::validation(
        location,
        format!("{role} path {path:?} {problem}"),
    ))
}
