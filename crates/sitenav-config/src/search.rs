//! Search provider configuration.
//!
//! The resolver only validates the declaration; indexing is done by the
//! selected provider.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::raw::Table;

/// Options the external provider cannot work without.
const ALGOLIA_REQUIRED_OPTIONS: [&str; 3] = ["appId", "apiKey", "indexName"];

/// Search provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// In-browser index built with the site.
    Local,
    /// Hosted Algolia `DocSearch` index.
    Algolia,
}

impl SearchProvider {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "local" => Some(Self::Local),
            "algolia" => Some(Self::Algolia),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Algolia => "algolia",
        }
    }

    /// True when indexing happens outside the site build.
    #[must_use]
    pub fn is_external(self) -> bool {
        matches!(self, Self::Algolia)
    }
}

impl fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    /// Provider-specific options, passed through untouched.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl SearchConfig {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        let mut map = Map::new();
        map.insert("provider".to_owned(), Value::from(self.provider.as_str()));
        if !self.options.is_empty() {
            map.insert("options".to_owned(), Value::Object(self.options.clone()));
        }
        Value::Object(map)
    }
}

pub(crate) fn resolve_search(raw: &Value) -> Result<SearchConfig, ConfigError> {
    let table = Table::new(raw, "search")?;
    table.warn_unknown(&["provider", "options"]);

    let name = table.require_str("provider")?;
    let provider = SearchProvider::from_name(name).ok_or_else(|| {
        ConfigError::validation(
            table.field_location("provider"),
            format!("unknown search provider {name:?} (expected \"local\" or \"algolia\")"),
        )
    })?;

    let options = match table.table("options")? {
        Some(options) => {
            if provider == SearchProvider::Algolia {
                for key in ALGOLIA_REQUIRED_OPTIONS {
                    options.require_str(key)?;
                }
            }
            raw.get("options")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default()
        }
        None if provider == SearchProvider::Algolia => {
            return Err(ConfigError::validation(
                table.location(),
                "provider \"algolia\" requires `options` with appId, apiKey and indexName",
            ));
        }
        None => Map::new(),
    };

    Ok(SearchConfig { provider, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_provider() {
        let search = resolve_search(&json!({"provider": "local"})).unwrap();
        assert_eq!(search.provider, SearchProvider::Local);
        assert!(!search.provider.is_external());
        assert!(search.options.is_empty());
    }

    #[test]
    fn test_local_provider_keeps_options() {
        let raw = json!({"provider": "local", "options": {"detailedView": true}});
        let search = resolve_search(&raw).unwrap();
        assert_eq!(search.options.get("detailedView"), Some(&json!(true)));
        assert_eq!(search.to_raw(), raw);
    }

    #[test]
    fn test_algolia_requires_options() {
        let err = resolve_search(&json!({"provider": "algolia"})).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));

        let err = resolve_search(&json!({
            "provider": "algolia",
            "options": {"appId": "A", "apiKey": "k"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("`indexName`"));
        assert_eq!(err.location(), Some("search.options"));
    }

    #[test]
    fn test_algolia_provider() {
        let search = resolve_search(&json!({
            "provider": "algolia",
            "options": {"appId": "A", "apiKey": "k", "indexName": "blubber"}
        }))
        .unwrap();
        assert!(search.provider.is_external());
    }

    #[test]
    fn test_unknown_provider() {
        let err = resolve_search(&json!({"provider": "elastic"})).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert_eq!(err.location(), Some("search.provider"));
        assert!(err.to_string().contains("elastic"));
    }

    #[test]
    fn test_options_wrong_type() {
        let err = resolve_search(&json!({"provider": "local", "options": []})).unwrap_err();
        assert!(matches!(err, ConfigError::Type { .. }));
    }
}
