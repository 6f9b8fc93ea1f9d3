//! Source exclusion patterns.
//!
//! Patterns are compiled when the configuration is loaded so that a malformed
//! glob is reported up front instead of during the source-tree walk.

use glob::{MatchOptions, Pattern};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ConfigError;
use crate::raw::expect_str;

/// Case-sensitive matching where `*` stays within one path segment.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Glob pattern compiled at load time.
#[derive(Clone, Debug)]
pub struct CompiledGlob {
    source: String,
    pattern: Pattern,
}

impl CompiledGlob {
    /// Compile a single pattern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the pattern if it is empty or
    /// not a valid glob.
    pub fn new(source: &str, location: &str) -> Result<Self, ConfigError> {
        // Candidate paths never end in `/`, so `api/` matches as `api`.
        let glob = source.trim_end_matches('/');
        if glob.trim().is_empty() {
            return Err(ConfigError::validation(
                location,
                format!("glob pattern {source:?} must not be empty"),
            ));
        }
        let pattern = Pattern::new(glob).map_err(|e| {
            ConfigError::validation(location, format!("invalid glob pattern {source:?}: {e}"))
        })?;
        Ok(Self {
            source: source.to_owned(),
            pattern,
        })
    }

    /// Pattern as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a `/`-separated path relative to the source directory.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches_with(path, MATCH_OPTIONS)
    }
}

impl PartialEq for CompiledGlob {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CompiledGlob {}

impl Serialize for CompiledGlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Ordered set of exclusion patterns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExcludeSet {
    globs: Vec<CompiledGlob>,
}

impl ExcludeSet {
    /// Check whether a source path is excluded.
    ///
    /// A path is excluded when a pattern matches the path itself or any of
    /// its ancestor directories, so a bare `api` excludes `api/handlers.md`.
    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        let relative = relative.strip_prefix("./").unwrap_or(relative);
        let ancestors = relative.match_indices('/').map(|(i, _)| &relative[..i]);
        let mut candidates = ancestors.chain(std::iter::once(relative));
        candidates.any(|candidate| self.globs.iter().any(|glob| glob.matches(candidate)))
    }

    /// Patterns as declared.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.globs.iter().map(CompiledGlob::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.globs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    /// Re-serialize into the raw declaration grammar.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        Value::Array(self.patterns().map(Value::from).collect())
    }
}

/// Compile exclusion patterns eagerly.
///
/// # Errors
///
/// Returns `ConfigError::Validation` naming the first invalid pattern.
pub fn compile_exclude_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<ExcludeSet, ConfigError> {
    let globs = patterns
        .iter()
        .enumerate()
        .map(|(i, p)| CompiledGlob::new(p.as_ref(), &format!("sourceExclude[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = globs.len(), "Compiled source exclusion patterns");
    Ok(ExcludeSet { globs })
}

/// Compile the raw `sourceExclude` sequence.
pub(crate) fn resolve_exclude(raw: &[Value]) -> Result<ExcludeSet, ConfigError> {
    let patterns = raw
        .iter()
        .enumerate()
        .map(|(i, v)| expect_str(v, &format!("sourceExclude[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    compile_exclude_patterns(&patterns)
}
