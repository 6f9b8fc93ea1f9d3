//! Base path and link target handling.
//!
//! Links in navigation declarations are either absolute URLs (kept as-is),
//! root-relative site paths (joined with the base path), or anchor-only
//! references (kept as-is).

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

/// URL prefix under which the whole site is served.
///
/// Always starts and ends with `/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BasePath(String);

impl BasePath {
    /// Validate a base path declaration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the value does not start and end
    /// with `/`, contains an empty segment, or contains characters that are
    /// not valid in a URL path (`?`, `#`, whitespace, control characters).
    pub fn new(raw: &str, location: &str) -> Result<Self, ConfigError> {
        if !raw.starts_with('/') || !raw.ends_with('/') {
            return Err(ConfigError::validation(
                location,
                format!("base path {raw:?} must start and end with '/'"),
            ));
        }
        if raw.contains("//") {
            return Err(ConfigError::validation(
                location,
                format!("base path {raw:?} contains an empty segment"),
            ));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| matches!(c, '?' | '#') || c.is_whitespace() || c.is_control())
        {
            return Err(ConfigError::validation(
                location,
                format!("base path {raw:?} contains invalid character {c:?}"),
            ));
        }
        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a root-relative path (`/configuration#apt`) with the base.
    #[must_use]
    pub fn join(&self, root_relative: &str) -> String {
        let rest = root_relative.strip_prefix('/').unwrap_or(root_relative);
        format!("{}{rest}", self.0)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self("/".to_owned())
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check whether a link is an absolute URL (`scheme:...` or protocol-relative `//host`).
#[must_use]
pub fn is_external_url(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    let Some((scheme, rest)) = link.split_once(':') else {
        return false;
    };
    !rest.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Internal site path: root-relative or anchor-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SitePath {
    /// Path as declared (`/configuration#apt`, `#examples`).
    pub declared: String,
    /// Path as rendered, with the base path applied to root-relative links.
    pub href: String,
}

impl SitePath {
    fn new(declared: &str, base: &BasePath) -> Self {
        let href = if declared.starts_with('#') {
            declared.to_owned()
        } else {
            base.join(declared)
        };
        Self {
            declared: declared.to_owned(),
            href,
        }
    }

    /// True for `#section` links that point into the current page.
    #[must_use]
    pub fn is_anchor_only(&self) -> bool {
        self.declared.starts_with('#')
    }

    /// Page part of the declared path without query or fragment.
    ///
    /// Returns `None` for anchor-only links.
    #[must_use]
    pub fn page(&self) -> Option<&str> {
        if self.is_anchor_only() {
            return None;
        }
        let end = self
            .declared
            .find(['?', '#'])
            .unwrap_or(self.declared.len());
        Some(&self.declared[..end])
    }

    /// Fragment of the declared path, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.declared
            .split_once('#')
            .map(|(_, anchor)| anchor)
            .filter(|a| !a.is_empty())
    }
}

/// Resolved link target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// Root-relative or anchor-only site path.
    Internal(SitePath),
    /// Absolute URL.
    External(String),
}

impl LinkTarget {
    /// Classify and validate a declared link.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the link is empty, is an empty
    /// anchor (`#`), or is a relative path that starts with neither `/` nor `#`.
    pub fn parse(raw: &str, base: &BasePath, location: &str) -> Result<Self, ConfigError> {
        let link = raw.trim();
        if link.is_empty() {
            return Err(ConfigError::validation(location, "link must not be empty"));
        }
        if is_external_url(link) {
            return Ok(Self::External(link.to_owned()));
        }
        if link == "#" {
            return Err(ConfigError::validation(
                location,
                "anchor link must name a section",
            ));
        }
        if !link.starts_with('/') && !link.starts_with('#') {
            return Err(ConfigError::validation(
                location,
                format!("internal link {link:?} must start with '/' or '#', or be an absolute URL"),
            ));
        }
        Ok(Self::Internal(SitePath::new(link, base)))
    }

    /// Link as it was declared.
    #[must_use]
    pub fn declared(&self) -> &str {
        match self {
            Self::Internal(path) => &path.declared,
            Self::External(url) => url,
        }
    }

    /// Link as rendered.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Internal(path) => &path.href,
            Self::External(url) => url,
        }
    }
}
