//! Theme-level settings: doc footer toggles and social links.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ConfigError;
use crate::path::is_external_url;
use crate::raw::{Table, expect_array, field_location};

/// Previous/next pagination controls at the bottom of each document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            prev_enabled: true,
            next_enabled: true,
        }
    }
}

impl FooterConfig {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({ "prev": self.prev_enabled, "next": self.next_enabled })
    }
}

pub(crate) fn resolve_footer(raw: &Value) -> Result<FooterConfig, ConfigError> {
    let table = Table::new(raw, "docFooter")?;
    table.warn_unknown(&["prev", "next"]);
    let defaults = FooterConfig::default();
    Ok(FooterConfig {
        prev_enabled: table.bool("prev")?.unwrap_or(defaults.prev_enabled),
        next_enabled: table.bool("next")?.unwrap_or(defaults.next_enabled),
    })
}

/// Icon link to a profile on another site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Icon name (e.g., "github").
    pub icon: String,
    /// Absolute URL.
    pub link: String,
}

impl SocialLink {
    #[must_use]
    pub fn to_raw(&self) -> Value {
        json!({ "icon": self.icon, "link": self.link })
    }
}

pub(crate) fn resolve_social_links(raw: &Value) -> Result<Vec<SocialLink>, ConfigError> {
    const LOCATION: &str = "socialLinks";

    expect_array(raw, LOCATION)?
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let table = Table::new(entry, format!("{LOCATION}[{i}]"))?;
            let icon = table.require_str("icon")?;
            let link = table.require_str("link")?;
            if !is_external_url(link) {
                return Err(ConfigError::validation(
                    field_location(table.location(), "link"),
                    format!("social link {link:?} must be an absolute URL"),
                ));
            }
            Ok(SocialLink {
                icon: icon.to_owned(),
                link: link.to_owned(),
            })
        })
        .collect()
}
