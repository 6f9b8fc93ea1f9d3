//! Resolved site model.
//!
//! [`resolve`] is the single entry point: it validates a raw configuration
//! tree and produces an immutable [`ResolvedSiteModel`] for the renderer.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::exclude::{ExcludeSet, resolve_exclude};
use crate::nav::{NavItem, SidebarTree, count_items, resolve_nav, resolve_sidebar};
use crate::path::{BasePath, LinkTarget};
use crate::raw::Table;
use crate::rewrites::{Rewrites, resolve_rewrites};
use crate::search::{SearchConfig, resolve_search};
use crate::theme::{FooterConfig, SocialLink, resolve_footer, resolve_social_links};

/// Top-level fields of a site configuration.
const SITE_KEYS: [&str; 12] = [
    "title",
    "description",
    "basePath",
    "srcDir",
    "rewrites",
    "sourceExclude",
    "nav",
    "logo",
    "docFooter",
    "sidebar",
    "socialLinks",
    "search",
];

/// Site metadata and source handling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub base_path: BasePath,
    pub rewrites: Rewrites,
    pub source_exclude: ExcludeSet,
}

/// Validated, render-ready site model.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSiteModel {
    pub site: SiteConfig,
    /// Top nav bar entries.
    pub nav: Vec<NavItem>,
    pub sidebar: SidebarTree,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<LinkTarget>,
    pub footer: FooterConfig,
    pub social_links: Vec<SocialLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
}

impl ResolvedSiteModel {
    /// Re-serialize into the raw declaration grammar.
    ///
    /// Resolving the returned value yields a model equal to `self`.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        let mut map = Map::new();
        let mut put = |key: &str, value: Value| {
            map.insert(key.to_owned(), value);
        };

        put("title", Value::from(self.site.title.as_str()));
        put("description", Value::from(self.site.description.as_str()));
        put("basePath", Value::from(self.site.base_path.as_str()));
        put("rewrites", self.site.rewrites.to_raw());
        put("sourceExclude", self.site.source_exclude.to_raw());
        put("nav", items_to_raw(&self.nav));
        if let Some(logo) = &self.logo {
            put("logo", Value::from(logo.declared()));
        }
        put("docFooter", self.footer.to_raw());
        put("sidebar", items_to_raw(&self.sidebar));
        put(
            "socialLinks",
            Value::Array(self.social_links.iter().map(SocialLink::to_raw).collect()),
        );
        if let Some(search) = &self.search {
            put("search", search.to_raw());
        }

        Value::Object(map)
    }
}

fn items_to_raw(items: &[NavItem]) -> Value {
    Value::Array(items.iter().map(NavItem::to_raw).collect())
}

/// Resolve a raw site configuration.
///
/// # Errors
///
/// Returns `ConfigError::Validation` for malformed or incomplete
/// declarations and `ConfigError::Type` for fields of the wrong shape. The
/// first problem found aborts resolution.
pub fn resolve(raw: &Value) -> Result<ResolvedSiteModel, ConfigError> {
    let root = Table::new(raw, "")?;
    root.warn_unknown(&SITE_KEYS);

    let title = root.require_str("title")?.to_owned();
    let description = root.str("description")?.unwrap_or_default().to_owned();
    let base_path = root
        .str("basePath")?
        .map(|b| BasePath::new(b, "basePath"))
        .transpose()?
        .unwrap_or_default();

    let rewrites = root
        .get("rewrites")
        .map(resolve_rewrites)
        .transpose()?
        .unwrap_or_default();
    let source_exclude = root
        .array("sourceExclude")?
        .map(resolve_exclude)
        .transpose()?
        .unwrap_or_default();

    let nav = root
        .get("nav")
        .map(|v| resolve_nav(v, &base_path))
        .transpose()?
        .unwrap_or_default();
    let sidebar = root
        .get("sidebar")
        .map(|v| resolve_sidebar(v, &base_path))
        .transpose()?
        .unwrap_or_default();
    let logo = root
        .str("logo")?
        .map(|l| LinkTarget::parse(l, &base_path, "logo"))
        .transpose()?;
    let footer = root
        .get("docFooter")
        .map(resolve_footer)
        .transpose()?
        .unwrap_or_default();
    let social_links = root
        .get("socialLinks")
        .map(resolve_social_links)
        .transpose()?
        .unwrap_or_default();
    let search = root.get("search").map(resolve_search).transpose()?;

    tracing::debug!(
        title = %title,
        base_path = %base_path,
        nav_items = count_items(&nav),
        sidebar_items = count_items(&sidebar),
        rewrites = rewrites.len(),
        excludes = source_exclude.len(),
        "Resolved site configuration"
    );

    Ok(ResolvedSiteModel {
        site: SiteConfig {
            title,
            description,
            base_path,
            rewrites,
            source_exclude,
        },
        nav,
        sidebar,
        logo,
        footer,
        social_links,
        search,
    })
}
