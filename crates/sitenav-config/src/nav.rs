//! Navigation tree resolution.
//!
//! Turns raw sidebar and nav bar declarations into [`NavItem`] trees.
//! Every entry is either a group (it has `items`) or a link (it has `link`):
//!
//! ```text
//! Group    { text, link?, items: [Entry, ...], collapsed?: bool }
//! LinkItem { text, link: path-or-url }
//! ```
//!
//! Errors name the offending entry by breadcrumb: the root name, the texts of
//! the enclosing groups, and the entry's index among its siblings, e.g.
//! `sidebar > Development > [index 2]`.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sitenav_config::{BasePath, NavItem, resolve_sidebar};
//!
//! let base = BasePath::new("/releng/blubber/", "basePath").unwrap();
//! let raw = json!([{ "text": "APT", "link": "/configuration#apt" }]);
//! let sidebar = resolve_sidebar(&raw, &base).unwrap();
//!
//! let NavItem::InternalLink { path, .. } = &sidebar[0] else { panic!() };
//! assert_eq!(path.href, "/releng/blubber/configuration#apt");
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::path::{BasePath, LinkTarget, SitePath};
use crate::raw::{Table, expect_array};

/// Field names accepted for an entry's link target.
const LINK_KEYS: [&str; 3] = ["link", "path", "url"];

/// Fields an entry may declare.
const ENTRY_KEYS: [&str; 6] = ["text", "link", "path", "url", "items", "collapsed"];

/// Separator between breadcrumb segments.
const BREADCRUMB_SEPARATOR: &str = " > ";

/// Resolved sidebar: top-level entries in declaration order.
pub type SidebarTree = Vec<NavItem>;

/// Navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    /// Link to a page or section of this site.
    InternalLink {
        /// Display text.
        text: String,
        /// Target path.
        path: SitePath,
    },
    /// Link to another site.
    ExternalLink {
        /// Display text.
        text: String,
        /// Absolute URL.
        url: String,
    },
    /// Group of entries, optionally linking to its own page.
    Group {
        /// Display text.
        text: String,
        /// Group's own link target.
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<LinkTarget>,
        /// Child entries in declaration order.
        children: Vec<NavItem>,
        /// Whether the group starts collapsed.
        collapsed: bool,
    },
}

impl NavItem {
    /// Display text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::InternalLink { text, .. }
            | Self::ExternalLink { text, .. }
            | Self::Group { text, .. } => text,
        }
    }

    /// Child entries (empty for links).
    #[must_use]
    pub fn children(&self) -> &[NavItem] {
        match self {
            Self::Group { children, .. } => children,
            Self::InternalLink { .. } | Self::ExternalLink { .. } => &[],
        }
    }

    /// Re-serialize into the raw declaration grammar.
    ///
    /// Internal links are emitted as declared, not base-joined, so that
    /// resolving the output again yields an equal item.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        let mut map = Map::new();
        map.insert("text".to_owned(), Value::from(self.text()));
        match self {
            Self::InternalLink { path, .. } => {
                map.insert("link".to_owned(), Value::from(path.declared.as_str()));
            }
            Self::ExternalLink { url, .. } => {
                map.insert("link".to_owned(), Value::from(url.as_str()));
            }
            Self::Group {
                link,
                children,
                collapsed,
                ..
            } => {
                if let Some(link) = link {
                    map.insert("link".to_owned(), Value::from(link.declared()));
                }
                map.insert(
                    "items".to_owned(),
                    Value::Array(children.iter().map(NavItem::to_raw).collect()),
                );
                if *collapsed {
                    map.insert("collapsed".to_owned(), Value::Bool(true));
                }
            }
        }
        Value::Object(map)
    }
}

/// Count entries in a tree, groups included.
#[must_use]
pub fn count_items(items: &[NavItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_items(item.children()))
        .sum()
}

/// Resolve the sidebar declaration.
///
/// # Errors
///
/// Returns `ConfigError::Validation` for missing or empty `text`, missing
/// links, or malformed link targets, and `ConfigError::Type` when a field
/// has the wrong shape.
pub fn resolve_sidebar(raw: &Value, base: &BasePath) -> Result<SidebarTree, ConfigError> {
    resolve_tree(raw, base, "sidebar")
}

/// Resolve the top nav bar declaration.
///
/// Same grammar and errors as [`resolve_sidebar`].
pub fn resolve_nav(raw: &Value, base: &BasePath) -> Result<Vec<NavItem>, ConfigError> {
    resolve_tree(raw, base, "nav")
}

fn resolve_tree(raw: &Value, base: &BasePath, root: &str) -> Result<Vec<NavItem>, ConfigError> {
    let entries = expect_array(raw, root)?;
    let mut trail = vec![root.to_owned()];
    resolve_entries(entries, base, &mut trail)
}

fn resolve_entries(
    entries: &[Value],
    base: &BasePath,
    trail: &mut Vec<String>,
) -> Result<Vec<NavItem>, ConfigError> {
    let mut items = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        items.push(resolve_entry(entry, index, base, trail)?);
    }
    Ok(items)
}

fn resolve_entry(
    entry: &Value,
    index: usize,
    base: &BasePath,
    trail: &mut Vec<String>,
) -> Result<NavItem, ConfigError> {
    let table = Table::new(entry, item_breadcrumb(trail, index))?;
    table.warn_unknown(&ENTRY_KEYS);

    let text = table.require_str("text")?.to_owned();
    let link = link_field(&table)?
        .map(|(key, raw)| LinkTarget::parse(raw, base, &table.field_location(key)))
        .transpose()?;
    let collapsed = table.bool("collapsed")?;

    let Some(children) = table.array("items")? else {
        if collapsed.is_some() {
            return Err(ConfigError::validation(
                table.location(),
                "`collapsed` only applies to groups with `items`",
            ));
        }
        return match link {
            Some(LinkTarget::Internal(path)) => Ok(NavItem::InternalLink { text, path }),
            Some(LinkTarget::External(url)) => Ok(NavItem::ExternalLink { text, url }),
            None => Err(ConfigError::validation(
                table.location(),
                "missing required field `link` (or `items` for a group)",
            )),
        };
    };

    trail.push(breadcrumb_segment(&text));
    let children = resolve_entries(children, base, trail);
    trail.pop();

    Ok(NavItem::Group {
        text,
        link,
        children: children?,
        collapsed: collapsed.unwrap_or(false),
    })
}

/// Read the link target, accepting `path` and `url` as aliases of `link`.
fn link_field<'a>(table: &Table<'a>) -> Result<Option<(&'static str, &'a str)>, ConfigError> {
    let mut found = None;
    for key in LINK_KEYS {
        let Some(raw) = table.str(key)? else {
            continue;
        };
        if let Some((first, _)) = found {
            return Err(ConfigError::validation(
                table.location(),
                format!("both `{first}` and `{key}` are declared; use only `link`"),
            ));
        }
        found = Some((key, raw));
    }
    Ok(found)
}

/// Breadcrumb of the entry at `index` under the groups in `trail`.
/// Group text as a breadcrumb segment, quoted if it contains the separator.
fn breadcrumb_segment(text: &str) -> String {
    if text.contains(BREADCRUMB_SEPARATOR) {
        format!("{text:?}")
    } else {
        text.to_owned()
    }
}

fn item_breadcrumb(trail: &[String], index: usize) -> String {
    format!(
        "{}{BREADCRUMB_SEPARATOR}[index {index}]",
        trail.join(BREADCRUMB_SEPARATOR)
    )
}

/// Internal link found in a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRef<'a> {
    /// Breadcrumb of the declaring entry.
    pub breadcrumb: String,
    /// Display text of the declaring entry.
    pub text: &'a str,
    /// Link target.
    pub path: &'a SitePath,
}

/// Collect every internal link in a tree, group links included, in
/// declaration order.
#[must_use]
pub fn internal_links<'a>(items: &'a [NavItem], root: &str) -> Vec<LinkRef<'a>> {
    let mut links = Vec::new();
    let mut trail = vec![root.to_owned()];
    collect_links(items, &mut trail, &mut links);
    links
}

fn collect_links<'a>(items: &'a [NavItem], trail: &mut Vec<String>, links: &mut Vec<LinkRef<'a>>) {
    for (index, item) in items.iter().enumerate() {
        let path = match item {
            NavItem::InternalLink { path, .. }
            | NavItem::Group {
                link: Some(LinkTarget::Internal(path)),
                ..
            } => Some(path),
            _ => None,
        };
        if let Some(path) = path {
            links.push(LinkRef {
                breadcrumb: item_breadcrumb(trail, index),
                text: item.text(),
                path,
            });
        }
        if let NavItem::Group { text, children, .. } = item {
            trail.push(breadcrumb_segment(text));
            collect_links(children, trail, links);
            trail.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn base() -> BasePath {
        BasePath::new("/releng/blubber/", "basePath").unwrap()
    }

    fn blubber_sidebar() -> Value {
        json!([
            {
                "text": "Documentation",
                "items": [
                    {
                        "text": "Home",
                        "link": "/",
                        "items": [
                            {"text": "Examples", "link": "/#examples"},
                            {"text": "Concepts", "link": "/#concepts"},
                            {"text": "Usage", "link": "/#usage"}
                        ]
                    },
                    {
                        "text": "Configuration",
                        "link": "/configuration",
                        "items": [
                            {"text": "Variants", "link": "/configuration#variants"},
                            {"text": "APT", "link": "/configuration#apt"},
                            {"text": "NodeJS", "link": "/configuration#node-1"}
                        ]
                    }
                ]
            },
            {
                "text": "Development",
                "items": [
                    {"text": "Changelog", "link": "/CHANGELOG"},
                    {"text": "Code", "link": "https://gitlab.wikimedia.org/repos/releng/blubber"},
                    {"text": "Contributing", "link": "/CONTRIBUTING"},
                    {"text": "Release", "link": "/RELEASE"}
                ]
            }
        ])
    }

    fn texts(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(NavItem::text).collect()
    }

    #[test]
    fn test_resolve_nested_sidebar() {
        let sidebar = resolve_sidebar(&blubber_sidebar(), &base()).unwrap();

        assert_eq!(texts(&sidebar), vec!["Documentation", "Development"]);
        let docs = sidebar[0].children();
        assert_eq!(texts(docs), vec!["Home", "Configuration"]);
        assert_eq!(
            texts(docs[1].children()),
            vec!["Variants", "APT", "NodeJS"]
        );
        assert_eq!(count_items(&sidebar), 14);
    }

    #[test]
    fn test_group_with_own_link() {
        let sidebar = resolve_sidebar(&blubber_sidebar(), &base()).unwrap();
        let NavItem::Group {
            link: Some(link),
            collapsed,
            ..
        } = &sidebar[0].children()[0]
        else {
            panic!("expected linked group");
        };
        assert_eq!(link.href(), "/releng/blubber/");
        assert!(!collapsed);
    }

    #[test]
    fn test_link_kinds() {
        let sidebar = resolve_sidebar(&blubber_sidebar(), &base()).unwrap();
        let dev = sidebar[1].children();

        assert_eq!(
            dev[1],
            NavItem::ExternalLink {
                text: "Code".to_owned(),
                url: "https://gitlab.wikimedia.org/repos/releng/blubber".to_owned(),
            }
        );
        let NavItem::InternalLink { path, .. } = &dev[0] else {
            panic!("expected internal link");
        };
        assert_eq!(path.declared, "/CHANGELOG");
        assert_eq!(path.href, "/releng/blubber/CHANGELOG");
    }

    #[test]
    fn test_anchor_only_link_not_prefixed() {
        let raw = json!([{"text": "Examples", "link": "#examples"}]);
        let sidebar = resolve_sidebar(&raw, &base()).unwrap();
        let NavItem::InternalLink { path, .. } = &sidebar[0] else {
            panic!("expected internal link");
        };
        assert_eq!(path.href, "#examples");
    }

    #[test]
    fn test_breadcrumb_quotes_group_text_with_separator() {
        let raw = json!([
            {"text": "Guides > Advanced", "items": [{"link": "/advanced"}]}
        ]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert_eq!(
            err.location(),
            Some(r#"sidebar > "Guides > Advanced" > [index 0]"#)
        );

        let raw = json!([
            {"text": "A > B", "items": [{"text": "C", "link": "/c"}]}
        ]);
        let sidebar = resolve_sidebar(&raw, &base()).unwrap();
        let links = internal_links(&sidebar, "sidebar");
        assert_eq!(links[0].breadcrumb, r#"sidebar > "A > B" > [index 0]"#);
    }

    #[test]
    fn test_missing_text_names_breadcrumb() {
        let raw = json!([
            {"text": "Documentation", "items": []},
            {
                "text": "Development",
                "items": [
                    {"text": "Changelog", "link": "/CHANGELOG"},
                    {"text": "Code", "link": "https://example.com"},
                    {"items": [{"text": "Release", "link": "/RELEASE"}]}
                ]
            }
        ]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();

        assert!(matches!(err, ConfigError::Validation { .. }));
        assert_eq!(err.location(), Some("sidebar > Development > [index 2]"));
        assert!(err.to_string().contains("Development > [index 2]"));
        assert!(err.to_string().contains("`text`"));
    }

    #[test]
    fn test_missing_link_is_validation_error() {
        let raw = json!([{"text": "Orphan"}]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert_eq!(err.location(), Some("sidebar > [index 0]"));
        assert!(err.to_string().contains("`link`"));
    }

    #[test]
    fn test_items_not_a_sequence_is_type_error() {
        let raw = json!([{"text": "Broken", "items": "nope"}]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert!(
            matches!(err, ConfigError::Type { expected: "a sequence", found: "a string", .. }),
            "Expected ConfigError::Type, got {err:?}"
        );
        assert_eq!(err.location(), Some("sidebar > [index 0].items"));
    }

    #[test]
    fn test_sidebar_not_a_sequence_is_type_error() {
        let err = resolve_sidebar(&json!({"text": "x"}), &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Type { .. }));
        assert_eq!(err.location(), Some("sidebar"));
    }

    #[test]
    fn test_entry_not_a_mapping_is_type_error() {
        let err = resolve_sidebar(&json!(["/CHANGELOG"]), &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Type { .. }));
        assert_eq!(err.location(), Some("sidebar > [index 0]"));
    }

    #[test]
    fn test_relative_link_rejected() {
        let raw = json!([{"text": "Config", "link": "configuration"}]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert_eq!(err.location(), Some("sidebar > [index 0].link"));
    }

    #[test]
    fn test_link_aliases() {
        let raw = json!([
            {"text": "Config", "path": "/configuration"},
            {"text": "Code", "url": "https://example.com"}
        ]);
        let sidebar = resolve_sidebar(&raw, &BasePath::default()).unwrap();
        assert!(matches!(sidebar[0], NavItem::InternalLink { .. }));
        assert!(matches!(sidebar[1], NavItem::ExternalLink { .. }));
    }

    #[test]
    fn test_conflicting_link_aliases() {
        let raw = json!([{"text": "Config", "link": "/a", "path": "/b"}]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("`link` and `path`"));
    }

    #[test]
    fn test_collapsed_flag() {
        let raw = json!([
            {"text": "A", "items": [], "collapsed": true},
            {"text": "B", "items": []}
        ]);
        let sidebar = resolve_sidebar(&raw, &base()).unwrap();
        assert!(matches!(sidebar[0], NavItem::Group { collapsed: true, .. }));
        assert!(matches!(sidebar[1], NavItem::Group { collapsed: false, .. }));
    }

    #[test]
    fn test_collapsed_on_link_rejected() {
        let raw = json!([{"text": "A", "link": "/a", "collapsed": true}]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_collapsed_wrong_type() {
        let raw = json!([{"text": "A", "items": [], "collapsed": "yes"}]);
        let err = resolve_sidebar(&raw, &base()).unwrap_err();
        assert!(matches!(err, ConfigError::Type { .. }));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let names = ["zeta", "alpha", "mu", "beta", "omega"];
        let raw = Value::Array(
            names
                .iter()
                .map(|n| json!({"text": n, "link": format!("/{n}")}))
                .collect(),
        );
        let nav = resolve_nav(&raw, &base()).unwrap();
        assert_eq!(texts(&nav), names.to_vec());
    }

    #[test]
    fn test_nav_errors_use_nav_root() {
        let err = resolve_nav(&json!([{"link": "/a"}]), &base()).unwrap_err();
        assert_eq!(err.location(), Some("nav > [index 0]"));
    }

    #[test]
    fn test_to_raw_round_trip() {
        let base = base();
        let raw = json!([
            {"text": "Guide", "path": "/guide", "items": [
                {"text": "Intro", "link": "#intro"}
            ], "collapsed": true},
            {"text": "Code", "url": "https://example.com"}
        ]);
        let first = resolve_sidebar(&raw, &base).unwrap();
        let reserialized = Value::Array(first.iter().map(NavItem::to_raw).collect());
        let second = resolve_sidebar(&reserialized, &base).unwrap();
        assert_eq!(first, second);
        assert_eq!(reserialized[0]["link"], json!("/guide"));
    }

    #[test]
    fn test_internal_links_with_breadcrumbs() {
        let sidebar = resolve_sidebar(&blubber_sidebar(), &base()).unwrap();
        let links = internal_links(&sidebar, "sidebar");

        // External "Code" link is excluded; group links are included.
        assert_eq!(links.len(), 11);
        assert_eq!(links[0].text, "Home");
        assert_eq!(links[0].breadcrumb, "sidebar > Documentation > [index 0]");
        assert_eq!(links[1].text, "Examples");
        assert_eq!(
            links[1].breadcrumb,
            "sidebar > Documentation > Home > [index 0]"
        );
        let last = links.last().unwrap();
        assert_eq!(last.text, "Release");
        assert_eq!(last.breadcrumb, "sidebar > Development > [index 3]");
    }
}
