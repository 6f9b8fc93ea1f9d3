//! Site configuration for sitenav.
//!
//! Loads a site configuration file (`sitenav.toml`, or JSON/YAML) and
//! resolves it into an immutable [`ResolvedSiteModel`]: site metadata, base
//! path, rewrites, compiled exclusion globs, and the nav bar and sidebar
//! trees with every link classified and joined with the base path.
//!
//! Resolution is a pure function of the raw value tree. All problems are
//! reported eagerly as [`ConfigError`] with the location of the offending
//! declaration; nothing is silently dropped or coerced.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let raw = json!({
//!     "title": "Blubber",
//!     "basePath": "/releng/blubber/",
//!     "sidebar": [
//!         { "text": "Development", "items": [
//!             { "text": "Changelog", "link": "/CHANGELOG" }
//!         ]}
//!     ]
//! });
//! let model = sitenav_config::resolve(&raw).unwrap();
//! assert_eq!(model.sidebar[0].children()[0].text(), "Changelog");
//! ```

mod error;
mod exclude;
mod load;
mod model;
mod nav;
mod path;
mod raw;
mod rewrites;
mod search;
mod theme;

pub use error::ConfigError;
pub use exclude::{CompiledGlob, ExcludeSet, compile_exclude_patterns};
pub use load::{CONFIG_FILENAME, CliSettings, Format, SiteConfigFile};
pub use model::{ResolvedSiteModel, SiteConfig, resolve};
pub use nav::{LinkRef, NavItem, SidebarTree, count_items, internal_links, resolve_nav, resolve_sidebar};
pub use path::{BasePath, LinkTarget, SitePath, is_external_url};
pub use rewrites::{Rewrites, resolve_rewrites};
pub use search::{SearchConfig, SearchProvider};
pub use theme::{FooterConfig, SocialLink};
