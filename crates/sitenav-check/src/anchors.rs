//! Heading anchor extraction.
//!
//! Derives the anchor ids the site renderer assigns to headings, so that
//! navigation links like `/configuration#node-1` can be checked against the
//! documents they point into.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use sitenav_config::Rewrites;
use unicode_normalization::UnicodeNormalization;

use crate::error::CheckError;
use crate::scanner::SourceTree;

/// Convert heading text to an anchor slug.
///
/// Decomposes to NFKD and drops combining marks, lowercases, collapses runs
/// of whitespace and punctuation into a single dash, trims dashes at both
/// ends, and prefixes a leading digit with `_`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.nfkd() {
        if c.is_control() || ('\u{0300}'..='\u{036F}').contains(&c) {
            continue;
        }
        if c.is_whitespace() || is_separator_punct(c) {
            pending_dash = true;
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.extend(c.to_lowercase());
    }

    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        slug.insert(0, '_');
    }
    slug
}

fn is_separator_punct(c: char) -> bool {
    matches!(
        c,
        '~' | '`' | '!' | '@' | '#' | '$' | '%' | '^' | '&' | '*' | '(' | ')' | '-' | '_'
            | '+' | '=' | '[' | ']' | '{' | '}' | '|' | '\\' | ';' | ':' | '"' | '\''
            | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' | '<' | '>' | ',' | '.'
            | '?' | '/'
    )
}

/// Extract heading anchors from a markdown document in document order.
///
/// Explicit ids (`## Node {#node}`) are used as-is. Repeated slugs get a
/// numeric suffix: `node`, `node-1`, `node-2`.
#[must_use]
pub fn extract_anchors(markdown: &str) -> Vec<String> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES);
    let mut anchors = Vec::new();
    let mut taken = BTreeSet::new();
    let mut heading: Option<(Option<String>, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { id, .. }) => {
                heading = Some((id.map(|id| id.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buffer)) = heading.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((explicit, text)) = heading.take() else {
                    continue;
                };
                let anchor = match explicit {
                    Some(id) => id,
                    None => unique_slug(&slugify(&text), &taken),
                };
                taken.insert(anchor.clone());
                anchors.push(anchor);
            }
            _ => {}
        }
    }
    anchors
}

fn unique_slug(base: &str, taken: &BTreeSet<String>) -> String {
    let mut candidate = base.to_owned();
    let mut n = 1;
    while taken.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

/// Route of an output document (after rewrites), without the base path.
///
/// `index.md` → `/`, `guide/index.md` → `/guide/`, `guide/setup.md` → `/guide/setup`.
#[must_use]
pub fn route_for(destination: &str) -> String {
    let stem = destination.strip_suffix(".md").unwrap_or(destination);
    if stem == "index" {
        "/".to_owned()
    } else if let Some(dir) = stem.strip_suffix("/index") {
        format!("/{dir}/")
    } else {
        format!("/{stem}")
    }
}

/// Anchors of one routed page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageAnchors {
    /// Source document the page is built from.
    pub source: String,
    /// Heading anchors on the page.
    pub anchors: BTreeSet<String>,
}

/// Pages of the site keyed by route.
#[derive(Debug, Default)]
pub struct AnchorIndex {
    pages: BTreeMap<String, PageAnchors>,
}

impl AnchorIndex {
    /// Read every document and index its heading anchors under its route.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::Read` if a document cannot be read, and
    /// `CheckError::RouteCollision` if two documents are served at the same
    /// route.
    pub fn build(tree: &SourceTree, rewrites: &Rewrites) -> Result<Self, CheckError> {
        let mut index = Self::default();
        for doc in tree.documents() {
            let content = fs::read_to_string(&doc.path).map_err(|source| CheckError::Read {
                path: doc.path.clone(),
                source,
            })?;
            let route = route_for(rewrites.destination_of(&doc.relative));
            index.insert(&route, &doc.relative, &content)?;
        }
        tracing::debug!(pages = index.pages.len(), "Built anchor index");
        Ok(index)
    }

    /// Index a single page from its markdown content.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::RouteCollision` if another document already
    /// occupies `route`.
    pub fn insert(
        &mut self,
        route: &str,
        source: &str,
        markdown: &str,
    ) -> Result<(), CheckError> {
        match self.pages.entry(route.to_owned()) {
            Entry::Occupied(existing) => Err(CheckError::RouteCollision {
                route: route.to_owned(),
                first: existing.get().source.clone(),
                second: source.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(PageAnchors {
                    source: source.to_owned(),
                    anchors: extract_anchors(markdown).into_iter().collect(),
                });
                Ok(())
            }
        }
    }

    /// Look up a page by the page part of a root-relative link.
    ///
    /// Accepts `.md` and `.html` suffixes and an explicit `/index` for
    /// directory pages.
    #[must_use]
    pub fn page(&self, link_page: &str) -> Option<&PageAnchors> {
        if let Some(page) = self.pages.get(link_page) {
            return Some(page);
        }
        let trimmed = link_page
            .strip_suffix(".html")
            .or_else(|| link_page.strip_suffix(".md"))
            .unwrap_or(link_page);
        let trimmed = trimmed
            .strip_suffix("index")
            .filter(|dir| dir.ends_with('/'))
            .unwrap_or(trimmed);
        self.pages.get(trimmed)
    }

    /// Routes in sorted order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
