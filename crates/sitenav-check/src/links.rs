//! Navigation link validation.
//!
//! Every internal link in the nav bar and sidebar must point at a page that
//! exists in the source tree and, when it carries a fragment, at a heading
//! anchor that exists on that page.

use std::fmt;

use sitenav_config::{NavItem, ResolvedSiteModel, Rewrites, internal_links};

use crate::anchors::AnchorIndex;
use crate::error::CheckError;
use crate::scanner::SourceTree;

/// What is wrong with a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    /// No document is served at the link's page.
    MissingPage,
    /// The page exists but has no heading with this anchor.
    MissingAnchor {
        /// Source document of the page.
        source: String,
    },
}

/// Broken navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkProblem {
    /// Breadcrumb of the declaring entry.
    pub location: String,
    /// Display text of the entry.
    pub text: String,
    /// Link as declared.
    pub link: String,
    pub kind: ProblemKind,
}

impl fmt::Display for LinkProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::MissingPage => write!(
                f,
                "{} ({:?}): no page for {:?}",
                self.location, self.text, self.link
            ),
            ProblemKind::MissingAnchor { source } => write!(
                f,
                "{} ({:?}): {:?} has no heading for {:?}",
                self.location, self.text, source, self.link
            ),
        }
    }
}

/// Outcome of a link check.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// Links that were resolved against a page.
    pub checked: usize,
    /// Anchor-only links, which have no page to check against.
    pub skipped: usize,
    pub problems: Vec<LinkProblem>,
}

impl LinkReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    /// Convert problems into an error.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::BrokenLinks` if any link is broken.
    pub fn into_result(self) -> Result<Self, CheckError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(CheckError::BrokenLinks(self.problems))
        }
    }
}

/// Check every internal nav bar and sidebar link against the anchor index.
#[must_use]
pub fn check_links(model: &ResolvedSiteModel, index: &AnchorIndex) -> LinkReport {
    let mut report = LinkReport::default();
    check_tree(&model.nav, "nav", index, &mut report);
    check_tree(&model.sidebar, "sidebar", index, &mut report);
    tracing::debug!(
        checked = report.checked,
        skipped = report.skipped,
        problems = report.problems.len(),
        "Checked navigation links"
    );
    report
}

fn check_tree(items: &[NavItem], root: &str, index: &AnchorIndex, report: &mut LinkReport) {
    for link in internal_links(items, root) {
        let Some(page) = link.path.page() else {
            tracing::debug!(location = %link.breadcrumb, link = %link.path.declared, "Skipping anchor-only link");
            report.skipped += 1;
            continue;
        };
        report.checked += 1;

        let kind = match index.page(page) {
            None => Some(ProblemKind::MissingPage),
            Some(anchors) => link
                .path
                .anchor()
                .filter(|anchor| !anchors.anchors.contains(*anchor))
                .map(|_| ProblemKind::MissingAnchor {
                    source: anchors.source.clone(),
                }),
        };
        if let Some(kind) = kind {
            report.problems.push(LinkProblem {
                location: link.breadcrumb,
                text: link.text.to_owned(),
                link: link.path.declared.clone(),
                kind,
            });
        }
    }
}

/// Require every rewrite source to exist in the scanned tree.
///
/// # Errors
///
/// Returns `CheckError::MissingRewriteSource` for the first missing source.
pub fn check_rewrite_sources(rewrites: &Rewrites, tree: &SourceTree) -> Result<(), CheckError> {
    for (source, _) in rewrites.iter() {
        if tree.get(source).is_none() {
            return Err(CheckError::MissingRewriteSource(source.to_owned()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sitenav_config::resolve;
    use std::fs;
    use std::path::Path;

    const CONFIGURATION_MD: &str = "\
# Configuration
## Variants
## APT
## Node
## Top level
### apt
### node
### php
### python
";

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn blubber_tree(root: &Path) {
        write(root, "README.md", "# Blubber\n## Examples\n## Concepts\n## Usage\n");
        write(root, "configuration.md", CONFIGURATION_MD);
        write(root, "CHANGELOG.md", "# Changelog\n");
        write(root, "CONTRIBUTING.md", "# Contributing\n");
        write(root, "RELEASE.md", "# Release\n");
        write(root, "api/README.md", "# API\n");
    }

    fn model(sidebar: serde_json::Value) -> ResolvedSiteModel {
        resolve(&json!({
            "title": "Blubber",
            "basePath": "/releng/blubber/",
            "rewrites": {"README.md": "index.md"},
            "sourceExclude": ["api"],
            "sidebar": sidebar
        }))
        .unwrap()
    }

    fn run(model: &ResolvedSiteModel, root: &Path) -> LinkReport {
        let tree = SourceTree::scan(root, &model.site.source_exclude).unwrap();
        let index = AnchorIndex::build(&tree, &model.site.rewrites).unwrap();
        check_links(model, &index)
    }

    #[test]
    fn test_blubber_sidebar_links_resolve() {
        let dir = tempfile::tempdir().unwrap();
        blubber_tree(dir.path());
        let model = model(json!([
            {"text": "Documentation", "items": [
                {"text": "Home", "link": "/", "items": [
                    {"text": "Examples", "link": "/#examples"},
                    {"text": "Usage", "link": "/#usage"}
                ]},
                {"text": "Configuration", "link": "/configuration", "items": [
                    {"text": "APT", "link": "/configuration#apt"},
                    {"text": "NodeJS", "link": "/configuration#node-1"},
                    {"text": "PHP", "link": "/configuration#php"}
                ]}
            ]},
            {"text": "Development", "items": [
                {"text": "Changelog", "link": "/CHANGELOG"},
                {"text": "Code", "link": "https://gitlab.wikimedia.org/repos/releng/blubber"},
                {"text": "Anchor", "link": "#top"}
            ]}
        ]));

        let report = run(&model, dir.path());

        assert!(report.is_ok(), "unexpected problems: {:?}", report.problems);
        assert_eq!(report.checked, 8);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_stale_anchor_reported() {
        let dir = tempfile::tempdir().unwrap();
        blubber_tree(dir.path());
        let model = model(json!([
            {"text": "Configuration", "items": [
                {"text": "NodeJS", "link": "/configuration#node-1"},
                {"text": "PHP", "link": "/configuration#php-1"}
            ]}
        ]));

        let report = run(&model, dir.path());

        assert_eq!(
            report.problems,
            vec![LinkProblem {
                location: "sidebar > Configuration > [index 1]".to_owned(),
                text: "PHP".to_owned(),
                link: "/configuration#php-1".to_owned(),
                kind: ProblemKind::MissingAnchor {
                    source: "configuration.md".to_owned()
                },
            }]
        );
    }

    #[test]
    fn test_missing_and_excluded_pages_reported() {
        let dir = tempfile::tempdir().unwrap();
        blubber_tree(dir.path());
        let model = model(json!([
            {"text": "Roadmap", "link": "/ROADMAP"},
            {"text": "API", "link": "/api/"}
        ]));

        let err = run(&model, dir.path()).into_result().unwrap_err();

        let CheckError::BrokenLinks(problems) = &err else {
            panic!("expected broken links, got {err:?}");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().all(|p| p.kind == ProblemKind::MissingPage));
        let msg = err.to_string();
        assert!(msg.starts_with("2 broken navigation link(s):"), "got: {msg}");
        assert!(msg.contains("sidebar > [index 0]"));
    }

    #[test]
    fn test_rewritten_source_not_served_under_original_route() {
        let dir = tempfile::tempdir().unwrap();
        blubber_tree(dir.path());
        let model = model(json!([{"text": "Readme", "link": "/README"}]));

        let report = run(&model, dir.path());

        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].kind, ProblemKind::MissingPage);
    }

    #[test]
    fn test_check_rewrite_sources() {
        let dir = tempfile::tempdir().unwrap();
        blubber_tree(dir.path());
        let model = model(json!([]));
        let tree = SourceTree::scan(dir.path(), &model.site.source_exclude).unwrap();
        assert!(check_rewrite_sources(&model.site.rewrites, &tree).is_ok());

        let rewrites = sitenav_config::resolve_rewrites(&json!({"MISSING.md": "index.md"})).unwrap();
        let err = check_rewrite_sources(&rewrites, &tree).unwrap_err();
        assert!(matches!(err, CheckError::MissingRewriteSource(ref s) if s == "MISSING.md"));
    }
}
