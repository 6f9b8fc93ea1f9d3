//! Source tree checks for sitenav.
//!
//! Validates a [`ResolvedSiteModel`](sitenav_config::ResolvedSiteModel)
//! against the documents it will be built from:
//!
//! 1. [`SourceTree::scan`] collects markdown documents, applying the
//!    configured exclusion patterns
//! 2. [`AnchorIndex::build`] maps each document to its route (after
//!    rewrites) and collects its heading anchors
//! 3. [`check_rewrite_sources`] and [`check_links`] report rewrites and
//!    navigation links that point nowhere

mod anchors;
mod error;
mod links;
mod scanner;

pub use anchors::{AnchorIndex, PageAnchors, extract_anchors, route_for, slugify};
pub use error::CheckError;
pub use links::{LinkProblem, LinkReport, ProblemKind, check_links, check_rewrite_sources};
pub use scanner::{SourceDocument, SourceTree};
