//! Check error types.

use std::fmt::Write;
use std::path::PathBuf;

use crate::links::LinkProblem;

/// Error raised while checking a site against its source tree.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),
    /// A document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A rewrite names a source document that was not found.
    #[error("Rewrite source {0:?} does not exist in the source tree")]
    MissingRewriteSource(String),
    /// Two documents are served at the same route.
    #[error("Documents {first:?} and {second:?} are both served at route {route:?}")]
    RouteCollision {
        route: String,
        first: String,
        second: String,
    },
    /// Navigation links that do not resolve to a page or anchor.
    #[error("{} broken navigation link(s):{}", .0.len(), list(.0))]
    BrokenLinks(Vec<LinkProblem>),
}

fn list(problems: &[LinkProblem]) -> String {
    problems.iter().fold(String::new(), |mut out, problem| {
        let _ = write!(out, "\n  - {problem}");
        out
    })
}
