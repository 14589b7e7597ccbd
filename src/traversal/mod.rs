// src/traversal/mod.rs
//! Recursive export of a page or database and everything it references.

mod orchestrator;
mod report;
mod visited;

pub use orchestrator::{Orchestrator, PullTask};
pub use report::{BranchFailure, PullReport};
pub use visited::VisitedSet;

/// What to do when a resource below the root fails to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first error.
    #[default]
    FailFast,
    /// Log the error, record it in the report, and continue with the next
    /// sibling.
    SkipBranch,
}
