// src/traversal/report.rs
//! Summary of a traversal run.

use crate::error::AppError;
use crate::model::ResourceKind;
use crate::types::NotionId;
use std::fmt;

/// What one run wrote, skipped, and lost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullReport {
    /// Standalone page documents
    pub pages_written: usize,
    /// Database tables
    pub databases_written: usize,
    /// Entry documents written next to a database table
    pub entries_written: usize,
    /// References reached again after their first dispatch
    pub already_visited: usize,
    /// Branches abandoned under [`super::FailurePolicy::SkipBranch`]
    pub failures: Vec<BranchFailure>,
}

/// A traversal branch that failed and was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchFailure {
    pub reference: NotionId,
    pub kind: ResourceKind,
    pub message: String,
}

impl PullReport {
    pub fn documents_written(&self) -> usize {
        self.pages_written + self.databases_written + self.entries_written
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_failure(
        &mut self,
        reference: NotionId,
        kind: ResourceKind,
        error: &AppError,
    ) {
        self.failures.push(BranchFailure {
            reference,
            kind,
            message: error.to_string(),
        });
    }
}

impl fmt::Display for PullReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} databases, {} entry documents written",
            self.pages_written, self.databases_written, self.entries_written
        )?;
        if self.already_visited > 0 {
            write!(f, "; {} already visited", self.already_visited)?;
        }
        if !self.failures.is_empty() {
            write!(f, "; {} branches failed", self.failures.len())?;
        }
        Ok(())
    }
}
