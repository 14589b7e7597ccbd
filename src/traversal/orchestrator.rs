// src/traversal/orchestrator.rs
//! Depth- and cycle-bounded traversal from one root resource.
//!
//! Every resource is a [`PullTask`] executed by one dispatch function. A
//! task whose reference is already in the visited set is a no-op, and every
//! hop to a different resource consumes one unit of depth, so the walk
//! terminates on any graph.

use super::report::PullReport;
use super::visited::VisitedSet;
use super::FailurePolicy;
use crate::api::ContentGateway;
use crate::error::AppError;
use crate::formatting::{assemble_document, export_table};
use crate::model::{collect_child_resources, Block, ChildResource, ResourceKind};
use crate::output::{display_relative, DocumentSink, OutputLocation};
use crate::types::NotionId;
use futures::future::BoxFuture;

/// One unit of traversal work.
#[derive(Debug, Clone, PartialEq)]
pub enum PullTask {
    Page {
        reference: NotionId,
        location: OutputLocation,
    },
    Database {
        reference: NotionId,
        location: OutputLocation,
    },
}

impl PullTask {
    pub fn new(kind: ResourceKind, reference: NotionId, location: OutputLocation) -> Self {
        match kind {
            ResourceKind::Page => PullTask::Page {
                reference,
                location,
            },
            ResourceKind::Database => PullTask::Database {
                reference,
                location,
            },
        }
    }

    pub fn reference(&self) -> &NotionId {
        match self {
            PullTask::Page { reference, .. } | PullTask::Database { reference, .. } => reference,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            PullTask::Page { .. } => ResourceKind::Page,
            PullTask::Database { .. } => ResourceKind::Database,
        }
    }
}

/// Drives the gateway, the renderers and a sink for one export.
pub struct Orchestrator<'a, G: ?Sized, S: ?Sized> {
    gateway: &'a G,
    sink: &'a S,
    policy: FailurePolicy,
}

impl<'a, G, S> Orchestrator<'a, G, S>
where
    G: ContentGateway + ?Sized,
    S: DocumentSink + ?Sized,
{
    pub fn new(gateway: &'a G, sink: &'a S) -> Self {
        Self {
            gateway,
            sink,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Exports `root` and everything reachable within `depth` hops into the
    /// sink's root.
    pub async fn pull(&self, root: &NotionId, depth: u8) -> Result<PullReport, AppError> {
        let mut visited = VisitedSet::new();
        self.pull_with(root, depth, &mut visited).await
    }

    /// Like [`Orchestrator::pull`], with a caller-provided visited set.
    ///
    /// The root's own failure is always returned, whatever the policy.
    pub async fn pull_with(
        &self,
        root: &NotionId,
        depth: u8,
        visited: &mut VisitedSet,
    ) -> Result<PullReport, AppError> {
        let kind = self.gateway.resolve_kind(root).await?;
        log::info!("Pulling {} {} (depth {})", kind.as_str(), root, depth);

        let mut report = PullReport::default();
        let task = PullTask::new(kind, root.clone(), OutputLocation::root());
        self.execute_task(task, depth, visited, &mut report).await?;

        log::info!("Pull complete: {}", report);
        Ok(report)
    }

    /// The single dispatch point for every task.
    fn execute_task<'s>(
        &'s self,
        task: PullTask,
        depth: u8,
        visited: &'s mut VisitedSet,
        report: &'s mut PullReport,
    ) -> BoxFuture<'s, Result<(), AppError>> {
        Box::pin(async move {
            if !visited.mark(task.reference()) {
                log::debug!(
                    "Skipping {} {}: already visited",
                    task.kind().as_str(),
                    task.reference()
                );
                report.already_visited += 1;
                return Ok(());
            }

            match task {
                PullTask::Page {
                    reference,
                    location,
                } => {
                    self.pull_page(&reference, &location, depth, visited, report)
                        .await
                }
                PullTask::Database {
                    reference,
                    location,
                } => {
                    self.pull_database(&reference, &location, depth, visited, report)
                        .await
                }
            }
        })
    }

    /// Executes a non-root task under the failure policy.
    async fn execute_branch(
        &self,
        task: PullTask,
        depth: u8,
        visited: &mut VisitedSet,
        report: &mut PullReport,
    ) -> Result<(), AppError> {
        let reference = task.reference().clone();
        let kind = task.kind();

        let result = self.execute_task(task, depth, visited, report).await;
        match result {
            Err(e) if self.policy == FailurePolicy::SkipBranch => {
                log::warn!("Skipping {} {}: {}", kind.as_str(), reference, e);
                report.record_failure(reference, kind, &e);
                Ok(())
            }
            result => result,
        }
    }

    async fn pull_page(
        &self,
        reference: &NotionId,
        location: &OutputLocation,
        depth: u8,
        visited: &mut VisitedSet,
        report: &mut PullReport,
    ) -> Result<(), AppError> {
        let page = self.gateway.fetch_page(reference).await?;
        let blocks = self.gateway.fetch_block_tree(reference).await?;

        let path = location.document_path(&page.title);
        let document = assemble_document(&blocks, Some(&page));
        self.sink.write(&path, &document).await?;
        report.pages_written += 1;
        log::info!("Wrote page '{}' to {}", page.title, display_relative(&path));

        if depth > 0 {
            let children = location.nested(&page.title);
            self.pull_children(&blocks, &children, depth - 1, visited, report)
                .await?;
        }
        Ok(())
    }

    async fn pull_database(
        &self,
        reference: &NotionId,
        location: &OutputLocation,
        depth: u8,
        visited: &mut VisitedSet,
        report: &mut PullReport,
    ) -> Result<(), AppError> {
        let database = self.gateway.fetch_database(reference).await?;
        let table_location = location.nested(&database.title);

        let path = table_location.index_path();
        let table = export_table(&database.entries, &database.schema)?;
        self.sink.write(&path, &table).await?;
        report.databases_written += 1;
        log::info!(
            "Wrote database '{}' ({} entries) to {}",
            database.title,
            database.entries.len(),
            display_relative(&path)
        );

        for entry in &database.entries {
            let blocks = self.gateway.fetch_block_tree(entry.id.reference()).await?;
            if blocks.is_empty() {
                continue;
            }

            let entry_path = table_location.document_path(&entry.title);
            let document = assemble_document(&blocks, Some(entry));
            self.sink.write(&entry_path, &document).await?;
            report.entries_written += 1;
            log::debug!(
                "Wrote entry '{}' to {}",
                entry.title,
                display_relative(&entry_path)
            );

            if depth > 0 {
                let children = table_location.nested(&entry.title);
                self.pull_children(&blocks, &children, depth - 1, visited, report)
                    .await?;
            }
        }

        if depth > 0 {
            // Related databases land beside this one
            for edge in database.relation_edges() {
                log::debug!(
                    "Following relation '{}' from {} to {}",
                    edge.property,
                    edge.source,
                    edge.target
                );
                let task = PullTask::Database {
                    reference: NotionId::from(&edge.target),
                    location: location.clone(),
                };
                self.execute_branch(task, depth - 1, visited, report).await?;
            }
        }
        Ok(())
    }

    /// Dispatches every child page and database found in `blocks`, at any
    /// nesting depth, in document order.
    async fn pull_children(
        &self,
        blocks: &[Block],
        location: &OutputLocation,
        depth: u8,
        visited: &mut VisitedSet,
        report: &mut PullReport,
    ) -> Result<(), AppError> {
        for resource in collect_child_resources(blocks) {
            let task = match resource {
                ChildResource::Page { reference, .. } => PullTask::Page {
                    reference,
                    location: location.clone(),
                },
                ChildResource::Database { reference, .. } => PullTask::Database {
                    reference,
                    location: location.clone(),
                },
            };
            self.execute_branch(task, depth, visited, report).await?;
        }
        Ok(())
    }
}
