//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Two layers:
//! - [`NotionRepository`] is the raw access surface, one method per API
//!   operation, with pagination already drained. [`NotionHttpClient`] is the
//!   production implementation; tests provide in-memory ones.
//! - [`ContentGateway`] builds the four operations the traversal needs on top
//!   of any repository, so every implementation shares the same probing,
//!   data-source resolution and subtree materialization.

mod adapter;
pub mod client;
mod pagination;
pub mod parser;
pub mod responses;

pub use client::NotionHttpClient;

use crate::error::AppError;
use crate::model::{Block, DataSource, Database, DatabaseContainer, Page, ResourceKind};
use crate::types::{DataSourceId, NotionId};
use async_trait::async_trait;

/// Raw read access to a Notion workspace.
///
/// Implementations attribute failures to the requested reference: missing
/// or inaccessible objects as `ResourceNotFound`/`PartialObject`, anything
/// else as `RemoteFetch`.
#[async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError>;

    /// The database container, listing its data sources.
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseContainer, AppError>;

    /// A data source with its property schema.
    async fn retrieve_data_source(&self, id: &DataSourceId) -> Result<DataSource, AppError>;

    /// Every entry of a data source, across all result pages.
    async fn query_data_source(&self, id: &DataSourceId) -> Result<Vec<Page>, AppError>;

    /// Direct children of a page or block, across all result pages.
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;
}

/// The fetch operations the traversal is written against.
#[async_trait]
pub trait ContentGateway: NotionRepository {
    /// Probes whether a reference is a page or a database.
    async fn resolve_kind(&self, reference: &NotionId) -> Result<ResourceKind, AppError> {
        match self.retrieve_page(reference).await {
            Ok(_) => return Ok(ResourceKind::Page),
            Err(e) if e.is_resource_missing() => {
                log::debug!("{} is not a page ({}), trying database", reference, e);
            }
            Err(e) => return Err(e),
        }

        match self.retrieve_database(reference).await {
            Ok(_) => Ok(ResourceKind::Database),
            Err(e) if e.is_resource_missing() => Err(AppError::ResourceNotFound {
                reference: reference.clone(),
            }),
            Err(e) => Err(e),
        }
    }

    async fn fetch_page(&self, reference: &NotionId) -> Result<Page, AppError> {
        self.retrieve_page(reference).await
    }

    /// Resolves the container and its primary data source, then loads the
    /// schema and every entry.
    async fn fetch_database(&self, reference: &NotionId) -> Result<Database, AppError> {
        let container = self.retrieve_database(reference).await?;
        let source = container
            .primary_data_source()
            .ok_or_else(|| AppError::NoDataSource {
                reference: reference.clone(),
            })?;
        log::debug!(
            "Database '{}' uses data source {} ('{}')",
            container.title,
            source.id,
            source.name
        );

        let data_source = self.retrieve_data_source(&source.id).await?;
        let entries = self.query_data_source(&data_source.id).await?;

        Ok(Database {
            id: container.id,
            title: container.title,
            data_source: data_source.id,
            schema: data_source.schema,
            entries,
        })
    }

    /// Fetches a container's children and, recursively, every descendant
    /// belonging to the same content tree. Child pages and databases are
    /// left as leaves.
    async fn fetch_block_tree(&self, reference: &NotionId) -> Result<Vec<Block>, AppError> {
        let mut blocks = self.retrieve_children(reference).await?;
        for block in blocks.iter_mut() {
            if block.has_nested_content() {
                let children = self.fetch_block_tree(&NotionId::from(block.id())).await?;
                block.set_children(children);
            }
        }
        Ok(blocks)
    }
}

#[async_trait]
impl<T: NotionRepository + ?Sized> ContentGateway for T {}
