// src/lib.rs
//! notion-pull library: exports Notion pages and databases as Markdown and
//! CSV files.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ExportConfig`
//! - **Domain model**: `Page`, `Database`, `Block`, `PropertySchema`, etc.
//! - **Domain types**: `NotionId`, `ApiKey`, `PageId`, `RichTextItem`, etc.
//! - **API client**: `NotionRepository`, `ContentGateway`, `NotionHttpClient`
//! - **Formatting**: `assemble_document`, `render_block`, `export_table`
//! - **Traversal**: `Orchestrator`, `FailurePolicy`, `PullReport`
//! - **Output**: `DocumentSink`, `FileSystemSink`, `MemorySink`

pub mod api;
mod config;
pub mod constants;
mod error;
mod error_recovery;
pub mod formatting;
pub mod model;
pub mod output;
pub mod traversal;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportConfig, TOKEN_ENV_VARS};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{
    collect_child_resources, Block, BlockKind, ChildResource, DataSource, DataSourceRef, Database,
    DatabaseContainer, Page, PropertyDefinition, PropertyKind, PropertySchema, PropertyTypeValue,
    PropertyValue, RelationEdge, ResourceKind,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, DataSourceId, DatabaseId, DateValue, NotionId, PageId,
    RichTextItem, SelectOption, User,
};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    parser::{
        parse_blocks_pagination, parse_data_source_response, parse_database_response,
        parse_entries_pagination, parse_page_response,
    },
    ContentGateway, NotionHttpClient, NotionRepository,
};

// --- Formatting ---
pub use crate::formatting::{
    assemble_document, export_table, format_property_value, render_block, render_rich_text,
};

// --- Traversal ---
pub use crate::traversal::{
    BranchFailure, FailurePolicy, Orchestrator, PullReport, PullTask, VisitedSet,
};

// --- Output ---
pub use crate::output::{DocumentSink, FileSystemSink, MemorySink, OutputLocation};
