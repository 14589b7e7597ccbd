// src/api/responses.rs
//! Wire shapes of Notion API responses.
//!
//! These mirror the JSON closely and stay lenient: fields whose absence
//! marks a partial object are `Option`s, and block payloads are kept as raw
//! JSON until the adapter knows which kind to decode.

use crate::types::{BlockId, DataSourceId, DatabaseId, NotionId, RichTextItem};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Generic paginated response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionError {
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub id: NotionId,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseObject {
    pub id: DatabaseId,
    #[serde(default)]
    pub title: Option<Vec<RichTextItem>>,
    #[serde(default)]
    pub data_sources: Option<Vec<DataSourceEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceEntry {
    pub id: DataSourceId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceObject {
    pub id: DataSourceId,
    #[serde(default)]
    pub properties: Option<IndexMap<String, PropertyDefinitionObject>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDefinitionObject {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub relation: Option<RelationConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationConfig {
    #[serde(default)]
    pub database_id: Option<DatabaseId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockObject {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    /// Everything else, including the payload keyed by `kind`.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

pub type QueryDataSourceResponse = PaginatedResponse<PageObject>;

pub type BlockChildrenResponse = PaginatedResponse<BlockObject>;
