//! Domain model: pages, databases, their schemas, and content blocks.

mod block;
pub mod blocks;
pub mod common;
mod property_value;

pub use block::{collect_child_resources, Block, BlockKind, ChildResource};
pub use blocks::*;
pub use common::*;
pub use property_value::{
    FormulaValue, PropertyTypeValue, PropertyValue, RelationTarget, RollupValue, UniqueIdValue,
};

use crate::types::{DataSourceId, DatabaseId, PageId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Whether a reference denotes a page or a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Page,
    Database,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Page => "page",
            ResourceKind::Database => "database",
        }
    }
}

/// A Notion page. Database entries are pages whose `properties` follow the
/// database schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    /// Plain text of the title-typed property; empty when untitled.
    pub title: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    pub url: Option<String>,
    pub properties: IndexMap<String, PropertyValue>,
}

/// A database container as the API reports it, before its data source is
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseContainer {
    pub id: DatabaseId,
    pub title: String,
    pub data_sources: Vec<DataSourceRef>,
}

impl DatabaseContainer {
    /// The first listed data source is the primary one.
    pub fn primary_data_source(&self) -> Option<&DataSourceRef> {
        self.data_sources.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceRef {
    pub id: DataSourceId,
    pub name: String,
}

/// The schema-and-storage container behind a database.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    pub id: DataSourceId,
    pub schema: PropertySchema,
}

/// A fully materialized database: schema plus every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub title: String,
    pub data_source: DataSourceId,
    pub schema: PropertySchema,
    pub entries: Vec<Page>,
}

impl Database {
    /// Relation edges from this database's schema, in schema order.
    pub fn relation_edges(&self) -> Vec<RelationEdge> {
        self.schema
            .properties
            .iter()
            .filter_map(|(name, definition)| match &definition.kind {
                PropertyKind::Relation {
                    database_id: Some(target),
                } => Some(RelationEdge {
                    source: self.id.clone(),
                    property: name.clone(),
                    target: target.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

/// Property name → definition, in the order the API listed them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySchema {
    pub properties: IndexMap<String, PropertyDefinition>,
}

impl PropertySchema {
    pub fn with_property(mut self, name: &str, id: &str, kind: PropertyKind) -> Self {
        self.properties.insert(
            name.to_string(),
            PropertyDefinition {
                id: id.to_string(),
                kind,
            },
        );
        self
    }

    /// Name of the sole title-typed property, if the schema has one.
    pub fn title_property(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|(_, definition)| definition.kind == PropertyKind::Title)
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub id: String,
    pub kind: PropertyKind,
}

/// Schema-level property type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Status,
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula,
    Relation { database_id: Option<DatabaseId> },
    Rollup,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    UniqueId,
    Other(String),
}

impl PropertyKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "status" => Self::Status,
            "date" => Self::Date,
            "people" => Self::People,
            "files" => Self::Files,
            "checkbox" => Self::Checkbox,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "formula" => Self::Formula,
            "relation" => Self::Relation { database_id: None },
            "rollup" => Self::Rollup,
            "created_time" => Self::CreatedTime,
            "created_by" => Self::CreatedBy,
            "last_edited_time" => Self::LastEditedTime,
            "last_edited_by" => Self::LastEditedBy,
            "unique_id" => Self::UniqueId,
            other => Self::Other(other.to_string()),
        }
    }
}

/// (source database, property name, target database) from a relation property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    pub source: DatabaseId,
    pub property: String,
    pub target: DatabaseId,
}
