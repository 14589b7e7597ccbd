// tests/common/mod.rs
//! In-memory Notion workspace shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use notion_pull::model::{ChildResourceContent, TextBlockContent};
use notion_pull::{
    AppError, Block, BlockId, BlockKind, DataSource, DataSourceId, DataSourceRef, DatabaseContainer,
    DatabaseId, NotionId, NotionRepository, Page, PageId, PropertyKind, PropertySchema,
    PropertyTypeValue, PropertyValue, RichTextItem,
};
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

/// Deterministic reference number `n`.
pub fn id(n: u32) -> NotionId {
    NotionId::parse(&format!("{:032x}", n)).unwrap()
}

fn data_source_id(database: u32) -> DataSourceId {
    DataSourceId::from(id(0x00d5_0000 + database))
}

/// Block IDs live in their own range so they never collide with resources.
fn block_id(n: u32) -> BlockId {
    BlockId::from(id(0x0b10_0000 + n))
}

// --- Fixture builders ---

pub fn page(n: u32, title: &str) -> Page {
    entry(n, title, Vec::new())
}

/// A page with a `Name` title property plus `properties`.
pub fn entry(n: u32, title: &str, properties: Vec<(&str, PropertyTypeValue)>) -> Page {
    entry_in("Name", n, title, properties)
}

/// Like [`entry`], with the title stored under `title_column`.
pub fn entry_in(
    title_column: &str,
    n: u32,
    title: &str,
    properties: Vec<(&str, PropertyTypeValue)>,
) -> Page {
    let mut map = IndexMap::new();
    map.insert(
        title_column.to_string(),
        PropertyValue {
            id: "title".to_string(),
            value: PropertyTypeValue::Title {
                title: vec![RichTextItem::plain_text(title)],
            },
        },
    );
    for (name, value) in properties {
        map.insert(
            name.to_string(),
            PropertyValue {
                id: name.to_lowercase(),
                value,
            },
        );
    }

    Page {
        id: PageId::from(id(n)),
        title: title.to_string(),
        created_time: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        last_edited_time: Utc.with_ymd_and_hms(2024, 3, 2, 17, 45, 30).unwrap(),
        url: None,
        properties: map,
    }
}

pub fn paragraph(n: u32, text: &str) -> Block {
    Block::new(
        block_id(n),
        BlockKind::Paragraph(TextBlockContent {
            rich_text: vec![RichTextItem::plain_text(text)],
        }),
    )
}

/// A toggle whose children are served separately, as the API does.
pub fn toggle(n: u32, text: &str) -> Block {
    let mut block = Block::new(
        block_id(n),
        BlockKind::Toggle(TextBlockContent {
            rich_text: vec![RichTextItem::plain_text(text)],
        }),
    );
    block.common.has_children = true;
    block
}

pub fn toggle_reference(n: u32) -> u32 {
    0x0b10_0000 + n
}

/// A child page block; its ID is the page's ID.
pub fn child_page(page: u32, title: &str) -> Block {
    let mut block = Block::new(
        BlockId::from(id(page)),
        BlockKind::ChildPage(ChildResourceContent {
            title: title.to_string(),
        }),
    );
    block.common.has_children = true;
    block
}

/// A child database block; its ID is the database's ID.
pub fn child_database(database: u32, title: &str) -> Block {
    Block::new(
        BlockId::from(id(database)),
        BlockKind::ChildDatabase(ChildResourceContent {
            title: title.to_string(),
        }),
    )
}

pub fn schema() -> PropertySchema {
    PropertySchema::default().with_property("Name", "title", PropertyKind::Title)
}

pub fn relation_to(schema: PropertySchema, name: &str, target: u32) -> PropertySchema {
    schema.with_property(
        name,
        &name.to_lowercase(),
        PropertyKind::Relation {
            database_id: Some(DatabaseId::from(id(target))),
        },
    )
}

// --- Mock repository ---

struct StoredDatabase {
    container: DatabaseContainer,
    schema: PropertySchema,
    entries: Vec<Page>,
}

/// A workspace held in memory. Every call is logged as `<operation>:<id>`.
#[derive(Default)]
pub struct MockNotion {
    pages: HashMap<NotionId, Page>,
    databases: HashMap<NotionId, StoredDatabase>,
    children: HashMap<NotionId, Vec<Block>>,
    failing: HashSet<NotionId>,
    calls: Mutex<Vec<String>>,
}

impl MockNotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page, blocks: Vec<Block>) -> Self {
        let reference = NotionId::from(&page.id);
        self.children.insert(reference.clone(), blocks);
        self.pages.insert(reference, page);
        self
    }

    pub fn with_database(
        mut self,
        n: u32,
        title: &str,
        schema: PropertySchema,
        entries: Vec<Page>,
    ) -> Self {
        let container = DatabaseContainer {
            id: DatabaseId::from(id(n)),
            title: title.to_string(),
            data_sources: vec![DataSourceRef {
                id: data_source_id(n),
                name: title.to_string(),
            }],
        };
        self.databases.insert(
            id(n),
            StoredDatabase {
                container,
                schema,
                entries,
            },
        );
        self
    }

    /// A database whose container lists no data sources.
    pub fn with_sourceless_database(mut self, n: u32, title: &str) -> Self {
        let container = DatabaseContainer {
            id: DatabaseId::from(id(n)),
            title: title.to_string(),
            data_sources: Vec::new(),
        };
        self.databases.insert(
            id(n),
            StoredDatabase {
                container,
                schema: PropertySchema::default(),
                entries: Vec::new(),
            },
        );
        self
    }

    /// Content of an entry page or of a block with nested content.
    pub fn with_children(mut self, parent: u32, blocks: Vec<Block>) -> Self {
        self.children.insert(id(parent), blocks);
        self
    }

    /// Fetching `n` fails with a transport error.
    pub fn failing(mut self, n: u32) -> Self {
        self.failing.insert(id(n));
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// How many logged calls are exactly `call`.
    pub async fn count(&self, call: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|logged| logged.as_str() == call)
            .count()
    }

    /// Whether any call touched reference `n`.
    pub async fn touched(&self, n: u32) -> bool {
        let needle = id(n).to_string();
        self.calls
            .lock()
            .await
            .iter()
            .any(|logged| logged.ends_with(&needle))
    }

    async fn log(&self, operation: &str, reference: &NotionId) {
        self.calls
            .lock()
            .await
            .push(format!("{}:{}", operation, reference));
    }

    fn check_failing(&self, reference: &NotionId) -> Result<(), AppError> {
        if self.failing.contains(reference) {
            return Err(AppError::RemoteFetch {
                reference: reference.clone(),
                source: Box::new(AppError::MalformedResponse("connection reset".to_string())),
            });
        }
        Ok(())
    }

    fn database_by_source(&self, source: &DataSourceId) -> Option<&StoredDatabase> {
        self.databases.values().find(|stored| {
            stored
                .container
                .primary_data_source()
                .is_some_and(|primary| &primary.id == source)
        })
    }
}

fn not_found(reference: &NotionId) -> AppError {
    AppError::ResourceNotFound {
        reference: reference.clone(),
    }
}

#[async_trait]
impl NotionRepository for MockNotion {
    async fn retrieve_page(&self, reference: &NotionId) -> Result<Page, AppError> {
        self.log("page", reference).await;
        let page = self.pages.get(reference).ok_or_else(|| not_found(reference))?;
        self.check_failing(reference)?;
        Ok(page.clone())
    }

    async fn retrieve_database(
        &self,
        reference: &NotionId,
    ) -> Result<DatabaseContainer, AppError> {
        self.log("database", reference).await;
        let stored = self
            .databases
            .get(reference)
            .ok_or_else(|| not_found(reference))?;
        self.check_failing(reference)?;
        Ok(stored.container.clone())
    }

    async fn retrieve_data_source(&self, source: &DataSourceId) -> Result<DataSource, AppError> {
        self.log("data_source", source.reference()).await;
        let stored = self
            .database_by_source(source)
            .ok_or_else(|| not_found(source.reference()))?;
        Ok(DataSource {
            id: source.clone(),
            schema: stored.schema.clone(),
        })
    }

    async fn query_data_source(&self, source: &DataSourceId) -> Result<Vec<Page>, AppError> {
        self.log("query", source.reference()).await;
        let stored = self
            .database_by_source(source)
            .ok_or_else(|| not_found(source.reference()))?;
        Ok(stored.entries.clone())
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        self.log("children", parent).await;
        Ok(self.children.get(parent).cloned().unwrap_or_default())
    }
}
