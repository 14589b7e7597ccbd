// src/api/adapter.rs
//! Converts wire responses into the domain model.
//!
//! Conversion is forgiving about content and strict about shape: an entry
//! property or block payload that fails to decode is logged and degraded,
//! but a page or database missing the fields that make it a full object is
//! reported as a partial object.

use super::responses::{BlockObject, DataSourceObject, DatabaseObject, PageObject};
use crate::error::AppError;
use crate::model::{
    Block, BlockKind, DataSource, DataSourceRef, DatabaseContainer, Page, PropertyKind,
    PropertySchema, PropertyTypeValue, PropertyValue,
};
use crate::types::{plain_text, NotionId};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn convert_page(object: PageObject) -> Result<Page, AppError> {
    let partial = || AppError::PartialObject {
        reference: object.id.clone(),
        object: "page",
    };

    let raw_properties = object.properties.ok_or_else(partial)?;
    let created_time = object.created_time.ok_or_else(partial)?;
    let last_edited_time = object.last_edited_time.ok_or_else(partial)?;

    let properties = convert_properties(&object.id, raw_properties);
    let title = properties
        .values()
        .find_map(|property| match &property.value {
            PropertyTypeValue::Title { title } => Some(plain_text(title)),
            _ => None,
        })
        .unwrap_or_default();

    Ok(Page {
        id: object.id.into(),
        title,
        created_time,
        last_edited_time,
        url: object.url,
        properties,
    })
}

fn convert_properties(
    page: &NotionId,
    raw: IndexMap<String, Value>,
) -> IndexMap<String, PropertyValue> {
    raw.into_iter()
        .filter_map(|(name, value)| match serde_json::from_value::<PropertyValue>(value) {
            Ok(property) => Some((name, property)),
            Err(err) => {
                log::warn!(
                    "Skipping property '{}' on page {}: {}",
                    name,
                    page.as_str(),
                    err
                );
                None
            }
        })
        .collect()
}

pub fn convert_database(object: DatabaseObject) -> Result<DatabaseContainer, AppError> {
    let reference = NotionId::from(&object.id);
    let (Some(title), Some(data_sources)) = (object.title, object.data_sources) else {
        return Err(AppError::PartialObject {
            reference,
            object: "database",
        });
    };

    Ok(DatabaseContainer {
        id: object.id,
        title: plain_text(&title),
        data_sources: data_sources
            .into_iter()
            .map(|entry| DataSourceRef {
                id: entry.id,
                name: entry.name,
            })
            .collect(),
    })
}

pub fn convert_data_source(object: DataSourceObject) -> Result<DataSource, AppError> {
    let Some(properties) = object.properties else {
        return Err(AppError::PartialObject {
            reference: NotionId::from(&object.id),
            object: "data source",
        });
    };

    let mut schema = PropertySchema::default();
    for (name, definition) in properties {
        let kind = match PropertyKind::from_type_name(&definition.kind) {
            PropertyKind::Relation { .. } => PropertyKind::Relation {
                database_id: definition.relation.and_then(|relation| relation.database_id),
            },
            kind => kind,
        };
        schema = schema.with_property(&name, &definition.id, kind);
    }

    Ok(DataSource {
        id: object.id,
        schema,
    })
}

pub fn convert_block(object: BlockObject) -> Block {
    let BlockObject {
        id,
        kind,
        has_children,
        mut fields,
    } = object;
    let payload = fields.remove(&kind).unwrap_or(Value::Null);

    let decoded = match kind.as_str() {
        "paragraph" => decode(payload).map(BlockKind::Paragraph),
        "heading_1" => decode(payload).map(BlockKind::Heading1),
        "heading_2" => decode(payload).map(BlockKind::Heading2),
        "heading_3" => decode(payload).map(BlockKind::Heading3),
        "bulleted_list_item" => decode(payload).map(BlockKind::BulletedListItem),
        "numbered_list_item" => decode(payload).map(BlockKind::NumberedListItem),
        "to_do" => decode(payload).map(BlockKind::ToDo),
        "toggle" => decode(payload).map(BlockKind::Toggle),
        "quote" => decode(payload).map(BlockKind::Quote),
        "callout" => decode(payload).map(BlockKind::Callout),
        "code" => decode(payload).map(BlockKind::Code),
        "divider" => Ok(BlockKind::Divider),
        "image" => decode(payload).map(BlockKind::Image),
        "video" => decode(payload).map(BlockKind::Video),
        "audio" => decode(payload).map(BlockKind::Audio),
        "file" => decode(payload).map(BlockKind::File),
        "pdf" => decode(payload).map(BlockKind::Pdf),
        "bookmark" => decode(payload).map(BlockKind::Bookmark),
        "embed" => decode(payload).map(BlockKind::Embed),
        "link_preview" => decode(payload).map(BlockKind::LinkPreview),
        "equation" => decode(payload).map(BlockKind::Equation),
        "table" => decode(payload).map(BlockKind::Table),
        "table_row" => decode(payload).map(BlockKind::TableRow),
        "table_of_contents" => Ok(BlockKind::TableOfContents),
        "breadcrumb" => Ok(BlockKind::Breadcrumb),
        "column_list" => Ok(BlockKind::ColumnList),
        "column" => Ok(BlockKind::Column),
        "synced_block" => Ok(BlockKind::SyncedBlock),
        "child_page" => decode(payload).map(BlockKind::ChildPage),
        "child_database" => decode(payload).map(BlockKind::ChildDatabase),
        _ => Ok(BlockKind::Unsupported { kind: kind.clone() }),
    };

    let kind = decoded.unwrap_or_else(|err| {
        log::warn!(
            "Block {} of kind '{}' has an undecodable payload: {}",
            id.as_str(),
            kind,
            err
        );
        BlockKind::Unsupported { kind: kind.clone() }
    });

    let mut block = Block::new(id, kind);
    block.common.has_children = has_children;
    block
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload)
}
