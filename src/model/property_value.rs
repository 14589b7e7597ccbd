use crate::types::{DateValue, FileReference, RichTextItem, SelectOption, User};
use serde::Deserialize;

/// Property value on an entry page, tagged by the API's `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyValue {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub value: PropertyTypeValue,
}

/// The typed payload of a property value.
///
/// Types this crate does not extract (buttons, verification, ...) decode as
/// `Unsupported` rather than failing the whole entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyTypeValue {
    Title {
        title: Vec<RichTextItem>,
    },
    RichText {
        rich_text: Vec<RichTextItem>,
    },
    Number {
        number: Option<f64>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    Formula {
        formula: FormulaValue,
    },
    Relation {
        relation: Vec<RelationTarget>,
    },
    Rollup {
        rollup: RollupValue,
    },
    People {
        people: Vec<User>,
    },
    Files {
        files: Vec<FileReference>,
    },
    Checkbox {
        checkbox: bool,
    },
    Url {
        url: Option<String>,
    },
    Email {
        email: Option<String>,
    },
    PhoneNumber {
        phone_number: Option<String>,
    },
    CreatedTime {
        created_time: chrono::DateTime<chrono::Utc>,
    },
    CreatedBy {
        created_by: User,
    },
    LastEditedTime {
        last_edited_time: chrono::DateTime<chrono::Utc>,
    },
    LastEditedBy {
        last_edited_by: User,
    },
    UniqueId {
        unique_id: UniqueIdValue,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelationTarget {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UniqueIdValue {
    pub number: Option<i64>,
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Computed formula result, tagged by its own `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Unsupported,
}

/// Rollup result. Array elements are themselves typed property values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupValue {
    Number { number: Option<f64> },
    Date { date: Option<DateValue> },
    Array { array: Vec<PropertyTypeValue> },
    #[serde(other)]
    Unsupported,
}

impl PropertyTypeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyTypeValue::Title { .. } => "title",
            PropertyTypeValue::RichText { .. } => "rich_text",
            PropertyTypeValue::Number { .. } => "number",
            PropertyTypeValue::Select { .. } => "select",
            PropertyTypeValue::MultiSelect { .. } => "multi_select",
            PropertyTypeValue::Status { .. } => "status",
            PropertyTypeValue::Date { .. } => "date",
            PropertyTypeValue::Formula { .. } => "formula",
            PropertyTypeValue::Relation { .. } => "relation",
            PropertyTypeValue::Rollup { .. } => "rollup",
            PropertyTypeValue::People { .. } => "people",
            PropertyTypeValue::Files { .. } => "files",
            PropertyTypeValue::Checkbox { .. } => "checkbox",
            PropertyTypeValue::Url { .. } => "url",
            PropertyTypeValue::Email { .. } => "email",
            PropertyTypeValue::PhoneNumber { .. } => "phone_number",
            PropertyTypeValue::CreatedTime { .. } => "created_time",
            PropertyTypeValue::CreatedBy { .. } => "created_by",
            PropertyTypeValue::LastEditedTime { .. } => "last_edited_time",
            PropertyTypeValue::LastEditedBy { .. } => "last_edited_by",
            PropertyTypeValue::UniqueId { .. } => "unique_id",
            PropertyTypeValue::Unsupported => "unsupported",
        }
    }
}
