// src/formatting/properties/formatters.rs
//! Type-specific conversions from property values to cell text.

use crate::model::{
    FormulaValue, PropertyTypeValue, RelationTarget, RollupValue, UniqueIdValue,
};
use crate::types::{plain_text, DateValue, FileReference, SelectOption, User};
use chrono::{DateTime, SecondsFormat, Utc};

/// Separator between the elements of multi-valued properties.
pub const LIST_SEPARATOR: &str = "; ";

// --- Main Formatting Entry Point ---

/// Flattens a property value to the text of one table cell.
///
/// Absent values become the empty string. Rich text is reduced to its plain
/// text, never Markdown.
pub fn format_property_value(value: &PropertyTypeValue) -> String {
    use PropertyTypeValue::*;

    match value {
        Title { title } => plain_text(title),
        RichText { rich_text } => plain_text(rich_text),
        Number { number } => format_number(*number),
        Select { select } => format_option(select.as_ref()),
        Status { status } => format_option(status.as_ref()),
        MultiSelect { multi_select } => format_multi_select(multi_select),
        Date { date } => format_date(date.as_ref()),
        Checkbox { checkbox } => checkbox.to_string(),
        Url { url } => url.clone().unwrap_or_default(),
        Email { email } => email.clone().unwrap_or_default(),
        PhoneNumber { phone_number } => phone_number.clone().unwrap_or_default(),
        Relation { relation } => format_relation(relation),
        People { people } => format_people(people),
        Files { files } => format_files(files),
        Formula { formula } => format_formula(formula),
        Rollup { rollup } => format_rollup(rollup),
        UniqueId { unique_id } => format_unique_id(unique_id),
        CreatedTime { created_time } => format_timestamp(created_time),
        LastEditedTime { last_edited_time } => format_timestamp(last_edited_time),
        CreatedBy { created_by } => created_by.display_name().to_string(),
        LastEditedBy { last_edited_by } => last_edited_by.display_name().to_string(),
        Unsupported => String::new(),
    }
}

// --- Scalars ---

/// Shortest decimal form: `3`, `3.5`, `-0.25`.
fn format_number(number: Option<f64>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

fn format_option(option: Option<&SelectOption>) -> String {
    option.map(|opt| opt.name.clone()).unwrap_or_default()
}

fn format_date(date: Option<&DateValue>) -> String {
    date.map(DateValue::to_string).unwrap_or_default()
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn format_unique_id(unique_id: &UniqueIdValue) -> String {
    match (unique_id.prefix.as_deref(), unique_id.number) {
        (Some(prefix), Some(number)) if !prefix.is_empty() => format!("{}-{}", prefix, number),
        (_, Some(number)) => number.to_string(),
        (_, None) => String::new(),
    }
}

// --- Lists ---

fn format_multi_select(options: &[SelectOption]) -> String {
    join(options.iter().map(|opt| opt.name.as_str()))
}

/// Relations are exported as raw target IDs; targets are never resolved.
fn format_relation(relation: &[RelationTarget]) -> String {
    join(relation.iter().map(|target| target.id.as_str()))
}

fn format_people(people: &[User]) -> String {
    join(people.iter().map(User::display_name))
}

fn format_files(files: &[FileReference]) -> String {
    join(
        files
            .iter()
            .map(|file| file.source.url().unwrap_or(file.name.as_str())),
    )
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(LIST_SEPARATOR)
}

// --- Computed values ---

fn format_formula(formula: &FormulaValue) -> String {
    match formula {
        FormulaValue::String { string } => string.clone().unwrap_or_default(),
        FormulaValue::Number { number } => format_number(*number),
        FormulaValue::Boolean { boolean } => boolean.map(|b| b.to_string()).unwrap_or_default(),
        FormulaValue::Date { date } => format_date(date.as_ref()),
        FormulaValue::Unsupported => String::new(),
    }
}

fn format_rollup(rollup: &RollupValue) -> String {
    match rollup {
        RollupValue::Number { number } => format_number(*number),
        RollupValue::Date { date } => format_date(date.as_ref()),
        RollupValue::Array { array } => array
            .iter()
            .map(format_property_value)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        RollupValue::Unsupported => String::new(),
    }
}
