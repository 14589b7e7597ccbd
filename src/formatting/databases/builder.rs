// src/formatting/databases/builder.rs
//! Column derivation and row extraction for database tables.

use crate::formatting::properties::property_cell;
use crate::model::{Page, PropertySchema};
use std::cmp::Ordering;

/// A database flattened to text cells, ready for encoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Builds a [`Table`] from a schema and its entries.
pub struct TableBuilder<'a> {
    schema: &'a PropertySchema,
    entries: &'a [Page],
}

impl<'a> TableBuilder<'a> {
    pub fn new(schema: &'a PropertySchema, entries: &'a [Page]) -> Self {
        Self { schema, entries }
    }

    pub fn build(self) -> Table {
        let columns = self.build_columns();
        let rows = self
            .entries
            .iter()
            .map(|entry| Self::build_row(entry, &columns))
            .collect();

        Table { columns, rows }
    }

    /// Title column first, then every other property in locale order.
    fn build_columns(&self) -> Vec<String> {
        let title = self.schema.title_property();

        let mut rest: Vec<String> = self
            .schema
            .properties
            .keys()
            .filter(|name| Some(name.as_str()) != title)
            .cloned()
            .collect();
        rest.sort_by(|a, b| locale_compare(a, b));

        log::debug!(
            "Table columns: title={:?}, {} others",
            title,
            rest.len()
        );

        title.map(str::to_string).into_iter().chain(rest).collect()
    }

    fn build_row(entry: &Page, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|name| property_cell(entry, name))
            .collect()
    }
}

/// Case-insensitive ordering; on a tie the lower-case spelling sorts first.
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
