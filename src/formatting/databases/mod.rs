// src/formatting/databases/mod.rs
//! Database export: a schema and its entries become a CSV table.

pub mod builder;
mod render;

pub use builder::{Table, TableBuilder};

use crate::error::AppError;
use crate::model::{Page, PropertySchema};

/// Exports `entries` as CSV, one row per entry in the given order.
pub fn export_table(entries: &[Page], schema: &PropertySchema) -> Result<String, AppError> {
    log::debug!(
        "Exporting {} entries across {} properties",
        entries.len(),
        schema.properties.len()
    );
    TableBuilder::new(schema, entries).build().render_csv()
}
