// src/formatting/properties/mod.rs
//! Property value extraction for table export.

mod formatters;

pub use formatters::{format_property_value, format_timestamp, LIST_SEPARATOR};

use crate::model::Page;

/// The cell text of `name` on `entry`; empty when the entry lacks it.
pub fn property_cell(entry: &Page, name: &str) -> String {
    entry
        .properties
        .get(name)
        .map(|property| format_property_value(&property.value))
        .unwrap_or_default()
}
