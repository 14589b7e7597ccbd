// src/formatting/mod.rs
//! Renders fetched content: block trees to Markdown documents, database
//! entries to CSV tables.

pub mod block_renderer;
pub mod databases;
pub mod document;
pub mod properties;
pub mod rich_text;

pub use block_renderer::{render_block, render_table};
pub use databases::export_table;
pub use document::assemble_document;
pub use properties::format_property_value;
pub use rich_text::render_rich_text;
