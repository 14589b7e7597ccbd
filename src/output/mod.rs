// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! `paths` decides where each resource lands (pure functions); `writer`
//! performs the writes.

mod paths;
mod writer;

pub use paths::{display_relative, encode_link_component, sanitize_filename, OutputLocation};
pub use writer::{DocumentSink, FileSystemSink, MemorySink};
