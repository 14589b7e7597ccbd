// src/output/paths.rs
//! Pure functions for the output layout and filename generation.
//!
//! Nothing here touches the filesystem; paths are relative to the output
//! root and are only materialized by a [`super::DocumentSink`].

use crate::constants::{DATABASE_INDEX_FILE, MAX_FILENAME_LENGTH, UNTITLED_FILENAME};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};

/// Characters `encodeURIComponent` leaves untouched besides alphanumerics.
const LINK_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Sanitizes a title to be safe for use as a file or directory name.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    // Trim whitespace and dots
    let trimmed = replaced.trim().trim_matches('.');

    // Limit length on a character boundary
    let safe_name: String = trimmed.chars().take(MAX_FILENAME_LENGTH).collect();

    if safe_name.is_empty() {
        UNTITLED_FILENAME.to_string()
    } else {
        safe_name
    }
}

/// Percent-encodes a raw title for use inside a relative Markdown link.
pub fn encode_link_component(title: &str) -> String {
    utf8_percent_encode(title, LINK_COMPONENT).to_string()
}

/// A directory inside the output root where a resource is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputLocation {
    dir: PathBuf,
}

impl OutputLocation {
    /// The output root itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn as_path(&self) -> &Path {
        &self.dir
    }

    /// `<location>/<title>.md`
    pub fn document_path(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.md", sanitize_filename(title)))
    }

    /// `<location>/<title>/`, where a resource's children are written.
    pub fn nested(&self, title: &str) -> OutputLocation {
        OutputLocation {
            dir: self.dir.join(sanitize_filename(title)),
        }
    }

    /// `<location>/_index.csv`
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(DATABASE_INDEX_FILE)
    }
}

/// Renders a relative path with forward slashes on every platform.
pub fn display_relative(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
