//! Kind-specific block payloads.
//!
//! Each struct deserializes from the object the API nests under the block's
//! `type` key, e.g. `{"type": "to_do", "to_do": {"rich_text": [...], "checked": true}}`.

use crate::types::{FileSource, FileUrl, RichTextItem};
use serde::Deserialize;

/// Paragraphs, list items, quotes and toggles.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextBlockContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HeadingContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ToDoContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CodeContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalloutContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    External { external: FileUrl },
    File { file: FileUrl },
    #[serde(other)]
    Other,
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji { emoji } => Some(emoji),
            _ => None,
        }
    }
}

/// Image, video, audio, file and pdf blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaContent {
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
    #[serde(flatten)]
    pub source: FileSource,
}

/// Bookmark and embed blocks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkContent {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkPreviewContent {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EquationContent {
    #[serde(default)]
    pub expression: String,
}

/// Table metadata. The header flags are kept but the renderer always
/// treats the first row as the header.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableContent {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableRowContent {
    #[serde(default)]
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Child page and child database blocks carry only a title.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChildResourceContent {
    #[serde(default)]
    pub title: String,
}
