//! Inline value types shared by blocks and property values: rich text spans,
//! dates, select options, users and file references.
//!
//! All of them deserialize straight from the Notion API's JSON shapes.

use serde::Deserialize;
use std::fmt;

/// One inline styled run of text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichTextItem {
    #[serde(flatten)]
    pub content: RichTextContent,
    #[serde(default)]
    pub annotations: Annotations,
    /// Fallback display label supplied by the API for every span kind.
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// The content source of a span; the tag is the API's `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextContent {
    Text { text: TextContent },
    Mention { mention: Mention },
    Equation { equation: Expression },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expression {
    pub expression: String,
}

/// Mentions are never resolved. Only dates carry data the renderer uses;
/// page, database, user and link-preview mentions render their label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    Date { date: DateValue },
    #[serde(other)]
    Labelled,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    /// Kept for completeness; never rendered.
    pub color: String,
}

impl RichTextItem {
    /// An unstyled literal text span.
    pub fn plain_text(text: &str) -> Self {
        Self::styled(text, Annotations::default())
    }

    /// A literal text span with the given annotations.
    pub fn styled(text: &str, annotations: Annotations) -> Self {
        Self {
            content: RichTextContent::Text {
                text: TextContent {
                    content: text.to_string(),
                    link: None,
                },
            },
            annotations,
            plain_text: text.to_string(),
            href: None,
        }
    }

    pub fn equation(expression: &str) -> Self {
        Self {
            content: RichTextContent::Equation {
                equation: Expression {
                    expression: expression.to_string(),
                },
            },
            annotations: Annotations::default(),
            plain_text: expression.to_string(),
            href: None,
        }
    }

    pub fn mention(label: &str, mention: Mention) -> Self {
        Self {
            content: RichTextContent::Mention { mention },
            annotations: Annotations::default(),
            plain_text: label.to_string(),
            href: None,
        }
    }

    /// Attaches a hyperlink target.
    pub fn linked(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// The hyperlink target, preferring the span-level `href`.
    pub fn link_target(&self) -> Option<&str> {
        if let Some(href) = self.href.as_deref() {
            return Some(href);
        }
        match &self.content {
            RichTextContent::Text { text } => text.link.as_ref().map(|link| link.url.as_str()),
            _ => None,
        }
    }
}

/// Concatenates the plain text of every span, ignoring styling.
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

/// A date or date range, kept exactly as the API reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{} → {}", self.start, end),
            None => f.write_str(&self.start),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A workspace user; `name` is absent for partial user objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Where a file lives: an external URL or a Notion-hosted (expiring) URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileSource {
    External { external: FileUrl },
    File { file: FileUrl },
    #[serde(other)]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

impl FileSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            FileSource::External { external } => Some(&external.url),
            FileSource::File { file } => Some(&file.url),
            FileSource::Unavailable => None,
        }
    }
}

/// One entry of a `files` property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileReference {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub source: FileSource,
}
