// src/formatting/block_renderer.rs
//! Block rendering: one block, without its descendants, to Markdown.
//!
//! Tables are the exception: their rows are rendered here, so the document
//! assembler never descends into a table's children.

use super::rich_text::render_rich_text;
use crate::constants::DATABASE_INDEX_FILE;
use crate::model::{
    Block, BlockKind, CalloutContent, ChildResourceContent, CodeContent, LinkContent,
    MediaContent, TableRowContent,
};
use crate::output::encode_link_component;
use crate::types::plain_text;

// --- Public API ---

/// Renders a single block to Markdown.
///
/// The result may span several lines and may be empty for purely structural
/// kinds. Unknown kinds render as an HTML comment; this never fails.
pub fn render_block(block: &Block) -> String {
    match &block.kind {
        BlockKind::Paragraph(b) => render_rich_text(&b.rich_text),
        BlockKind::Heading1(b) => format!("# {}", render_rich_text(&b.rich_text)),
        BlockKind::Heading2(b) => format!("## {}", render_rich_text(&b.rich_text)),
        BlockKind::Heading3(b) => format!("### {}", render_rich_text(&b.rich_text)),
        BlockKind::BulletedListItem(b) => format!("- {}", render_rich_text(&b.rich_text)),
        BlockKind::NumberedListItem(b) => format!("1. {}", render_rich_text(&b.rich_text)),
        BlockKind::ToDo(b) => {
            let mark = if b.checked { "x" } else { " " };
            format!("- [{}] {}", mark, render_rich_text(&b.rich_text))
        }
        BlockKind::Toggle(b) => format!("**{}**", render_rich_text(&b.rich_text)),
        BlockKind::Quote(b) => render_rich_text(&b.rich_text)
            .split('\n')
            .map(|line| format!("> {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
        BlockKind::Callout(b) => format_callout(b),
        BlockKind::Code(b) => format_code_block(b),
        BlockKind::Divider => "---".to_string(),
        BlockKind::Image(b) => format!("![{}]({})", media_label(b, "image"), media_url(b)),
        BlockKind::Video(b) => format_media_link(b, "video"),
        BlockKind::Audio(b) => format_media_link(b, "audio"),
        BlockKind::File(b) => format_media_link(b, "file"),
        BlockKind::Pdf(b) => format_media_link(b, "pdf"),
        BlockKind::Bookmark(b) => format_link(b, &b.url),
        BlockKind::Embed(b) => format_link(b, "embed"),
        BlockKind::LinkPreview(b) => format!("[{}]({})", b.url, b.url),
        BlockKind::Equation(b) => format!("$$\n{}\n$$", b.expression),
        BlockKind::Table(_) => render_table(block.children()),
        BlockKind::TableRow(row) => format_table_row(row),
        BlockKind::TableOfContents
        | BlockKind::Breadcrumb
        | BlockKind::ColumnList
        | BlockKind::Column
        | BlockKind::SyncedBlock => String::new(),
        BlockKind::ChildPage(b) => format_child_link(b, ".md"),
        BlockKind::ChildDatabase(b) => {
            format_child_link(b, &format!("/{}", DATABASE_INDEX_FILE))
        }
        BlockKind::Unsupported { kind } => {
            log::warn!("Unsupported block type '{}' in {}", kind, block.id());
            format!("<!-- Unsupported block type: {} -->", kind)
        }
    }
}

/// Renders table rows as pipe-delimited lines.
///
/// The first row is always the header: a `---` separator with one cell per
/// header column follows it.
pub fn render_table(rows: &[Block]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    for (index, row) in rows.iter().enumerate() {
        let BlockKind::TableRow(content) = &row.kind else {
            continue;
        };
        lines.push(format_table_row(content));
        if index == 0 {
            let separator = vec!["---"; content.cells.len()].join(" | ");
            lines.push(format!("| {} |", separator));
        }
    }

    lines.join("\n")
}

// --- Kind-specific formatting ---

fn format_callout(b: &CalloutContent) -> String {
    let text = render_rich_text(&b.rich_text);
    match b.icon.as_ref().and_then(|icon| icon.emoji()) {
        Some(emoji) => format!("> {} {}", emoji, text),
        None => format!("> {}", text),
    }
}

fn format_code_block(b: &CodeContent) -> String {
    // Notion's label for "no language"
    let language = if b.language == "plain text" {
        ""
    } else {
        b.language.as_str()
    };

    let fence = format!("```{}\n{}\n```", language, plain_text(&b.rich_text));

    if b.caption.is_empty() {
        fence
    } else {
        format!("{}\n*{}*", fence, render_rich_text(&b.caption))
    }
}

fn media_label(b: &MediaContent, kind: &str) -> String {
    let caption = render_rich_text(&b.caption);
    if caption.is_empty() {
        kind.to_string()
    } else {
        caption
    }
}

fn media_url(b: &MediaContent) -> &str {
    b.source.url().unwrap_or_default()
}

fn format_media_link(b: &MediaContent, kind: &str) -> String {
    format!("[{}]({})", media_label(b, kind), media_url(b))
}

fn format_link(b: &LinkContent, fallback_label: &str) -> String {
    let caption = render_rich_text(&b.caption);
    let label = if caption.is_empty() {
        fallback_label
    } else {
        caption.as_str()
    };
    format!("[{}]({})", label, b.url)
}

fn format_table_row(row: &TableRowContent) -> String {
    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|cell| render_rich_text(cell).replace('|', "\\|"))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn format_child_link(b: &ChildResourceContent, suffix: &str) -> String {
    format!(
        "**[{}](./{}{})**",
        b.title,
        encode_link_component(&b.title),
        suffix
    )
}
