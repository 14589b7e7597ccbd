// src/formatting/document.rs
//! Document assembly: a block tree plus optional page metadata becomes one
//! Markdown document.
//!
//! Blank-line policy: a table follows its predecessor directly and is
//! followed by one blank line. Every other rendered block is separated from
//! what precedes it by exactly one blank line, except that consecutive list
//! items stay together, including a nested list item directly under its
//! parent item. Children of list items, toggles and callouts are indented
//! one level (four spaces); children of structural blocks are flattened in
//! place.

use super::block_renderer::render_block;
use super::properties::format_timestamp;
use crate::constants::INDENT_SPACES;
use crate::model::{Block, BlockKind, Page};
use regex::Regex;

lazy_static::lazy_static! {
    static ref EXCESS_NEWLINES: Regex =
        Regex::new(r"\n{3,}").expect("newline run pattern is a valid regex");
}

// --- Public API ---

/// Assembles a complete Markdown document.
///
/// With a page, the document opens with a frontmatter block carrying its
/// title and timestamps. The result always ends in exactly one newline.
pub fn assemble_document(blocks: &[Block], page: Option<&Page>) -> String {
    let mut document = page.map(render_frontmatter).unwrap_or_default();

    let mut lines = Vec::new();
    render_sequence(blocks, 0, &mut lines, None);
    document.push_str(&lines.join("\n"));

    finalize(&document)
}

// --- Frontmatter ---

fn render_frontmatter(page: &Page) -> String {
    format!(
        "---\ntitle: \"{}\"\ncreated: {}\nlast_edited: {}\n---\n\n",
        escape_title(&page.title),
        format_timestamp(&page.created_time),
        format_timestamp(&page.last_edited_time),
    )
}

/// Backslashes first, so the quote escapes are not doubled.
fn escape_title(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

// --- Body ---

/// Appends the rendering of `blocks` to `lines`.
///
/// `previous` is the block rendered just before the first of `blocks`: the
/// preceding sibling, or the parent for a block's first child. Passing the
/// parent is deliberate, so a list item's first nested item stays tight.
fn render_sequence<'a>(
    blocks: &'a [Block],
    depth: usize,
    lines: &mut Vec<String>,
    mut previous: Option<&'a Block>,
) {
    let indent = " ".repeat(depth * INDENT_SPACES);

    for block in blocks {
        let rendered = render_block(block);

        // Tables follow their predecessor directly; rows are consumed by the
        // table renderer
        if matches!(block.kind, BlockKind::Table(_)) {
            push_indented(lines, &rendered, &indent);
            lines.push(String::new());
            previous = Some(block);
            continue;
        }

        if !rendered.is_empty() {
            let continues_list =
                block.is_list_item() && previous.is_some_and(Block::is_list_item);
            let after_blank = lines.last().is_some_and(|line| line.is_empty());

            if !lines.is_empty() && !after_blank && !continues_list {
                lines.push(String::new());
            }
            push_indented(lines, &rendered, &indent);
        }

        if !block.children().is_empty() {
            let child_depth = if block.indents_children() {
                depth + 1
            } else {
                depth
            };
            render_sequence(block.children(), child_depth, lines, Some(block));
        }

        previous = Some(block);
    }
}

fn push_indented(lines: &mut Vec<String>, rendered: &str, indent: &str) {
    for line in rendered.split('\n') {
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{}{}", indent, line));
        }
    }
}

fn finalize(document: &str) -> String {
    let collapsed = EXCESS_NEWLINES.replace_all(document, "\n\n");
    format!("{}\n", collapsed.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CalloutContent, ChildResourceContent, HeadingContent, TableContent, TableRowContent,
        TextBlockContent, ToDoContent,
    };
    use crate::types::{BlockId, PageId, RichTextItem};
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn id(n: u8) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn text(s: &str) -> Vec<RichTextItem> {
        vec![RichTextItem::plain_text(s)]
    }

    fn paragraph(s: &str) -> Block {
        Block::new(
            id(1),
            BlockKind::Paragraph(TextBlockContent { rich_text: text(s) }),
        )
    }

    fn heading(s: &str) -> Block {
        Block::new(
            id(2),
            BlockKind::Heading1(HeadingContent {
                rich_text: text(s),
                is_toggleable: false,
            }),
        )
    }

    fn bullet(s: &str) -> Block {
        Block::new(
            id(3),
            BlockKind::BulletedListItem(TextBlockContent { rich_text: text(s) }),
        )
    }

    fn todo(s: &str) -> Block {
        Block::new(
            id(4),
            BlockKind::ToDo(ToDoContent {
                rich_text: text(s),
                checked: false,
            }),
        )
    }

    fn row(cells: &[&str]) -> Block {
        Block::new(
            id(5),
            BlockKind::TableRow(TableRowContent {
                cells: cells.iter().map(|cell| text(cell)).collect(),
            }),
        )
    }

    fn page(title: &str) -> Page {
        Page {
            id: PageId::parse("0123456789abcdef0123456789abcdef").unwrap(),
            title: title.to_string(),
            created_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            last_edited_time: Utc.with_ymd_and_hms(2024, 1, 2, 12, 30, 0).unwrap(),
            url: None,
            properties: IndexMap::new(),
        }
    }

    #[test]
    fn test_heading_then_paragraph_has_one_blank_line() {
        let doc = assemble_document(&[heading("Title"), paragraph("Body")], None);
        assert_eq!(doc, "# Title\n\nBody\n");
    }

    #[test]
    fn test_consecutive_list_items_are_grouped() {
        let doc = assemble_document(&[bullet("one"), bullet("two"), todo("three")], None);
        assert_eq!(doc, "- one\n- two\n- [ ] three\n");
    }

    #[test]
    fn test_list_then_paragraph_is_separated() {
        let doc = assemble_document(&[bullet("one"), paragraph("after")], None);
        assert_eq!(doc, "- one\n\nafter\n");
    }

    #[test]
    fn test_list_children_are_indented() {
        let parent = bullet("parent").with_children(vec![bullet("child"), bullet("sibling")]);
        let doc = assemble_document(&[parent, bullet("next")], None);
        assert_eq!(doc, "- parent\n    - child\n    - sibling\n- next\n");
    }

    #[test]
    fn test_toggle_and_callout_indent_children() {
        let toggle = Block::new(
            id(6),
            BlockKind::Toggle(TextBlockContent {
                rich_text: text("More"),
            }),
        )
        .with_children(vec![paragraph("hidden"), paragraph("also hidden")]);
        let callout = Block::new(
            id(7),
            BlockKind::Callout(CalloutContent {
                rich_text: text("Note"),
                icon: None,
            }),
        )
        .with_children(vec![paragraph("detail")]);

        let doc = assemble_document(&[toggle, callout], None);
        assert_eq!(
            doc,
            "**More**\n\n    hidden\n\n    also hidden\n\n> Note\n\n    detail\n"
        );
    }

    #[test]
    fn test_structural_containers_flatten_children() {
        let columns = Block::new(id(8), BlockKind::ColumnList).with_children(vec![
            Block::new(id(9), BlockKind::Column).with_children(vec![paragraph("left")]),
            Block::new(id(10), BlockKind::Column).with_children(vec![paragraph("right")]),
        ]);
        let doc = assemble_document(&[heading("Layout"), columns], None);
        assert_eq!(doc, "# Layout\n\nleft\n\nright\n");
    }

    #[test]
    fn test_table_follows_directly_and_is_followed_by_blank_line() {
        let table = Block::new(
            id(11),
            BlockKind::Table(TableContent {
                table_width: 2,
                has_column_header: true,
                has_row_header: false,
            }),
        )
        .with_children(vec![row(&["a", "b"]), row(&["1", "2"])]);

        let doc = assemble_document(&[paragraph("before"), table, paragraph("after")], None);
        assert_eq!(
            doc,
            "before\n| a | b |\n| --- | --- |\n| 1 | 2 |\n\nafter\n"
        );
    }

    #[test]
    fn test_trailing_table_ends_document() {
        let table = Block::new(id(13), BlockKind::Table(TableContent::default()))
            .with_children(vec![row(&["a", "b"])]);

        let doc = assemble_document(&[paragraph("before"), table], None);
        assert_eq!(doc, "before\n| a | b |\n| --- | --- |\n");
    }

    #[test]
    fn test_multiline_blocks_indent_each_line() {
        let code = Block::new(
            id(12),
            BlockKind::Code(crate::model::CodeContent {
                rich_text: text("let x = 1;\n\nlet y = 2;"),
                language: "rust".to_string(),
                caption: Vec::new(),
            }),
        );
        let doc = assemble_document(&[bullet("step").with_children(vec![code])], None);
        assert_eq!(
            doc,
            "- step\n\n    ```rust\n    let x = 1;\n\n    let y = 2;\n    ```\n"
        );
    }

    #[test]
    fn test_frontmatter_escapes_title() {
        let doc = assemble_document(&[paragraph("Hello")], Some(&page(r#"Say "hi" \ bye"#)));
        assert_eq!(
            doc,
            "---\ntitle: \"Say \\\"hi\\\" \\\\ bye\"\ncreated: 2024-01-01T00:00:00.000Z\nlast_edited: 2024-01-02T12:30:00.000Z\n---\n\nHello\n"
        );
    }

    #[test]
    fn test_empty_document_is_single_newline() {
        assert_eq!(assemble_document(&[], None), "\n");
    }

    #[test]
    fn test_no_run_of_three_newlines_survives() {
        let blocks = vec![
            paragraph("a"),
            Block::new(id(13), BlockKind::Divider),
            paragraph("line\n\n\n\nbreaks"),
            Block::new(
                id(14),
                BlockKind::ChildPage(ChildResourceContent {
                    title: "Child".to_string(),
                }),
            ),
        ];
        let doc = assemble_document(&blocks, None);
        assert!(!doc.contains("\n\n\n"));
        assert!(doc.ends_with("**[Child](./Child.md)**\n"));
    }

    #[test]
    fn test_full_document_snapshot() {
        let blocks = vec![
            heading("Weekly sync"),
            paragraph("Agenda for the week."),
            bullet("Review roadmap").with_children(vec![todo("Draft Q3 goals")]),
            bullet("Hiring update"),
            Block::new(id(15), BlockKind::Divider),
            Block::new(
                id(16),
                BlockKind::ChildDatabase(ChildResourceContent {
                    title: "Action Items".to_string(),
                }),
            ),
        ];

        insta::assert_snapshot!(assemble_document(&blocks, Some(&page("Sync"))), @r###"
        ---
        title: "Sync"
        created: 2024-01-01T00:00:00.000Z
        last_edited: 2024-01-02T12:30:00.000Z
        ---

        # Weekly sync

        Agenda for the week.

        - Review roadmap
            - [ ] Draft Q3 goals
        - Hiring update

        ---

        **[Action Items](./Action%20Items/_index.csv)**
        "###);
    }
}
