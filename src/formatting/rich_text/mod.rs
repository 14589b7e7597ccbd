// src/formatting/rich_text/mod.rs
//! Renders sequences of rich text spans as inline Markdown.

mod annotations;

pub use annotations::apply_annotations;

use crate::types::{Mention, RichTextContent, RichTextItem};

/// Renders spans in order, with no separator between them.
pub fn render_rich_text(items: &[RichTextItem]) -> String {
    items.iter().map(render_span).collect()
}

fn render_span(item: &RichTextItem) -> String {
    match &item.content {
        // Equations bypass styling and links entirely
        RichTextContent::Equation { equation } => format!("${}$", equation.expression),
        RichTextContent::Text { text } => style_and_link(&text.content, item),
        RichTextContent::Mention {
            mention: Mention::Date { date },
        } => style_and_link(&date.to_string(), item),
        RichTextContent::Mention { .. } => style_and_link(&item.plain_text, item),
    }
}

fn style_and_link(content: &str, item: &RichTextItem) -> String {
    let styled = apply_annotations(content, &item.annotations);
    match item.link_target() {
        Some(href) => format!("[{}]({})", styled, href),
        None => styled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Annotations, DateValue};

    #[test]
    fn test_spans_concatenate_without_separator() {
        let items = vec![
            RichTextItem::plain_text("Hello, "),
            RichTextItem::styled(
                "world",
                Annotations {
                    bold: true,
                    ..Default::default()
                },
            ),
            RichTextItem::plain_text("!"),
        ];
        assert_eq!(render_rich_text(&items), "Hello, **world**!");
    }

    #[test]
    fn test_code_with_bold_renders_code_only() {
        let item = RichTextItem::styled(
            "text",
            Annotations {
                code: true,
                bold: true,
                ..Default::default()
            },
        );
        assert_eq!(render_rich_text(&[item]), "`text`");
    }

    #[test]
    fn test_link_wraps_styled_text() {
        let plain = RichTextItem::plain_text("text").linked("https://example.com");
        assert_eq!(render_rich_text(&[plain]), "[text](https://example.com)");

        let italic = RichTextItem::styled(
            "docs",
            Annotations {
                italic: true,
                ..Default::default()
            },
        )
        .linked("https://example.com");
        assert_eq!(render_rich_text(&[italic]), "[*docs*](https://example.com)");
    }

    #[test]
    fn test_equation_ignores_styling_and_link() {
        let mut item = RichTextItem::equation("E = mc^2").linked("https://example.com");
        item.annotations.bold = true;
        assert_eq!(render_rich_text(&[item]), "$E = mc^2$");
    }

    #[test]
    fn test_mentions_render_label_or_date() {
        let page = RichTextItem::mention("Roadmap", Mention::Labelled);
        let range = RichTextItem::mention(
            "ignored label",
            Mention::Date {
                date: DateValue {
                    start: "2024-01-01".to_string(),
                    end: Some("2024-01-05".to_string()),
                    time_zone: None,
                },
            },
        );
        let single = RichTextItem::mention(
            "ignored label",
            Mention::Date {
                date: DateValue {
                    start: "2024-02-01".to_string(),
                    end: None,
                    time_zone: None,
                },
            },
        );

        assert_eq!(render_rich_text(&[page]), "Roadmap");
        assert_eq!(render_rich_text(&[range]), "2024-01-01 → 2024-01-05");
        assert_eq!(render_rich_text(&[single]), "2024-02-01");
    }
}
