// src/formatting/rich_text/annotations.rs
//! Markdown styling for span annotations.

use crate::types::Annotations;

/// Wraps `content` in the Markdown for its annotations.
///
/// Inline code suppresses every other annotation. Otherwise strikethrough
/// is innermost, then emphasis, then underline. Color is never rendered.
pub fn apply_annotations(content: &str, annotations: &Annotations) -> String {
    if annotations.code {
        return format!("`{}`", content);
    }

    let mut result = content.to_string();

    if annotations.strikethrough {
        result = format!("~~{}~~", result);
    }

    result = match (annotations.bold, annotations.italic) {
        (true, true) => format!("***{}***", result),
        (true, false) => format!("**{}**", result),
        (false, true) => format!("*{}*", result),
        (false, false) => result,
    };

    // Underline requires HTML
    if annotations.underline {
        result = format!("<u>{}</u>", result);
    }

    result
}
