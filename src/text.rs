//! Label measurement and shortcut formatting.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::style::Styles;

/// Returns the number of terminal columns needed to print `text`.
///
/// The text is split into grapheme clusters and each cluster contributes the
/// width of its first non-zero-width code point, which is our best guess for
/// how a terminal will render it.
pub fn string_width(text: &str) -> usize {
    text.graphemes(true)
        .map(|cluster| {
            cluster
                .chars()
                .filter_map(UnicodeWidthChar::width)
                .find(|width| *width > 0)
                .unwrap_or(0)
        })
        .sum()
}

/// Returns the printed width of a styled line.
///
/// Only span contents count; styling carries no width.
pub fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|span| string_width(&span.content)).sum()
}

/// Formats `label` with the first occurrence of `shortcut` emphasized in
/// bold and the hot-key color.
///
/// The match is case-sensitive. When the shortcut does not occur in the
/// label, or no shortcut is given, the label passes through unchanged.
pub fn format_label_with_shortcut(label: &str, shortcut: Option<char>) -> Line<'static> {
    let Some(shortcut) = shortcut else {
        return Line::from(label.to_owned());
    };
    let Some(at) = label.find(shortcut) else {
        return Line::from(label.to_owned());
    };

    let hot = Style::new()
        .fg(Styles::DEFAULT.text_hot_key)
        .add_modifier(Modifier::BOLD);
    let end = at + shortcut.len_utf8();

    let mut spans = Vec::with_capacity(3);
    if at > 0 {
        spans.push(Span::raw(label[..at].to_owned()));
    }
    spans.push(Span::styled(label[at..end].to_owned(), hot));
    if end < label.len() {
        spans.push(Span::raw(label[end..].to_owned()));
    }
    Line::from(spans)
}
