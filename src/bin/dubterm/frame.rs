//! Framed-panel helpers shared by the form pane and every overlay.

use crate::theme::{BorderGlyphs, ThemeColors};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[must_use]
pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[must_use]
pub(crate) fn truncate_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut budget = max_width;
    let mut out = String::new();
    for ch in text.chars() {
        match budget.checked_sub(UnicodeWidthChar::width(ch).unwrap_or(0)) {
            Some(rest) => {
                budget = rest;
                out.push(ch);
            }
            None => break,
        }
    }
    out
}

#[must_use]
pub(crate) fn frame_top(colors: &ThemeColors, borders: &BorderGlyphs, width: usize) -> String {
    rule(colors, borders, (borders.corner_tl, borders.corner_tr), width)
}

#[must_use]
pub(crate) fn frame_bottom(colors: &ThemeColors, borders: &BorderGlyphs, width: usize) -> String {
    rule(
        colors,
        borders,
        (borders.corner_bl, borders.corner_br),
        width,
    )
}

#[must_use]
pub(crate) fn frame_separator(colors: &ThemeColors, borders: &BorderGlyphs, width: usize) -> String {
    rule(colors, borders, (borders.joint_l, borders.joint_r), width)
}

/// Horizontal rule spanning `width` columns, capped with the given corner pair.
#[must_use]
fn rule(
    colors: &ThemeColors,
    borders: &BorderGlyphs,
    corners: (char, char),
    width: usize,
) -> String {
    let mut row = String::with_capacity(width.max(2));
    row.push(corners.0);
    for _ in 0..width.saturating_sub(2) {
        row.push(borders.edge_h);
    }
    row.push(corners.1);
    format!("{}{row}{}", colors.border, colors.reset)
}

#[must_use]
pub(crate) fn centered_title_line(
    colors: &ThemeColors,
    borders: &BorderGlyphs,
    title: &str,
    width: usize,
) -> String {
    let inner_width = width.saturating_sub(2);
    let clipped = truncate_display(title, inner_width);
    let pad = inner_width.saturating_sub(display_width(&clipped));
    let edge = format!("{}{}{}", colors.border, borders.edge_v, colors.reset);
    format!(
        "{edge}{}{clipped}{}{edge}",
        " ".repeat(pad / 2),
        " ".repeat(pad - pad / 2),
    )
}

/// Left-aligned framed row builder that tracks visible width while styled
/// segments are appended, so padding math never sees escape codes.
pub(crate) struct FramedLine {
    styled: String,
    visible: usize,
}

impl FramedLine {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            styled: String::new(),
            visible: 0,
        }
    }

    pub(crate) fn push_plain(&mut self, text: &str) {
        self.visible += display_width(text);
        self.styled.push_str(text);
    }

    pub(crate) fn push_colored(&mut self, color: &str, text: &str, reset: &str) {
        self.styled.push_str(color);
        self.push_plain(text);
        self.styled.push_str(reset);
    }

    #[must_use]
    pub(crate) fn visible_width(&self) -> usize {
        self.visible
    }

    /// Close the row with border glyphs, padding the content to `width`.
    #[must_use]
    pub(crate) fn into_row(
        self,
        colors: &ThemeColors,
        borders: &BorderGlyphs,
        width: usize,
    ) -> String {
        let inner_width = width.saturating_sub(2);
        let pad = " ".repeat(inner_width.saturating_sub(self.visible));
        format!(
            "{}{}{}{}{}{}{}{}",
            colors.border,
            borders.edge_v,
            colors.reset,
            self.styled,
            pad,
            colors.border,
            borders.edge_v,
            colors.reset
        )
    }
}

/// Greedy word wrap by display width; tokens wider than `max_width` hard-split.
#[must_use]
pub(crate) fn wrap_display(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let sep = usize::from(!current.is_empty());
            if display_width(&current) + sep + display_width(&word) <= max_width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }
            if current.is_empty() {
                let mut head = truncate_display(&word, max_width);
                if head.is_empty() {
                    // A glyph wider than the budget still has to move somewhere,
                    // or this loop would never advance.
                    head = word.chars().next().map(String::from).unwrap_or_default();
                }
                let rest = word[head.len()..].to_string();
                lines.push(head);
                word = rest;
                if word.is_empty() {
                    break;
                }
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
