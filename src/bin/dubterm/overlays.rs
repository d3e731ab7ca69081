//! Overlay rendering for the submission flow so panel layout stays centralized.

use crossbeam_channel::Sender;

use crate::frame::{
    centered_title_line, display_width, frame_bottom, frame_separator, frame_top,
    truncate_display, wrap_display, FramedLine,
};
use crate::theme::ThemeColors;
use crate::writer::{try_send_message, WriterMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverlayMode {
    None,
    Progress,
    Alert,
    Help,
}

pub(crate) const PROGRESS_HINT: &str = "Longer videos can take several minutes.";
const DISMISS_HINT: &str = "Esc to dismiss";

const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "next / previous field"),
    ("Up / Down", "move between fields"),
    ("Left / Right", "change language or voice"),
    ("Enter", "translate the video"),
    ("Ctrl+L", "clear the form"),
    ("Ctrl+T", "cycle color theme"),
    ("F1", "toggle this help"),
    ("Esc", "dismiss panel"),
    ("Ctrl+C / Ctrl+Q", "quit"),
];

fn overlay_width(cols: u16, min: usize, max: usize) -> usize {
    (cols as usize).clamp(min, max)
}

pub(crate) fn progress_overlay_width(cols: u16) -> usize {
    overlay_width(cols, 30, 44)
}

pub(crate) fn alert_overlay_width(cols: u16) -> usize {
    overlay_width(cols, 36, 58)
}

pub(crate) fn help_overlay_width(cols: u16) -> usize {
    overlay_width(cols, 46, 52)
}

fn centered_colored_line(colors: &ThemeColors, color: &str, text: &str, width: usize) -> String {
    let inner_width = width.saturating_sub(2);
    let clipped = truncate_display(text, inner_width);
    let left_pad = inner_width.saturating_sub(display_width(&clipped)) / 2;
    let mut row = FramedLine::new();
    row.push_plain(&" ".repeat(left_pad));
    row.push_colored(color, &clipped, colors.reset);
    row.into_row(colors, &colors.borders, width)
}

pub(crate) fn format_progress_overlay(
    colors: &ThemeColors,
    spinner: &str,
    caption: &str,
    width: usize,
) -> String {
    let inner_width = width.saturating_sub(2);
    let caption = truncate_display(
        caption,
        inner_width.saturating_sub(display_width(spinner) + 1),
    );
    let text_width = display_width(spinner) + 1 + display_width(&caption);
    let left_pad = inner_width.saturating_sub(text_width) / 2;
    let mut row = FramedLine::new();
    row.push_plain(&" ".repeat(left_pad));
    row.push_colored(colors.busy, spinner, colors.reset);
    row.push_plain(" ");
    row.push_colored(colors.accent, &caption, colors.reset);

    let lines = vec![
        frame_top(colors, &colors.borders, width),
        row.into_row(colors, &colors.borders, width),
        FramedLine::new().into_row(colors, &colors.borders, width),
        centered_colored_line(colors, colors.dim, PROGRESS_HINT, width),
        frame_bottom(colors, &colors.borders, width),
    ];
    lines.join("\n")
}

pub(crate) fn progress_overlay_height() -> usize {
    // frame top + caption row + spacer + hint + frame bottom
    5
}

fn alert_body_rows(body: &str, width: usize) -> Vec<String> {
    let wrap_width = width.saturating_sub(4);
    let mut rows: Vec<String> = body
        .lines()
        .flat_map(|paragraph| wrap_display(paragraph, wrap_width))
        .collect();
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

pub(crate) fn format_alert_overlay(
    colors: &ThemeColors,
    heading: &str,
    body: &str,
    width: usize,
) -> String {
    let mut lines = vec![
        frame_top(colors, &colors.borders, width),
        centered_colored_line(colors, colors.error, heading, width),
        frame_separator(colors, &colors.borders, width),
    ];
    for body_row in alert_body_rows(body, width) {
        let mut row = FramedLine::new();
        row.push_plain(" ");
        row.push_plain(&body_row);
        lines.push(row.into_row(colors, &colors.borders, width));
    }
    lines.push(centered_colored_line(colors, colors.dim, DISMISS_HINT, width));
    lines.push(frame_bottom(colors, &colors.borders, width));
    lines.join("\n")
}

pub(crate) fn alert_overlay_height(body: &str, width: usize) -> usize {
    // frame top + heading + separator + body rows + dismiss hint + frame bottom
    alert_body_rows(body, width).len() + 5
}

pub(crate) fn format_help_overlay(colors: &ThemeColors, width: usize) -> String {
    let mut lines = vec![
        frame_top(colors, &colors.borders, width),
        centered_title_line(colors, &colors.borders, "Shortcuts", width),
        frame_separator(colors, &colors.borders, width),
    ];
    let key_col = HELP_SHORTCUTS
        .iter()
        .map(|(keys, _)| display_width(keys))
        .max()
        .unwrap_or(0);
    for (keys, action) in HELP_SHORTCUTS {
        let mut row = FramedLine::new();
        row.push_plain(" ");
        row.push_colored(colors.accent, keys, colors.reset);
        row.push_plain(&" ".repeat(key_col.saturating_sub(display_width(keys)) + 2));
        row.push_plain(action);
        lines.push(row.into_row(colors, &colors.borders, width));
    }
    lines.push(frame_bottom(colors, &colors.borders, width));
    lines.join("\n")
}

pub(crate) fn help_overlay_height() -> usize {
    // frame top + title + separator + one row per shortcut + frame bottom
    HELP_SHORTCUTS.len() + 4
}

pub(crate) fn show_progress_overlay(
    writer_tx: &Sender<WriterMessage>,
    colors: &ThemeColors,
    cols: u16,
    spinner: &str,
    caption: &str,
) {
    let width = progress_overlay_width(cols);
    let content = format_progress_overlay(colors, spinner, caption, width);
    let height = progress_overlay_height();
    let _ = try_send_message(
        writer_tx,
        WriterMessage::ShowOverlay {
            content,
            height,
            width,
        },
    );
}

pub(crate) fn show_alert_overlay(
    writer_tx: &Sender<WriterMessage>,
    colors: &ThemeColors,
    cols: u16,
    heading: &str,
    body: &str,
) {
    let width = alert_overlay_width(cols);
    let content = format_alert_overlay(colors, heading, body, width);
    let height = alert_overlay_height(body, width);
    let _ = try_send_message(
        writer_tx,
        WriterMessage::ShowOverlay {
            content,
            height,
            width,
        },
    );
}

pub(crate) fn show_help_overlay(writer_tx: &Sender<WriterMessage>, colors: &ThemeColors, cols: u16) {
    let width = help_overlay_width(cols);
    let content = format_help_overlay(colors, width);
    let height = help_overlay_height();
    let _ = try_send_message(
        writer_tx,
        WriterMessage::ShowOverlay {
            content,
            height,
            width,
        },
    );
}
