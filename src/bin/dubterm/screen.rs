//! Full-frame renderer: the dubbing form, the result panel, the status row.
//!
//! Produces one string per terminal row for `WriterMessage::Screen`. Panels
//! are fixed-width and horizontally centered; the bottom row is always the
//! status line.

use unicode_width::UnicodeWidthChar;

use crate::form::{FormField, FormState};
use crate::frame::{
    centered_title_line, display_width, frame_bottom, frame_separator, frame_top,
    truncate_display, wrap_display, FramedLine,
};
use crate::results::{ResultsState, VideoStatus};
use crate::status_line::{format_status_line, Phase};
use crate::status_messages::{SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
use crate::theme::{caret_symbol, ellipsis_symbol, selector_arrows, ThemeColors};

const PANEL_WIDTH: usize = 64;
const LABEL_WIDTH: usize = 10;
/// Columns left of a field value: lead space, pointer slot, label, gap.
const VALUE_COL: usize = 1 + 2 + LABEL_WIDTH + 2;
const MAX_TRANSCRIPT_ROWS: usize = 3;

const FORM_TITLE: &str = "Video Dubbing";
const RESULTS_TITLE: &str = "Translation Result";
const PATH_PLACEHOLDER: &str = "no file chosen";
const URL_PLACEHOLDER: &str = "https://";

/// Everything the renderer needs for one frame.
pub(crate) struct ScreenView<'a> {
    pub(crate) colors: &'a ThemeColors,
    pub(crate) form: &'a FormState,
    pub(crate) results: Option<&'a ResultsState>,
    pub(crate) phase: Phase,
    pub(crate) status: &'a str,
    pub(crate) spinner: &'a str,
    pub(crate) rows: u16,
    pub(crate) cols: u16,
}

/// Build the full frame, padded or clipped to the terminal height.
pub(crate) fn format_screen(view: &ScreenView<'_>) -> Vec<String> {
    let cols = usize::from(view.cols);
    let rows = usize::from(view.rows);
    let width = cols.min(PANEL_WIDTH);
    let margin = " ".repeat(cols.saturating_sub(width) / 2);

    let mut lines = Vec::new();
    lines.push(String::new());
    for row in form_panel(view, width) {
        lines.push(format!("{margin}{row}"));
    }
    if let Some(results) = view.results.filter(|r| r.revealed) {
        lines.push(String::new());
        for row in results_panel(view.colors, results, width) {
            lines.push(format!("{margin}{row}"));
        }
    }

    let has_result = view.results.is_some_and(|r| r.revealed);
    let status = format_status_line(
        view.colors,
        view.phase,
        has_result,
        view.status,
        view.spinner,
        cols,
    );
    if rows > lines.len() + 1 {
        lines.resize(rows - 1, String::new());
    } else if rows > 0 {
        lines.truncate(rows - 1);
    }
    lines.push(status);
    lines
}

fn form_panel(view: &ScreenView<'_>, width: usize) -> Vec<String> {
    let colors = view.colors;
    let form = view.form;
    let mut rows = Vec::new();
    rows.push(frame_top(colors, &colors.borders, width));
    rows.push(centered_title_line(colors, &colors.borders, FORM_TITLE, width));
    rows.push(frame_separator(colors, &colors.borders, width));
    rows.push(text_field_row(
        colors,
        form.focus == FormField::VideoPath,
        "Video file",
        &form.video_path,
        PATH_PLACEHOLDER,
        width,
    ));
    rows.push(text_field_row(
        colors,
        form.focus == FormField::VideoUrl,
        "Video URL",
        &form.video_url,
        URL_PLACEHOLDER,
        width,
    ));
    rows.push(selector_row(
        colors,
        form.focus == FormField::Language,
        "Language",
        form.language_label(),
        width,
    ));
    rows.push(selector_row(
        colors,
        form.focus == FormField::Voice,
        "Voice",
        form.voice().name,
        width,
    ));
    rows.push(FramedLine::new().into_row(colors, &colors.borders, width));
    rows.push(submit_row(
        colors,
        form.focus == FormField::Submit,
        view.phase.is_busy(),
        width,
    ));
    rows.push(frame_bottom(colors, &colors.borders, width));
    rows
}

/// Lead space, focus pointer, padded label, gap.
fn field_label(colors: &ThemeColors, focused: bool, label: &str) -> FramedLine {
    let mut line = FramedLine::new();
    line.push_plain(" ");
    if focused {
        let (_, pointer) = selector_arrows(colors.glyph_set);
        line.push_colored(colors.accent, pointer, colors.reset);
        line.push_plain(" ");
    } else {
        line.push_plain("  ");
    }
    let padded = format!("{label:<width$}", width = LABEL_WIDTH);
    let label_color = if focused { colors.accent } else { colors.dim };
    line.push_colored(label_color, &padded, colors.reset);
    line.push_plain("  ");
    line
}

fn text_field_row(
    colors: &ThemeColors,
    focused: bool,
    label: &str,
    value: &str,
    placeholder: &str,
    width: usize,
) -> String {
    let mut line = field_label(colors, focused, label);
    let caret_cols = usize::from(focused);
    let budget = width.saturating_sub(2 + line.visible_width() + caret_cols + 1);
    let ellipsis = ellipsis_symbol(colors.glyph_set);
    if focused {
        line.push_plain(&tail_display(value, budget, ellipsis));
        let caret = caret_symbol(colors.glyph_set).to_string();
        line.push_colored(colors.accent, &caret, colors.reset);
    } else if value.is_empty() {
        line.push_colored(colors.dim, &truncate_display(placeholder, budget), colors.reset);
    } else {
        line.push_plain(&tail_display(value, budget, ellipsis));
    }
    line.into_row(colors, &colors.borders, width)
}

fn selector_row(
    colors: &ThemeColors,
    focused: bool,
    label: &str,
    value: &str,
    width: usize,
) -> String {
    let mut line = field_label(colors, focused, label);
    let arrow_cols = if focused { 4 } else { 0 };
    let budget = width.saturating_sub(2 + line.visible_width() + arrow_cols + 1);
    let shown = truncate_display(value, budget);
    if focused {
        let (left, right) = selector_arrows(colors.glyph_set);
        line.push_colored(colors.accent, left, colors.reset);
        line.push_plain(" ");
        line.push_plain(&shown);
        line.push_plain(" ");
        line.push_colored(colors.accent, right, colors.reset);
    } else {
        line.push_plain(&shown);
    }
    line.into_row(colors, &colors.borders, width)
}

fn submit_row(colors: &ThemeColors, focused: bool, busy: bool, width: usize) -> String {
    let label = if busy {
        SUBMIT_LABEL_BUSY
    } else {
        SUBMIT_LABEL_IDLE
    };
    let text = format!("[ {label} ]");
    let inner = width.saturating_sub(2);
    let pad = inner.saturating_sub(display_width(&text)) / 2;
    let mut line = FramedLine::new();
    line.push_plain(&" ".repeat(pad));
    if busy {
        line.push_colored(colors.busy, &text, colors.reset);
    } else if focused {
        line.push_colored(colors.accent, &text, colors.reset);
    } else {
        line.push_plain(&text);
    }
    line.into_row(colors, &colors.borders, width)
}

fn results_panel(colors: &ThemeColors, results: &ResultsState, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    rows.push(frame_top(colors, &colors.borders, width));
    rows.push(centered_title_line(
        colors,
        &colors.borders,
        RESULTS_TITLE,
        width,
    ));
    rows.push(frame_separator(colors, &colors.borders, width));
    rows.push(video_row(colors, results, width));
    rows.extend(transcript_rows(
        colors,
        "Original",
        &results.result.original_text,
        width,
    ));
    rows.extend(transcript_rows(
        colors,
        "Translated",
        &results.result.translated_text,
        width,
    ));
    rows.push(frame_bottom(colors, &colors.borders, width));
    rows
}

fn video_row(colors: &ThemeColors, results: &ResultsState, width: usize) -> String {
    let mut line = field_label(colors, false, "Video");
    let budget = width.saturating_sub(2 + line.visible_width() + 1);
    let ellipsis = ellipsis_symbol(colors.glyph_set);
    match results.video_status {
        VideoStatus::Loading => {
            let text = truncate_display("checking the rendered file...", budget);
            line.push_colored(colors.dim, &text, colors.reset);
        }
        VideoStatus::Ready => {
            line.push_colored(colors.success, "ready", colors.reset);
            line.push_plain("  ");
            let url = tail_display(
                &results.result.output_video_url,
                budget.saturating_sub(7),
                ellipsis,
            );
            line.push_colored(colors.accent, &url, colors.reset);
        }
        VideoStatus::Unavailable => {
            line.push_colored(colors.warning, "open directly", colors.reset);
            line.push_plain("  ");
            let url = tail_display(
                &results.result.output_video_url,
                budget.saturating_sub(15),
                ellipsis,
            );
            line.push_plain(&url);
        }
    }
    line.into_row(colors, &colors.borders, width)
}

/// Labelled transcript block, wrapped and clipped to a few rows.
fn transcript_rows(colors: &ThemeColors, label: &str, text: &str, width: usize) -> Vec<String> {
    let budget = width.saturating_sub(2 + VALUE_COL + 1).max(1);
    let mut wrapped = wrap_display(text, budget);
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    if wrapped.len() > MAX_TRANSCRIPT_ROWS {
        wrapped.truncate(MAX_TRANSCRIPT_ROWS);
        if let Some(last) = wrapped.last_mut() {
            let clipped = truncate_display(last, budget.saturating_sub(1));
            *last = format!("{clipped}{}", ellipsis_symbol(colors.glyph_set));
        }
    }
    let mut rows = Vec::new();
    for (idx, chunk) in wrapped.iter().enumerate() {
        let mut line = if idx == 0 {
            field_label(colors, false, label)
        } else {
            let mut continuation = FramedLine::new();
            continuation.push_plain(&" ".repeat(VALUE_COL));
            continuation
        };
        line.push_plain(chunk);
        rows.push(line.into_row(colors, &colors.borders, width));
    }
    rows
}

/// Clip from the left, keeping the tail behind a one-cell marker.
fn tail_display(text: &str, max_width: usize, ellipsis: char) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut used = 1usize;
    for ch in text.chars().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        kept.push(ch);
    }
    let mut out = String::new();
    out.push(ellipsis);
    out.extend(kept.into_iter().rev());
    out
}
