//! Bottom status row: phase indicator, current message, key hints.

use crate::frame::{display_width, truncate_display};
use crate::theme::{overlay_separator, ThemeColors};

/// Where the submission flow currently is.
///
/// `Checking` covers the health probe, `Submitting` the translate request
/// itself. `Failed` holds until the alert is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Checking,
    Submitting,
    Failed,
}

impl Phase {
    pub(crate) fn is_busy(self) -> bool {
        matches!(self, Phase::Checking | Phase::Submitting)
    }
}

/// Pick the indicator color and glyph for the current phase.
pub(crate) fn phase_indicator(
    colors: &ThemeColors,
    phase: Phase,
    has_result: bool,
) -> (&'static str, &'static str) {
    match phase {
        Phase::Idle if has_result => (colors.success, colors.indicator_ready),
        Phase::Idle => (colors.dim, colors.indicator_idle),
        Phase::Checking | Phase::Submitting => (colors.busy, colors.indicator_busy),
        Phase::Failed => (colors.error, colors.indicator_failed),
    }
}

/// Compose the single status row for the bottom of the frame.
///
/// Layout is ` {indicator} {message}` with right-aligned key hints when the
/// terminal is wide enough to fit both without touching.
pub(crate) fn format_status_line(
    colors: &ThemeColors,
    phase: Phase,
    has_result: bool,
    message: &str,
    spinner: &str,
    cols: usize,
) -> String {
    let (indicator_color, indicator) = phase_indicator(colors, phase, has_result);
    let glyph = if phase.is_busy() { spinner } else { indicator };

    let prefix_width = 1 + display_width(glyph) + 1;
    let message = truncate_display(message, cols.saturating_sub(prefix_width));

    let mut line = String::new();
    line.push(' ');
    line.push_str(indicator_color);
    line.push_str(glyph);
    line.push_str(colors.reset);
    line.push(' ');
    line.push_str(&message);

    let sep = overlay_separator(colors.glyph_set);
    let hints = format!("Tab fields {sep} Enter translate {sep} F1 help");
    let used = prefix_width + display_width(&message);
    let hints_width = display_width(&hints) + 1;
    if used + 2 + hints_width <= cols {
        let gap = cols - used - hints_width;
        line.push_str(&" ".repeat(gap));
        line.push_str(colors.dim);
        line.push_str(&hints);
        line.push_str(colors.reset);
        line.push(' ');
    }
    line
}
