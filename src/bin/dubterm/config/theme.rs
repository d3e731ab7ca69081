//! Theme resolution policy so color mode, flags, and saved prefs agree.

use crate::color_mode::ColorMode;
use crate::config::cli::DubConfig;
use crate::theme::{Theme, ThemeColors};

impl DubConfig {
    /// Starting theme: CLI flag wins over the saved name, then coral.
    /// `--no-color` forces the plain theme regardless.
    pub(crate) fn resolved_theme(&self, saved: Option<&str>) -> Theme {
        if self.no_color {
            return Theme::None;
        }
        self.theme_name
            .as_deref()
            .and_then(Theme::from_name)
            .or_else(|| saved.and_then(Theme::from_name))
            .unwrap_or(Theme::Teal)
    }

    /// Detected color mode for the terminal.
    pub(crate) fn color_mode(&self) -> ColorMode {
        if self.no_color {
            ColorMode::None
        } else {
            ColorMode::detect()
        }
    }
}

/// Apply terminal capability and glyph policy to a chosen theme.
///
/// Cycling at runtime keeps the chosen theme stable; this is where an
/// ansi16 terminal demotes a truecolor palette and `--ascii` swaps glyphs.
pub(crate) fn materialize(theme: Theme, mode: ColorMode, ascii: bool) -> ThemeColors {
    let paintable = if !mode.supports_color() {
        Theme::None
    } else if matches!(mode, ColorMode::Ansi16) {
        theme.fallback_for_ansi()
    } else {
        theme
    };
    let colors = paintable.colors();
    if ascii {
        colors.ascii_safe()
    } else {
        colors
    }
}
