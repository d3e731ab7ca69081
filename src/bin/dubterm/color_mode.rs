//! Decides how much color the host terminal can take before a theme paints.

use std::env;

/// Color depth the terminal advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Full 24-bit RGB escapes.
    #[default]
    TrueColor,
    /// The xterm 256-color palette.
    Color256,
    /// The classic 16 ANSI colors.
    Ansi16,
    /// Monochrome output only.
    None,
}

impl ColorMode {
    /// Read the host environment and classify its color support.
    pub fn detect() -> Self {
        Self::classify(
            env::var_os("NO_COLOR").is_some(),
            env::var("COLORTERM").ok().as_deref(),
            env::var("TERM").ok().as_deref(),
        )
    }

    /// `NO_COLOR` silences everything (https://no-color.org/). `COLORTERM`
    /// promises 24-bit, `TERM` separates 256-color hosts from dumb ones, and
    /// anything left gets the 16-color floor.
    fn classify(no_color: bool, colorterm: Option<&str>, term: Option<&str>) -> Self {
        if no_color {
            return Self::None;
        }
        if let Some("truecolor" | "24bit") = colorterm {
            return Self::TrueColor;
        }
        match term {
            Some(t) if t.contains("256color") || t.contains("256-color") => Self::Color256,
            Some("dumb") => Self::None,
            _ => Self::Ansi16,
        }
    }

    pub fn supports_color(self) -> bool {
        self != Self::None
    }

    fn label(self) -> &'static str {
        match self {
            Self::TrueColor => "truecolor",
            Self::Color256 => "256",
            Self::Ansi16 => "ansi",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
