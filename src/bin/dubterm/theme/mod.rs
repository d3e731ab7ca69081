//! Theme registry: each named palette, its aliases, and its runtime fallbacks.

mod colors;

pub use colors::{BorderGlyphs, GlyphSet, ThemeColors};
pub use colors::{BORDERS_ASCII, BORDERS_HEAVY, BORDERS_LIGHT, BORDERS_ROUND};

/// Spinner frames shown while a submission is in flight.
pub const SPINNER_BRAILLE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// ASCII-safe spinner frames.
pub const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];

/// Resolve the spinner frame family for a glyph profile.
#[must_use]
pub fn spinner_frames(glyph_set: GlyphSet) -> &'static [&'static str] {
    match glyph_set {
        GlyphSet::Unicode => SPINNER_BRAILLE,
        GlyphSet::Ascii => SPINNER_ASCII,
    }
}

/// Separator drawn between status-line hint entries.
#[must_use]
pub fn overlay_separator(glyph_set: GlyphSet) -> &'static str {
    match glyph_set {
        GlyphSet::Unicode => "·",
        GlyphSet::Ascii => "|",
    }
}

/// Text-entry caret drawn at the end of the focused input.
#[must_use]
pub fn caret_symbol(glyph_set: GlyphSet) -> char {
    match glyph_set {
        GlyphSet::Unicode => '█',
        GlyphSet::Ascii => '_',
    }
}

/// Arrow pair wrapped around a cyclable selector value.
#[must_use]
pub fn selector_arrows(glyph_set: GlyphSet) -> (&'static str, &'static str) {
    match glyph_set {
        GlyphSet::Unicode => ("◂", "▸"),
        GlyphSet::Ascii => ("<", ">"),
    }
}

/// Single-cell marker for clipped text.
#[must_use]
pub fn ellipsis_symbol(glyph_set: GlyphSet) -> char {
    match glyph_set {
        GlyphSet::Unicode => '…',
        GlyphSet::Ascii => '~',
    }
}

/// Named color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Cyan-accent default that only needs the bright ANSI range.
    #[default]
    Teal,
    /// Arctic blues, needs truecolor. https://www.nordtheme.com
    Nord,
    /// Warm retro palette, needs truecolor. https://github.com/morhetz/gruvbox
    Gruvbox,
    /// Plain 16-color escapes for older terminals.
    Ansi,
    /// No escapes at all.
    None,
}

/// One registry row ties a theme to its canonical name, the extra names
/// `--theme` accepts for it, and its palette.
struct ThemeEntry {
    theme: Theme,
    name: &'static str,
    aliases: &'static [&'static str],
    truecolor: bool,
    palette: ThemeColors,
}

/// Registry order doubles as the Ctrl+T cycle order.
const REGISTRY: &[ThemeEntry] = &[
    ThemeEntry {
        theme: Theme::Teal,
        name: "teal",
        aliases: &["default"],
        truecolor: false,
        palette: PALETTE_TEAL,
    },
    ThemeEntry {
        theme: Theme::Nord,
        name: "nord",
        aliases: &[],
        truecolor: true,
        palette: PALETTE_NORD,
    },
    ThemeEntry {
        theme: Theme::Gruvbox,
        name: "gruvbox",
        aliases: &["retro"],
        truecolor: true,
        palette: PALETTE_GRUVBOX,
    },
    ThemeEntry {
        theme: Theme::Ansi,
        name: "ansi",
        aliases: &["ansi16", "basic"],
        truecolor: false,
        palette: PALETTE_ANSI,
    },
    ThemeEntry {
        theme: Theme::None,
        name: "none",
        aliases: &["plain"],
        truecolor: false,
        palette: PALETTE_PLAIN,
    },
];

impl Theme {
    fn entry(self) -> &'static ThemeEntry {
        // Every variant has a registry row, so the find cannot miss.
        REGISTRY
            .iter()
            .find(|entry| entry.theme == self)
            .unwrap_or(&REGISTRY[0])
    }

    /// Look a theme up by canonical name or alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.to_lowercase();
        REGISTRY
            .iter()
            .find(|entry| entry.name == needle || entry.aliases.contains(&needle.as_str()))
            .map(|entry| entry.theme)
    }

    #[must_use]
    pub fn colors(self) -> ThemeColors {
        self.entry().palette
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Successor in the Ctrl+T rotation, wrapping at the end.
    #[must_use]
    pub fn next_in_cycle(self) -> Self {
        let at = REGISTRY
            .iter()
            .position(|entry| entry.theme == self)
            .unwrap_or(0);
        REGISTRY[(at + 1) % REGISTRY.len()].theme
    }

    /// Nearest theme that renders on a 16-color terminal.
    #[must_use]
    pub fn fallback_for_ansi(self) -> Self {
        if self.entry().truecolor {
            Self::Ansi
        } else {
            self
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const PALETTE_TEAL: ThemeColors = ThemeColors {
    accent: "\x1b[96m",
    busy: "\x1b[93m",
    success: "\x1b[92m",
    warning: "\x1b[33m",
    error: "\x1b[91m",
    dim: "\x1b[90m",
    border: "\x1b[36m",
    reset: "\x1b[0m",
    borders: BORDERS_ROUND,
    indicator_idle: "○",
    indicator_busy: "◔",
    indicator_ready: "●",
    indicator_failed: "✗",
    glyph_set: GlyphSet::Unicode,
};

const PALETTE_NORD: ThemeColors = ThemeColors {
    accent: "\x1b[38;2;136;192;208m",  // frost 88c0d0
    busy: "\x1b[38;2;235;203;139m",    // aurora yellow ebcb8b
    success: "\x1b[38;2;163;190;140m", // aurora green a3be8c
    warning: "\x1b[38;2;208;135;112m", // aurora orange d08770
    error: "\x1b[38;2;191;97;106m",    // aurora red bf616a
    dim: "\x1b[38;2;76;86;106m",       // polar night 4c566a
    border: "\x1b[38;2;94;129;172m",   // frost 5e81ac
    reset: "\x1b[0m",
    borders: BORDERS_ROUND,
    indicator_idle: "◇",
    indicator_busy: "◈",
    indicator_ready: "◆",
    indicator_failed: "✗",
    glyph_set: GlyphSet::Unicode,
};

const PALETTE_GRUVBOX: ThemeColors = ThemeColors {
    accent: "\x1b[38;2;254;128;25m",   // orange fe8019
    busy: "\x1b[38;2;250;189;47m",     // yellow fabd2f
    success: "\x1b[38;2;184;187;38m",  // green b8bb26
    warning: "\x1b[38;2;250;189;47m",  // yellow fabd2f
    error: "\x1b[38;2;251;73;52m",     // red fb4934
    dim: "\x1b[38;2;146;131;116m",     // gray 928374
    border: "\x1b[38;2;142;192;124m",  // aqua 8ec07c
    reset: "\x1b[0m",
    borders: BORDERS_HEAVY,
    indicator_idle: "○",
    indicator_busy: "◔",
    indicator_ready: "●",
    indicator_failed: "✗",
    glyph_set: GlyphSet::Unicode,
};

const PALETTE_ANSI: ThemeColors = ThemeColors {
    accent: "\x1b[96m",
    busy: "\x1b[33m",
    success: "\x1b[32m",
    warning: "\x1b[33m",
    error: "\x1b[31m",
    dim: "\x1b[90m",
    border: "\x1b[37m",
    reset: "\x1b[0m",
    borders: BORDERS_LIGHT,
    indicator_idle: "-",
    indicator_busy: "*",
    indicator_ready: "+",
    indicator_failed: "x",
    glyph_set: GlyphSet::Unicode,
};

const PALETTE_PLAIN: ThemeColors = ThemeColors {
    accent: "",
    busy: "",
    success: "",
    warning: "",
    error: "",
    dim: "",
    border: "",
    reset: "",
    borders: BORDERS_LIGHT,
    indicator_idle: "-",
    indicator_busy: "*",
    indicator_ready: "+",
    indicator_failed: "x",
    glyph_set: GlyphSet::Unicode,
};
