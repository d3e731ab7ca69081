//! Palette and glyph data every render function draws from.

/// Which glyph inventory the renderer may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphSet {
    /// Full box-drawing and symbol range.
    #[default]
    Unicode,
    /// 7-bit keyboard characters only.
    Ascii,
}

/// The eight characters needed to draw a box: four corners, two edges,
/// and the left/right joints where a separator meets the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub corner_tl: char,
    pub corner_tr: char,
    pub corner_bl: char,
    pub corner_br: char,
    pub edge_h: char,
    pub edge_v: char,
    pub joint_l: char,
    pub joint_r: char,
}

pub const BORDERS_LIGHT: BorderGlyphs = BorderGlyphs {
    corner_tl: '┌',
    corner_tr: '┐',
    corner_bl: '└',
    corner_br: '┘',
    edge_h: '─',
    edge_v: '│',
    joint_l: '├',
    joint_r: '┤',
};

pub const BORDERS_ROUND: BorderGlyphs = BorderGlyphs {
    corner_tl: '╭',
    corner_tr: '╮',
    corner_bl: '╰',
    corner_br: '╯',
    edge_h: '─',
    edge_v: '│',
    joint_l: '├',
    joint_r: '┤',
};

pub const BORDERS_HEAVY: BorderGlyphs = BorderGlyphs {
    corner_tl: '┏',
    corner_tr: '┓',
    corner_bl: '┗',
    corner_br: '┛',
    edge_h: '━',
    edge_v: '┃',
    joint_l: '┣',
    joint_r: '┫',
};

/// Fallback for terminal fonts without box-drawing coverage.
pub const BORDERS_ASCII: BorderGlyphs = BorderGlyphs {
    corner_tl: '+',
    corner_tr: '+',
    corner_bl: '+',
    corner_br: '+',
    edge_h: '-',
    edge_v: '|',
    joint_l: '+',
    joint_r: '+',
};

/// Escape-code palette plus the glyph choices that go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Title and focused-field tint.
    pub accent: &'static str,
    /// In-flight submission tint.
    pub busy: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    /// Secondary text.
    pub dim: &'static str,
    /// Frame and rule tint.
    pub border: &'static str,
    /// Clears any of the above.
    pub reset: &'static str,
    pub borders: BorderGlyphs,
    /// Status-line phase symbols.
    pub indicator_idle: &'static str,
    pub indicator_busy: &'static str,
    pub indicator_ready: &'static str,
    pub indicator_failed: &'static str,
    pub glyph_set: GlyphSet,
}

impl ThemeColors {
    /// Swap every non-ASCII glyph for a plain-keyboard stand-in.
    #[must_use]
    pub fn ascii_safe(mut self) -> Self {
        self.borders = BORDERS_ASCII;
        self.indicator_idle = "-";
        self.indicator_busy = "*";
        self.indicator_ready = "+";
        self.indicator_failed = "x";
        self.glyph_set = GlyphSet::Ascii;
        self
    }
}
