//! Terminal styling and color detection.

/// ANSI escape codes used by the text renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for location names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for ids, tree lines and unreachable cells.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for distances.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for headers.
    pub const CYAN: &str = "\x1b[36m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is
/// disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            cyan: colors::CYAN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            cyan: "",
        }
    }

    /// Pick a palette from the environment.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// `false` when `NO_COLOR` is set or `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a distance with at most two decimals, dropping a trailing `.00`.
#[must_use]
pub fn format_distance(distance: f64) -> String {
    let rounded = format!("{:.2}", distance);
    match rounded.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => rounded,
    }
}
