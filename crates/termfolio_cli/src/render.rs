//! ANSI rendering of transcript lines in the active palette.

use termfolio::{LineKind, OutputLine, Theme};

pub const PROMPT: &str = "$ ";
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

/// `#rrggbb` to an RGB triple.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    color: bool,
}

impl Painter {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Wraps `text` in a 24-bit foreground colour, or returns it unchanged
    /// when colour is off or `color` is not a hex triple.
    #[must_use]
    pub fn fg(&self, text: &str, color: &str) -> String {
        match parse_hex(color).filter(|_| self.color) {
            Some((r, g, b)) => ansi_wrap(text, &format!("\x1b[38;2;{r};{g};{b}m"), "\x1b[39m"),
            None => text.to_string(),
        }
    }

    #[must_use]
    pub fn line(&self, line: &OutputLine, theme: &Theme) -> String {
        match line.kind {
            LineKind::Input => format!(
                "{}{}",
                self.fg(PROMPT, theme.accent),
                self.fg(&line.content, theme.foreground)
            ),
            LineKind::Output => self.fg(&line.content, theme.foreground),
            LineKind::Error => self.fg(&line.content, theme.error),
            LineKind::System => self.fg(&line.content, theme.muted),
        }
    }

    #[must_use]
    pub fn redirect(&self, url: &str, theme: &Theme) -> String {
        self.fg(&format!("→ open {url}"), theme.accent)
    }

    #[must_use]
    pub fn prompt(&self, theme: &Theme) -> String {
        self.fg(PROMPT, theme.accent)
    }
}
