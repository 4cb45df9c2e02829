//! Named colour palettes and the persisted current selection.

use std::sync::Arc;

use kv_store::KeyValueStore;
use thiserror::Error;
use tracing::warn;

pub const THEME_KEY: &str = "termfolio.theme";
pub const DEFAULT_THEME: &str = "default";

/// Colour palette as `#rrggbb` hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
    pub muted: &'static str,
}

static BUILTIN_THEMES: [Theme; 5] = [
    Theme {
        name: "default",
        background: "#1e1e1e",
        foreground: "#d4d4d4",
        accent: "#4ec9b0",
        error: "#f44747",
        muted: "#808080",
    },
    Theme {
        name: "matrix",
        background: "#000000",
        foreground: "#00ff41",
        accent: "#008f11",
        error: "#ff3131",
        muted: "#003b00",
    },
    Theme {
        name: "dracula",
        background: "#282a36",
        foreground: "#f8f8f2",
        accent: "#bd93f9",
        error: "#ff5555",
        muted: "#6272a4",
    },
    Theme {
        name: "nord",
        background: "#2e3440",
        foreground: "#d8dee9",
        accent: "#88c0d0",
        error: "#bf616a",
        muted: "#4c566a",
    },
    Theme {
        name: "solarized",
        background: "#002b36",
        foreground: "#839496",
        accent: "#b58900",
        error: "#dc322f",
        muted: "#586e75",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("unknown theme: {name} (available: {available})")]
    UnknownTheme { name: String, available: String },
}

#[must_use]
pub fn builtin_themes() -> &'static [Theme] {
    &BUILTIN_THEMES
}

/// Case-insensitive palette lookup.
#[must_use]
pub fn find_theme(name: &str) -> Option<&'static Theme> {
    let name = name.trim();
    BUILTIN_THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

fn default_theme() -> &'static Theme {
    &BUILTIN_THEMES[0]
}

/// Current palette selection, written through to the key-value store.
pub struct ThemeStore {
    current: &'static Theme,
    store: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    /// Restores the persisted selection, falling back to the default palette.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(name)) => find_theme(&name).unwrap_or_else(|| {
                warn!(theme = %name, "persisted theme is unknown, using default");
                default_theme()
            }),
            Ok(None) => default_theme(),
            Err(error) => {
                warn!(error = %error, "failed to read persisted theme, using default");
                default_theme()
            }
        };

        Self { current, store }
    }

    #[must_use]
    pub fn current(&self) -> &'static Theme {
        self.current
    }

    pub fn set(&mut self, name: &str) -> Result<&'static Theme, ThemeError> {
        let theme = find_theme(name).ok_or_else(|| ThemeError::UnknownTheme {
            name: name.to_string(),
            available: available_names(),
        })?;

        self.current = theme;
        if let Err(error) = self.store.set(THEME_KEY, theme.name) {
            warn!(error = %error, theme = theme.name, "failed to persist theme selection");
        }

        Ok(theme)
    }
}

fn available_names() -> String {
    BUILTIN_THEMES
        .iter()
        .map(|theme| theme.name)
        .collect::<Vec<_>>()
        .join(", ")
}
