use std::sync::{Arc, Mutex};

use portfolio_source::PortfolioSource;

use crate::registry::CommandRegistry;
use crate::session::lock_unpoisoned;
use crate::theme::{builtin_themes, Theme, ThemeError, ThemeStore};

/// Capabilities handed to a command handler for one invocation.
///
/// The history is a snapshot taken when the command was submitted and already
/// contains that command.
#[derive(Clone)]
pub struct CommandContext {
    source: Arc<dyn PortfolioSource>,
    registry: Arc<CommandRegistry>,
    history: Vec<String>,
    themes: Arc<Mutex<ThemeStore>>,
}

impl CommandContext {
    pub fn new(
        source: Arc<dyn PortfolioSource>,
        registry: Arc<CommandRegistry>,
        history: Vec<String>,
        themes: Arc<Mutex<ThemeStore>>,
    ) -> Self {
        Self {
            source,
            registry,
            history,
            themes,
        }
    }

    #[must_use]
    pub fn source(&self) -> &dyn PortfolioSource {
        self.source.as_ref()
    }

    #[must_use]
    pub fn commands(&self) -> &CommandRegistry {
        &self.registry
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn current_theme(&self) -> &'static Theme {
        lock_unpoisoned(&self.themes).current()
    }

    #[must_use]
    pub fn themes(&self) -> &'static [Theme] {
        builtin_themes()
    }

    pub fn set_theme(&self, name: &str) -> Result<&'static Theme, ThemeError> {
        lock_unpoisoned(&self.themes).set(name)
    }
}
