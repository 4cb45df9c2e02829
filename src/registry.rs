use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::line::CommandOutput;

/// Capability every registered command implements.
///
/// Handlers may await facade fetches; they never touch session state directly
/// and report malformed arguments through [`CommandError::Usage`].
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    async fn run(
        &self,
        args: &[String],
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError>;
}

/// Immutable registry entry.
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        usage: impl Into<String>,
        handler: impl CommandHandler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage: usage.into(),
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command already registered: {name}")]
    DuplicateCommand { name: String },

    #[error("command not found: {name}")]
    NotFound { name: String },
}

/// Name → descriptor map, populated once at start-up.
///
/// Keys are lowercased; registration order is kept for `help` listings.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    index: HashMap<String, usize>,
    descriptors: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        let key = descriptor.name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateCommand {
                name: descriptor.name,
            });
        }

        self.index.insert(key, self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&CommandDescriptor, RegistryError> {
        self.index
            .get(&name.to_lowercase())
            .map(|&position| &self.descriptors[position])
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.descriptors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
