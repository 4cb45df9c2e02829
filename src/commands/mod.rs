//! Built-in command set.

mod args;
mod basic;
mod help;
mod history;
mod profile;
mod projects;
mod theme;

use crate::registry::{CommandDescriptor, CommandRegistry, RegistryError};

pub use args::{is_valid_slug, pad_to_width};

/// Registry holding every built-in command, in `help` listing order.
pub fn builtin_registry() -> Result<CommandRegistry, RegistryError> {
    let mut registry = CommandRegistry::new();
    for descriptor in builtin_descriptors() {
        registry.register(descriptor)?;
    }
    Ok(registry)
}

fn builtin_descriptors() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new(
            "help",
            "list available commands",
            "help [command]",
            help::Help,
        ),
        CommandDescriptor::new("echo", "print arguments", "echo <text...>", basic::Echo),
        CommandDescriptor::new("clear", "clear the terminal", "clear", basic::Clear),
        CommandDescriptor::new("ls", "list projects", "ls", projects::List),
        CommandDescriptor::new("cat", "show project details", "cat <slug>", projects::Show),
        CommandDescriptor::new("cd", "open a project", "cd <slug>", projects::Visit),
        CommandDescriptor::new(
            "open",
            "open a profile link",
            "open <github|linkedin|twitter|website|email>",
            profile::Open,
        ),
        CommandDescriptor::new("whoami", "about me", "whoami", profile::WhoAmI),
        CommandDescriptor::new("contact", "contact details", "contact", profile::Contact),
        CommandDescriptor::new(
            "theme",
            "list or switch colour themes",
            "theme [name]",
            theme::SwitchTheme,
        ),
        CommandDescriptor::new("history", "show command history", "history", history::History),
    ]
}
