//! Command-execution core of a terminal-style portfolio.
//!
//! A [`TerminalSession`] turns raw input lines into transcript
//! [`OutputLine`]s by resolving them against a [`CommandRegistry`]. Handlers
//! read portfolio data through an injected [`portfolio_source::PortfolioSource`]
//! and never render; history and theme selection persist through an injected
//! [`kv_store::KeyValueStore`].
//!
//! # Public API Overview
//! - Build the stock command set with [`builtin_registry`], or register custom
//!   [`CommandHandler`]s on a [`CommandRegistry`].
//! - Drive a session with [`TerminalSession::execute_command`] and read it back
//!   with [`TerminalSession::snapshot`].
//! - Recall history with [`TerminalSession::navigate_history`].

pub mod commands;
pub mod context;
pub mod error;
pub mod history;
pub mod line;
pub mod registry;
pub mod session;
pub mod theme;

pub use crate::commands::builtin_registry;
pub use crate::context::CommandContext;
pub use crate::error::CommandError;
pub use crate::history::{CommandHistory, HistoryDirection, HISTORY_KEY, HISTORY_LIMIT};
pub use crate::line::{CommandOutput, LineKind, OutputLine, PendingLine};
pub use crate::registry::{CommandDescriptor, CommandHandler, CommandRegistry, RegistryError};
pub use crate::session::{ExecutionOutcome, SessionSnapshot, TerminalSession};
pub use crate::theme::{
    builtin_themes, find_theme, Theme, ThemeError, ThemeStore, DEFAULT_THEME, THEME_KEY,
};
