//! Terminal session: the dispatcher that turns raw input lines into
//! transcript lines and side effects.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::FutureExt;
use kv_store::KeyValueStore;
use portfolio_source::PortfolioSource;
use time::OffsetDateTime;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::history::{CommandHistory, HistoryDirection};
use crate::line::{LineKind, OutputLine, PendingLine};
use crate::registry::CommandRegistry;
use crate::theme::{Theme, ThemeError, ThemeStore};

/// What one `execute_command` call did, for the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// Unknown command name; one error line was appended.
    NotFound { name: String },
    /// Handler output was appended.
    Completed,
    /// The transcript was emptied.
    Cleared,
    /// The caller should navigate to this URL.
    Redirect(String),
    /// Handler failed; one error line was appended.
    Failed,
}

/// Read-only copy of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub lines: Vec<OutputLine>,
    pub pending_input: String,
    pub is_processing: bool,
    pub history_cursor: usize,
}

#[derive(Debug, Default)]
struct SessionState {
    lines: Vec<OutputLine>,
    pending_input: String,
    is_processing: bool,
    next_line_seq: u64,
    last_timestamp: i64,
}

impl SessionState {
    fn append(&mut self, line: PendingLine) {
        self.next_line_seq += 1;
        // Wall clock may step backwards; transcript order must not.
        self.last_timestamp = now_millis().max(self.last_timestamp);
        self.lines.push(OutputLine {
            id: format!("ln-{}", self.next_line_seq),
            kind: line.kind,
            content: line.content,
            timestamp: self.last_timestamp,
        });
    }
}

/// One interactive terminal session.
///
/// Every method takes `&self` so overlapping `execute_command` futures can be
/// driven together. Locks are never held across an await.
pub struct TerminalSession {
    id: Uuid,
    registry: Arc<CommandRegistry>,
    source: Arc<dyn PortfolioSource>,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
    history: Mutex<CommandHistory>,
    themes: Arc<Mutex<ThemeStore>>,
}

impl TerminalSession {
    /// Starts a session, restoring history and theme from `store`.
    pub fn new(
        registry: Arc<CommandRegistry>,
        source: Arc<dyn PortfolioSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let history = CommandHistory::load(store.as_ref());
        let themes = ThemeStore::load(Arc::clone(&store));
        let id = Uuid::new_v4();
        debug!(
            session_id = %id,
            source = source.source_id(),
            history = history.len(),
            theme = themes.current().name,
            "terminal session started"
        );

        Self {
            id,
            registry,
            source,
            store,
            state: Mutex::new(SessionState::default()),
            history: Mutex::new(history),
            themes: Arc::new(Mutex::new(themes)),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs one raw input line to completion.
    pub async fn execute_command(&self, raw: &str) -> ExecutionOutcome {
        let input = raw.trim();
        if input.is_empty() {
            return ExecutionOutcome::Ignored;
        }

        lock_unpoisoned(&self.state).append(PendingLine::new(LineKind::Input, input));
        let history = {
            let mut history = lock_unpoisoned(&self.history);
            history.push(input);
            history.reset_cursor();
            history.persist(self.store.as_ref());
            history.to_vec()
        };

        let mut tokens = input.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_string();
        let args = tokens.map(str::to_owned).collect::<Vec<_>>();

        let descriptor = match self.registry.lookup(&name) {
            Ok(descriptor) => descriptor.clone(),
            Err(_) => {
                debug!(session_id = %self.id, command = %name, "command not found");
                let error = CommandError::CommandNotFound { name: name.clone() };
                self.push_line(LineKind::Error, error.to_string());
                return ExecutionOutcome::NotFound { name };
            }
        };

        let context = CommandContext::new(
            Arc::clone(&self.source),
            Arc::clone(&self.registry),
            history,
            Arc::clone(&self.themes),
        );

        lock_unpoisoned(&self.state).is_processing = true;
        let span = info_span!("command", session_id = %self.id, command = %descriptor.name);
        let result = AssertUnwindSafe(descriptor.handler.run(&args, &context))
            .catch_unwind()
            .instrument(span)
            .await
            .unwrap_or_else(|payload| {
                Err(CommandError::internal(format!(
                    "handler panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

        let mut state = lock_unpoisoned(&self.state);
        let outcome = match result {
            Ok(output) if output.clear_requested => {
                state.lines.clear();
                ExecutionOutcome::Cleared
            }
            Ok(output) => match output.redirect {
                Some(url) => ExecutionOutcome::Redirect(url),
                None => {
                    for line in output.lines {
                        state.append(line);
                    }
                    ExecutionOutcome::Completed
                }
            },
            Err(error) => {
                match &error {
                    CommandError::Internal(_) => {
                        warn!(session_id = %self.id, command = %descriptor.name, error = %error, "command failed");
                    }
                    _ => debug!(session_id = %self.id, command = %descriptor.name, error = %error, "command failed"),
                }
                state.append(PendingLine::new(
                    LineKind::Error,
                    error_line(&descriptor.name, &error),
                ));
                ExecutionOutcome::Failed
            }
        };
        state.is_processing = false;
        debug!(session_id = %self.id, command = %descriptor.name, ?outcome, "command settled");

        outcome
    }

    /// Executes and clears the pending input line.
    pub async fn submit(&self) -> ExecutionOutcome {
        let raw = std::mem::take(&mut lock_unpoisoned(&self.state).pending_input);
        self.execute_command(&raw).await
    }

    pub fn set_pending_input(&self, input: impl Into<String>) {
        lock_unpoisoned(&self.state).pending_input = input.into();
        lock_unpoisoned(&self.history).reset_cursor();
    }

    /// Recalls a history entry into the pending input line and returns it.
    pub fn navigate_history(&self, direction: HistoryDirection) -> String {
        let pending = lock_unpoisoned(&self.state).pending_input.clone();
        let recalled = lock_unpoisoned(&self.history).navigate(direction, &pending);
        lock_unpoisoned(&self.state).pending_input = recalled.clone();
        recalled
    }

    /// Appends a line outside any command, e.g. a start-up banner.
    pub fn push_line(&self, kind: LineKind, content: impl Into<String>) {
        lock_unpoisoned(&self.state).append(PendingLine::new(kind, content));
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let cursor = lock_unpoisoned(&self.history).cursor();
        let state = lock_unpoisoned(&self.state);
        SessionSnapshot {
            lines: state.lines.clone(),
            pending_input: state.pending_input.clone(),
            is_processing: state.is_processing,
            history_cursor: cursor,
        }
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        lock_unpoisoned(&self.state).is_processing
    }

    #[must_use]
    pub fn history_entries(&self) -> Vec<String> {
        lock_unpoisoned(&self.history).to_vec()
    }

    #[must_use]
    pub fn current_theme(&self) -> &'static Theme {
        lock_unpoisoned(&self.themes).current()
    }

    pub fn set_theme(&self, name: &str) -> Result<&'static Theme, ThemeError> {
        lock_unpoisoned(&self.themes).set(name)
    }
}

/// Usage errors already name the command; everything else gets a prefix.
fn error_line(command: &str, error: &CommandError) -> String {
    match error {
        CommandError::Usage { .. } => error.to_string(),
        _ => format!("{command}: {error}"),
    }
}

fn now_millis() -> i64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(i64::MAX)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
