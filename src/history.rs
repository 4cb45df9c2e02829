//! Bounded command history with shell-style up/down recall.

use std::collections::VecDeque;

use kv_store::KeyValueStore;
use tracing::warn;

pub const HISTORY_LIMIT: usize = 100;
pub const HISTORY_KEY: &str = "termfolio.history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Towards older entries.
    Up,
    /// Back towards the fresh input line.
    Down,
}

/// Submitted commands, oldest first.
///
/// `cursor` counts back from the newest entry: `0` is the fresh input line,
/// `len()` is the oldest entry. It never leaves `[0, len()]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    cursor: usize,
    draft: String,
}

impl CommandHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from oldest-first entries, keeping the newest
    /// [`HISTORY_LIMIT`].
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        history.reset_cursor();
        history
    }

    /// Restores persisted history. Missing or unreadable state starts empty.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(error) => {
                warn!(error = %error, "failed to read persisted history");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => Self::from_entries(entries),
            Err(error) => {
                warn!(error = %error, "persisted history is not a string array, ignoring it");
                Self::new()
            }
        }
    }

    /// Writes the entries back as a JSON array. Failures are logged only.
    pub fn persist(&self, store: &dyn KeyValueStore) {
        let serialized = match serde_json::to_string(&self.entries) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(error = %error, "failed to serialize history");
                return;
            }
        };

        if let Err(error) = store.set(HISTORY_KEY, &serialized) {
            warn!(error = %error, "failed to persist history");
        }
    }

    /// Appends without deduplication, evicting the oldest entry on overflow.
    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.push_back(command.into());
        while self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_front();
        }
        self.cursor = self.cursor.min(self.entries.len());
    }

    /// Moves the cursor one step and returns the text the input line should
    /// show. `pending` is the current input; it is restored when the cursor
    /// comes back to the fresh line.
    pub fn navigate(&mut self, direction: HistoryDirection, pending: &str) -> String {
        if self.cursor == 0 {
            self.draft = pending.to_string();
        }

        self.cursor = match direction {
            HistoryDirection::Up => (self.cursor + 1).min(self.entries.len()),
            HistoryDirection::Down => self.cursor.saturating_sub(1),
        };

        if self.cursor == 0 {
            return self.draft.clone();
        }

        self.entries
            .get(self.entries.len() - self.cursor)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.draft.clear();
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
