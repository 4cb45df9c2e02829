use serde::{Deserialize, Serialize};

/// Origin of one rendered terminal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Input,
    Output,
    Error,
    System,
}

/// One immutable line in the session transcript.
///
/// `id` is unique within a session and stable for the life of the line, so
/// renderers can key incremental updates on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub id: String,
    pub kind: LineKind,
    pub content: String,
    /// Milliseconds since the Unix epoch, non-decreasing in transcript order.
    pub timestamp: i64,
}

/// Line produced by a handler before the session stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLine {
    pub kind: LineKind,
    pub content: String,
}

impl PendingLine {
    pub fn new(kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Result of one command invocation, consumed once by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<PendingLine>,
    pub redirect: Option<String>,
    pub clear_requested: bool,
}

impl CommandOutput {
    /// Output with no lines and no side effect.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single output line.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::default().line(LineKind::Output, content)
    }

    /// One output line per item.
    #[must_use]
    pub fn text_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().line_all(LineKind::Output, lines)
    }

    /// Single system line.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::default().line(LineKind::System, content)
    }

    #[must_use]
    pub fn clear() -> Self {
        Self {
            clear_requested: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            redirect: Some(url.into()),
            ..Self::default()
        }
    }

    /// Appends a line of the given kind.
    #[must_use]
    pub fn line(mut self, kind: LineKind, content: impl Into<String>) -> Self {
        self.lines.push(PendingLine::new(kind, content));
        self
    }

    /// Appends one line of the given kind per item.
    #[must_use]
    pub fn line_all<I, S>(mut self, kind: LineKind, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines
            .extend(lines.into_iter().map(|content| PendingLine::new(kind, content)));
        self
    }
}
