//! Line-oriented REPL over a [`TerminalSession`].

use std::io::{self, BufRead, Write};

use termfolio::{ExecutionOutcome, HistoryDirection, LineKind, TerminalSession};
use tracing::debug;

use crate::render::{Painter, CLEAR_SCREEN};

pub const BANNER: [&str; 2] = [
    "termfolio: a portfolio you can `ls`",
    "type `help` to list commands, `exit` to leave",
];

const RECALL_PREVIOUS: &str = "!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplOptions {
    /// Render ANSI colours from the active theme.
    pub color: bool,
    /// Render input-kind lines. Off when a terminal already shows the typed text.
    pub echo_input: bool,
    /// Print a prompt before each read.
    pub prompt: bool,
}

pub struct Repl<W: Write> {
    session: TerminalSession,
    out: W,
    painter: Painter,
    options: ReplOptions,
    rendered: usize,
}

impl<W: Write> Repl<W> {
    pub fn new(session: TerminalSession, out: W, options: ReplOptions) -> Self {
        Self {
            session,
            out,
            painter: Painter::new(options.color),
            options,
            rendered: 0,
        }
    }

    #[must_use]
    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads lines until `exit`, `quit` or end of input.
    pub async fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in BANNER {
            self.session.push_line(LineKind::System, line);
        }
        self.render_new()?;

        let mut lines = input.lines();
        loop {
            self.write_prompt()?;
            let Some(line) = lines.next() else {
                break;
            };
            if self.handle_line(&line?).await? == ReplControl::Exit {
                break;
            }
        }

        debug!(session_id = %self.session.id(), "repl finished");
        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> io::Result<ReplControl> {
        let trimmed = line.trim();
        if matches!(trimmed, "exit" | "quit") {
            return Ok(ReplControl::Exit);
        }

        let outcome = if trimmed == RECALL_PREVIOUS {
            self.session.set_pending_input("");
            let recalled = self.session.navigate_history(HistoryDirection::Up);
            if recalled.is_empty() {
                self.session
                    .push_line(LineKind::Error, "!!: no previous command");
                ExecutionOutcome::Failed
            } else {
                self.session.submit().await
            }
        } else {
            self.session.execute_command(line).await
        };

        match outcome {
            ExecutionOutcome::Cleared => self.render_all()?,
            ExecutionOutcome::Redirect(url) => {
                self.render_new()?;
                let theme = self.session.current_theme();
                writeln!(self.out, "{}", self.painter.redirect(&url, theme))?;
            }
            _ => self.render_new()?,
        }
        self.out.flush()?;

        Ok(ReplControl::Continue)
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        if self.options.prompt {
            let prompt = self.painter.prompt(self.session.current_theme());
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Writes lines appended since the last render.
    fn render_new(&mut self) -> io::Result<()> {
        let lines = self.session.snapshot().lines;
        if lines.len() < self.rendered {
            // The transcript shrank, so an earlier clear has been applied.
            return self.render_all();
        }

        let theme = self.session.current_theme();
        for line in &lines[self.rendered..] {
            if line.kind == LineKind::Input && !self.options.echo_input {
                continue;
            }
            writeln!(self.out, "{}", self.painter.line(line, theme))?;
        }
        self.rendered = lines.len();
        Ok(())
    }

    fn render_all(&mut self) -> io::Result<()> {
        if self.painter.color_enabled() {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        self.rendered = 0;
        let lines = self.session.snapshot().lines;
        let theme = self.session.current_theme();
        for line in &lines {
            writeln!(self.out, "{}", self.painter.line(line, theme))?;
        }
        self.rendered = lines.len();
        Ok(())
    }
}
