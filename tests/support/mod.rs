#![allow(dead_code)]

use std::sync::Arc;

use kv_store::{KeyValueStore, MemoryStore};
use portfolio_source::PortfolioSource;
use portfolio_source_mock::MockSource;
use termfolio::{builtin_registry, LineKind, OutputLine, TerminalSession};

pub fn session_with(source: MockSource) -> (TerminalSession, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = session_with_store(source, Arc::clone(&store) as Arc<dyn KeyValueStore>);
    (session, store)
}

pub fn session_with_store(source: MockSource, store: Arc<dyn KeyValueStore>) -> TerminalSession {
    let registry = builtin_registry().expect("builtin commands register cleanly");
    TerminalSession::new(
        Arc::new(registry),
        Arc::new(source) as Arc<dyn PortfolioSource>,
        store,
    )
}

pub fn default_session() -> TerminalSession {
    session_with(MockSource::default()).0
}

pub fn kinds_and_contents(lines: &[OutputLine]) -> Vec<(LineKind, String)> {
    lines
        .iter()
        .map(|line| (line.kind, line.content.clone()))
        .collect()
}

pub fn contents_of(lines: &[OutputLine], kind: LineKind) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.kind == kind)
        .map(|line| line.content.clone())
        .collect()
}
