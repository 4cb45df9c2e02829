use std::io::Cursor;
use std::sync::Arc;

use kv_store::{JsonFileStore, KeyValueStore, MemoryStore};
use portfolio_source::PortfolioSource;
use portfolio_source_mock::MockSource;
use pretty_assertions::assert_eq;
use termfolio::{builtin_registry, TerminalSession};
use termfolio_cli::app::{Repl, ReplControl, ReplOptions, BANNER};

const PLAIN: ReplOptions = ReplOptions {
    color: false,
    echo_input: true,
    prompt: false,
};

fn session(store: Arc<dyn KeyValueStore>) -> TerminalSession {
    TerminalSession::new(
        Arc::new(builtin_registry().expect("builtins")),
        Arc::new(MockSource::default()) as Arc<dyn PortfolioSource>,
        store,
    )
}

async fn transcript(script: &str) -> Vec<String> {
    let mut repl = Repl::new(
        session(Arc::new(MemoryStore::new())),
        Vec::new(),
        PLAIN,
    );
    repl.run(Cursor::new(script.to_string()))
        .await
        .expect("repl run");
    String::from_utf8(repl.into_output())
        .expect("utf8 output")
        .lines()
        .map(str::to_owned)
        .collect()
}

#[tokio::test]
async fn banner_then_commands_until_eof() {
    let output = transcript("echo hi\nnope\n").await;

    let mut expected = BANNER.iter().map(|line| line.to_string()).collect::<Vec<_>>();
    expected.extend([
        "$ echo hi".to_string(),
        "hi".to_string(),
        "$ nope".to_string(),
        "command not found: nope".to_string(),
    ]);
    assert_eq!(output, expected);
}

#[tokio::test]
async fn exit_stops_reading_further_lines() {
    let output = transcript("echo one\nexit\necho two\n").await;

    assert!(output.contains(&"one".to_string()));
    assert!(!output.iter().any(|line| line.contains("two")));
}

#[tokio::test]
async fn redirects_are_printed_as_open_hints() {
    let output = transcript("open github\n").await;

    assert_eq!(
        output.last().map(String::as_str),
        Some("→ open https://github.com/example")
    );
}

#[tokio::test]
async fn clear_rerenders_an_empty_screen() {
    let output = transcript("echo before\nclear\necho after\n").await;

    let clear_at = output
        .iter()
        .position(|line| line == "before")
        .expect("before rendered");
    assert_eq!(&output[clear_at + 1..], &["$ echo after", "after"]);
}

#[tokio::test]
async fn bang_bang_reruns_the_previous_command() {
    let mut repl = Repl::new(
        session(Arc::new(MemoryStore::new())),
        Vec::new(),
        PLAIN,
    );

    assert_eq!(
        repl.handle_line("!!").await.expect("handle"),
        ReplControl::Continue
    );
    repl.handle_line("echo again").await.expect("handle");
    repl.handle_line("!!").await.expect("handle");

    assert_eq!(
        repl.session().history_entries(),
        vec!["echo again", "echo again"]
    );
    let output = String::from_utf8(repl.into_output()).expect("utf8");
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec![
            "!!: no previous command",
            "$ echo again",
            "again",
            "$ echo again",
            "again",
        ]
    );
}

#[tokio::test]
async fn history_persists_between_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("state.json");

    {
        let store = Arc::new(JsonFileStore::open(&path).expect("open")) as Arc<dyn KeyValueStore>;
        let mut repl = Repl::new(session(store), Vec::new(), PLAIN);
        repl.run(Cursor::new("whoami\ntheme nord\n".to_string()))
            .await
            .expect("first run");
    }

    let store = Arc::new(JsonFileStore::open(&path).expect("reopen")) as Arc<dyn KeyValueStore>;
    let mut repl = Repl::new(session(store), Vec::new(), PLAIN);
    repl.handle_line("history").await.expect("handle");

    assert_eq!(repl.session().current_theme().name, "nord");
    let output = String::from_utf8(repl.into_output()).expect("utf8");
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec!["$ history", "1  whoami", "2  theme nord", "3  history"]
    );
}
