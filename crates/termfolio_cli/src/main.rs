use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use kv_store::{default_state_path, JsonFileStore, KeyValueStore, MemoryStore};
use termfolio::{builtin_registry, TerminalSession};
use termfolio_cli::app::{Repl, ReplOptions};
use termfolio_cli::config::EnvConfig;
use termfolio_cli::{logging, sources};
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = EnvConfig::from_env()?;
    logging::init(config.log_file.as_deref())?;

    let registry = builtin_registry().context("failed to register built-in commands")?;
    let source = sources::source_for_config(&config)?;
    let store = open_store(&config);
    let session = TerminalSession::new(Arc::new(registry), source, store);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let interactive = stdin.is_terminal();
    let options = ReplOptions {
        color: !config.no_color && stdout.is_terminal(),
        echo_input: !interactive,
        prompt: interactive,
    };

    let mut repl = Repl::new(session, stdout.lock(), options);
    repl.run(stdin.lock()).await?;
    Ok(())
}

/// Opens the persistent store, degrading to an in-memory one so a broken
/// state file never blocks start-up.
fn open_store(config: &EnvConfig) -> Arc<dyn KeyValueStore> {
    let Some(path) = config.state_path.clone().or_else(default_state_path) else {
        warn!("no state directory available, history will not persist");
        return Arc::new(MemoryStore::new());
    };

    match JsonFileStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(error) => {
            warn!(error = %error, "failed to open state file, history will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}
