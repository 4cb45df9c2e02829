//! Small string key-value persistence used for terminal history and theme
//! selection.

mod error;
mod paths;
mod store;

pub use error::StoreError;
pub use paths::{default_state_path, state_path_from, STATE_DIR, STATE_FILE_NAME};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
