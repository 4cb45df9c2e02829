use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::error::StoreError;

/// String key-value persistence boundary injected into the terminal session.
///
/// Writers are expected to call [`KeyValueStore::set`] on every mutation; the
/// store makes no attempt to batch or debounce writes.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: Mutex::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock_unpoisoned(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock_unpoisoned(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock_unpoisoned(&self.values).remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The whole object is rewritten through a sibling temp file and renamed into
/// place after every mutation, so a crash leaves either the old or the new
/// contents on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file yields an empty store; the
    /// file and its parent directories are created on the first write.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let path = path.to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => parse_state(&path, &contents)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::io("reading state file", &path, source)),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::io("creating state directory", parent, source))?;
        }

        let serialized = serde_json::to_string_pretty(values)
            .map_err(|source| StoreError::serialize(&self.path, source))?;

        let temp_path = temp_sibling(&self.path);
        fs::write(&temp_path, serialized)
            .map_err(|source| StoreError::io("writing temp state file", &temp_path, source))?;
        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            StoreError::io("replacing state file", &self.path, source)
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock_unpoisoned(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = lock_unpoisoned(&self.values);
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(error) = self.persist(&values) {
            match previous {
                Some(previous) => values.insert(key.to_string(), previous),
                None => values.remove(key),
            };
            return Err(error);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = lock_unpoisoned(&self.values);
        let Some(previous) = values.remove(key) else {
            return Ok(());
        };
        if let Err(error) = self.persist(&values) {
            values.insert(key.to_string(), previous);
            return Err(error);
        }
        Ok(())
    }
}

fn parse_state(path: &Path, contents: &str) -> Result<BTreeMap<String, String>, StoreError> {
    let value: Value =
        serde_json::from_str(contents).map_err(|source| StoreError::parse(path, source))?;
    let Value::Object(object) = value else {
        return Err(StoreError::InvalidShape {
            path: path.to_path_buf(),
        });
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(value) => Ok((key, value)),
            _ => Err(StoreError::InvalidShape {
                path: path.to_path_buf(),
            }),
        })
        .collect()
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "state".to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
