use std::path::{Path, PathBuf};

use doctorfinder_domain::Result;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::InfraError;

/// JSON-file key/value store.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves half a document behind. Access from
/// multiple handles in one process is serialized by the internal lock;
/// separate processes are last-writer-wins.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    /// Store backed by the file at `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the value under `key`.
    ///
    /// A value that no longer decodes as `T` is treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let _guard = self.lock.lock();
        let entries = self.read_entries()?;

        let Some(value) = entries.get(key) else {
            return Ok(None);
        };

        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) => {
                warn!(key, error = %err, "ignoring undecodable local storage entry");
                Ok(None)
            }
        }
    }

    /// Encode `value` and store it under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_value(value).map_err(InfraError::from)?;

        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), encoded);
        self.write_entries(&entries)
    }

    /// Remove `key`; removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "local storage file is corrupt; starting empty");
                Ok(Map::new())
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(InfraError::from)?;
            }
        }

        let contents = serde_json::to_vec_pretty(entries).map_err(InfraError::from)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(InfraError::from)?;
        std::fs::rename(&tmp, &self.path).map_err(InfraError::from)?;
        Ok(())
    }
}
