//! Local key-value persistence.
//!
//! Everything aquachat remembers between runs (chat history, language, theme,
//! translation credential) lives under a handful of string keys, the same way a
//! browser profile keeps them in local storage.

use crate::errors::{AquachatError, AquachatResult};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AquachatResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AquachatResult<()>;
    fn remove(&self, key: &str) -> AquachatResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> AquachatResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AquachatError::storage_error("storage lock poisoned"))
}

/// Volatile store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AquachatResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AquachatResult<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AquachatResult<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}

/// A JSON object file holding every key.
///
/// The whole map is cached in memory and rewritten on each mutation through a
/// temp file in the same directory followed by a rename, so a crash mid-write
/// leaves the previous file intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> AquachatResult<Self> {
        let path = path.into();
        let entries = read_entries(&path);
        log::debug!("opened {} with {} keys", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> AquachatResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            AquachatError::storage_error(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> HashMap<String, String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            log::warn!("could not read {}: {}; starting empty", path.display(), e);
            return HashMap::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("{} is corrupt ({}); starting empty", path.display(), e);
            HashMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AquachatResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AquachatResult<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> AquachatResult<()> {
        let mut entries = lock(&self.entries)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("language").unwrap(), None);

        store.set("language", "te").unwrap();
        assert_eq!(store.get("language").unwrap().as_deref(), Some("te"));

        store.remove("language").unwrap();
        assert_eq!(store.get("language").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("theme", "dark").unwrap();
            store.set("language", "hi").unwrap();
            store.remove("language").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("language").unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ this is not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("chatHistory").unwrap(), None);

        store.set("chatHistory", "[]").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("chatHistory").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("theme", "light").unwrap();
        assert!(path.exists());
    }
}
