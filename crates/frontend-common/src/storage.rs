//! Key/value session storage
//!
//! Mirrors the browser `sessionStorage` API so the token store does not care
//! whether it lives in a page, a test, or a CLI that persists to disk.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file is not a JSON object of strings
    #[error("Corrupt storage file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value store with Web Storage semantics
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Write several entries; backends that can should apply them as one unit
    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// Remove several entries; backends that can should apply them as one unit
    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.items).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.items).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.items).remove(key);
        Ok(())
    }

    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut guard = lock(&self.items);
        for (key, value) in items {
            guard.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut guard = lock(&self.items);
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}

/// Storage persisted as a JSON object in a single file
///
/// Every operation re-reads the file, so separate processes sharing the same
/// path see each other's writes. Writes replace the file atomically.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(items).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }

        fs::rename(&tmp_path, &self.path).map_err(io_err)
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = lock(&self.write_lock);
        let mut items = self.read_all()?;
        apply(&mut items);
        self.write_all(&items)
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.remove(key);
        })
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        self.update(|items| {
            for (key, value) in entries {
                items.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.update(|items| {
            for key in keys {
                items.remove(*key);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_basic_operations() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_items(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.remove_items(&["a", "b"]).unwrap();
        assert_eq!(storage.get_item("b").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = FileStorage::new(&path);
        first
            .set_items(&[("access_token", "acc"), ("refresh_token", "ref")])
            .unwrap();

        let second = FileStorage::new(&path);
        assert_eq!(second.get_item("access_token").unwrap().as_deref(), Some("acc"));
        assert_eq!(second.get_item("refresh_token").unwrap().as_deref(), Some("ref"));

        second.remove_item("access_token").unwrap();
        assert_eq!(first.get_item("access_token").unwrap(), None);
        assert_eq!(first.get_item("refresh_token").unwrap().as_deref(), Some("ref"));
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get_item("anything").unwrap(), None);
        storage.remove_item("anything").unwrap();
    }

    #[test]
    fn file_storage_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("access_token"),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
