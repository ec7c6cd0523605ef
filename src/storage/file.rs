//! JSON-file store.
//!
//! The file holds a single flat object of string values. It is re-read on
//! every access, so edits by another process are picked up. Writes go out
//! with 0600 permissions on Unix since the file holds a credential.

use super::{StorageError, TokenStore};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// Store backed by a JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Missing file reads as empty.
    fn load(&self) -> Result<Entries, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        // mode() only applies on create; tighten files that predate us
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }
        file.write_all(contents.as_bytes())
            .map_err(|e| self.io_error(e))
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("authflow.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("userToken").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn set_creates_file_and_get_reads_it_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("userToken", "abc").unwrap();
        store.set("userName", "ada").unwrap();

        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.get("userToken").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("userName").unwrap().as_deref(), Some("ada"));
    }

    #[test]
    fn delete_removes_only_that_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("userToken", "abc").unwrap();
        store.set("userName", "ada").unwrap();

        store.delete("userToken").unwrap();

        assert_eq!(store.get("userToken").unwrap(), None);
        assert_eq!(store.get("userName").unwrap().as_deref(), Some("ada"));
    }

    #[test]
    fn delete_on_missing_file_succeeds() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.delete("userToken").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("authflow.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).get("userToken").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("userToken", "abc").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_readable_file_is_tightened_on_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("authflow.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FileStore::new(&path).set("userToken", "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
