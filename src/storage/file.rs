//! File-backed key-value store.
//!
//! Every key maps to `<data_dir>/<key>.json`. Writes go to a temporary file in
//! the same directory which is then renamed over the target, so a crash never
//! leaves a half-written value behind. A lock file serializes access between
//! processes sharing the directory.

use super::{validate_key, KeyValueStore};
use crate::constants::{STORAGE_FILE_EXTENSION, STORAGE_LOCK_FILE};
use crate::errors::{AppError, AppResult, StorageError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A `KeyValueStore` persisted as one file per key.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

/// Holds the directory lock until dropped.
struct DirLock {
    file: File,
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `AppError::Config` if `dir` is not absolute
    /// - `AppError::Io` if the directory cannot be created
    pub fn open(dir: &Path) -> AppResult<Self> {
        if !dir.is_absolute() {
            return Err(AppError::Config(format!(
                "Storage directory must be absolute: {}",
                dir.display()
            )));
        }

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to create storage directory: {}", e),
                ))
            })?;

            #[cfg(unix)]
            {
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
                debug!("Set 0o700 permissions on storage directory");
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", key, STORAGE_FILE_EXTENSION))
    }

    fn lock(&self, exclusive: bool) -> AppResult<DirLock> {
        let path = self.dir.join(STORAGE_LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| StorageError::Lock {
                path: path.clone(),
                source,
            })?;

        let locked = if exclusive {
            file.lock_exclusive()
        } else {
            file.lock_shared()
        };
        locked.map_err(|source| StorageError::Lock { path, source })?;

        Ok(DirLock { file })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        validate_key(key)?;
        let _guard = self.lock(false)?;

        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        validate_key(key)?;
        let _guard = self.lock(true)?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(self.path_for(key))
            .map_err(|e| StorageError::Persist {
                key: key.to_string(),
                source: e.error,
            })?;

        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        validate_key(key)?;
        let _guard = self.lock(true)?;

        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        store.set("serenify_reminders", "[1,2,3]").unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("serenify_reminders").unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nothing_here").unwrap(), None);
    }

    #[test]
    fn test_overwrite_and_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("flag", "false").unwrap();
        store.set("flag", "true").unwrap();
        assert_eq!(store.get("flag").unwrap().as_deref(), Some("true"));

        store.remove("flag").unwrap();
        assert_eq!(store.get("flag").unwrap(), None);
        assert!(!dir.path().join("flag.json").exists());
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileStore::open(&nested).unwrap();
        store.set("k", "v").unwrap();

        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_rejects_relative_directory() {
        let result = FileStore::open(Path::new("relative/dir"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_path_traversal_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../outside", "x"),
            Err(AppError::Storage(StorageError::InvalidKey(_)))
        ));
    }
}
