//! [`LocalStorage`] backends.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use fs2::FileExt;
use tracing::{debug, instrument, warn};

use socdist_core::error::{Error, StorageError};
use socdist_core::{LocalStorage, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// In-memory storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items().remove(key);
        Ok(())
    }
}

/// Storage kept in a single JSON object file.
///
/// Every write takes an exclusive lock on a sibling `.lock` file, rewrites a
/// temporary file and renames it over the original. On Unix the file is
/// readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage file name inside a directory passed to [`FileStorage::in_dir`].
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Storage at `dir/storage.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn read_all(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(io_error(key, e)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                key: key.to_string(),
                message: format!("{}: {}", self.path.display(), e),
            })
        })
    }

    /// Apply `edit` to the stored map while holding the write lock.
    fn update<F>(&self, key: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(key, e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| io_error(key, e))?;

        lock_file.lock_exclusive().map_err(|e| io_error(key, e))?;
        let result = self.rewrite(key, edit);
        FileExt::unlock(&lock_file).map_err(|e| io_error(key, e))?;

        result
    }

    fn rewrite<F>(&self, key: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut items = match self.read_all(key) {
            Ok(items) => items,
            Err(Error::Storage(StorageError::Corrupt { message, .. })) => {
                warn!(%message, "Replacing unreadable storage file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        edit(&mut items);

        let json = serde_json::to_string_pretty(&items).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = File::create(&tmp_path).map_err(|e| io_error(key, e))?;

        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| io_error(key, e))?.permissions();
            perms.set_mode(0o600);
            file.set_permissions(perms).map_err(|e| io_error(key, e))?;
        }

        file.write_all(json.as_bytes()).map_err(|e| io_error(key, e))?;
        file.sync_data().map_err(|e| io_error(key, e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|e| io_error(key, e))
    }
}

impl LocalStorage for FileStorage {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut items = self.read_all(key)?;
        Ok(items.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing item");
        self.update(key, |items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove_item(&self, key: &str) -> Result<()> {
        debug!("Removing item");
        self.update(key, |items| {
            items.remove(key);
        })
    }
}

fn io_error(key: &str, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        key: key.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("credentials").unwrap(), None);

        storage.set_item("credentials", "{}").unwrap();
        assert_eq!(storage.get_item("credentials").unwrap().as_deref(), Some("{}"));

        storage.remove_item("credentials").unwrap();
        storage.remove_item("credentials").unwrap();
        assert_eq!(storage.get_item("credentials").unwrap(), None);
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(dir.path().join("nested"));
        assert_eq!(storage.get_item("credentials").unwrap(), None);
        storage.remove_item("credentials").unwrap();
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        FileStorage::in_dir(dir.path())
            .set_item("credentials", r#"{"access":"T1","refresh":"R1"}"#)
            .unwrap();
        FileStorage::in_dir(dir.path()).set_item("theme", "dark").unwrap();

        let reopened = FileStorage::in_dir(dir.path());
        assert_eq!(
            reopened.get_item("credentials").unwrap().as_deref(),
            Some(r#"{"access":"T1","refresh":"R1"}"#)
        );
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));

        reopened.remove_item("credentials").unwrap();
        assert_eq!(reopened.get_item("credentials").unwrap(), None);
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_storage_reports_corruption() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        fs::write(storage.path(), "not json").unwrap();

        let err = storage.get_item("credentials").unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[test]
    fn file_storage_writes_over_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        fs::write(storage.path(), r#"{"credentials": tru"#).unwrap();

        storage.remove_item("credentials").unwrap();
        assert_eq!(storage.get_item("credentials").unwrap(), None);

        storage.set_item("theme", "dark").unwrap();
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_owner_only() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        storage.set_item("credentials", "x").unwrap();

        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
