//! Key-value collection stores
//!
//! Each collection lives under a fixed string key and is read and written
//! as a whole: `set` replaces the stored sequence, there is no merge.

use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{Result, SpendlogError, StoreWarning};

/// Key of the entry collection
pub const ENTRIES_KEY: &str = "entries";
/// Key of the custom category collection
pub const CATEGORIES_KEY: &str = "categories";

/// Get/set contract over one persisted collection
pub trait Store<T> {
    /// Read the full collection. Unreadable or corrupted data yields an
    /// empty collection together with a warning.
    fn load(&self) -> (Vec<T>, Option<StoreWarning>);

    /// Replace the full collection
    fn set(&self, items: &[T]) -> Result<()>;

    /// Hold the collection exclusively until the guard drops. Writers take
    /// this around their load and set so concurrent updates are not lost.
    fn lock(&self) -> Result<Option<StoreLock>> {
        Ok(None)
    }

    /// Read the full collection, logging any load warning
    fn get(&self) -> Vec<T> {
        let (items, warning) = self.load();
        if let Some(warning) = warning {
            tracing::warn!("{}", warning.message());
        }
        items
    }
}

/// Exclusive advisory lock on a collection's `.lock` sidecar
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Store backed by `<dir>/<key>.json` holding a JSON array
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonFileStore<T> {
    pub fn open(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }
}

impl<T> Store<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Uses shared file lock for concurrent read safety.
    fn load(&self) -> (Vec<T>, Option<StoreWarning>) {
        if !self.path.exists() {
            return (Vec::new(), None);
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                return (
                    Vec::new(),
                    Some(StoreWarning::LoadFailed(format!(
                        "Failed to open {}: {}",
                        self.path.display(),
                        e
                    ))),
                );
            }
        };

        if let Err(e) = file.lock_shared() {
            return (
                Vec::new(),
                Some(StoreWarning::LoadFailed(format!(
                    "Failed to acquire read lock: {}",
                    e
                ))),
            );
        }

        let mut content = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut content) {
            let _ = file.unlock();
            return (
                Vec::new(),
                Some(StoreWarning::LoadFailed(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ))),
            );
        }
        let _ = file.unlock();

        if content.trim().is_empty() {
            return (Vec::new(), None);
        }

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(items) => {
                tracing::debug!(path = %self.path.display(), count = items.len(), "loaded store");
                (items, None)
            }
            Err(e) => (
                Vec::new(),
                Some(StoreWarning::Corrupted(format!(
                    "Corrupted store {}: {}",
                    self.path.display(),
                    e
                ))),
            ),
        }
    }

    /// Save using atomic write (temp file + rename) with exclusive lock.
    fn set(&self, items: &[T]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| SpendlogError::Store(format!("Serialization failed: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");

        {
            let mut file = File::create(&temp_path)
                .map_err(|e| SpendlogError::Store(format!("Failed to create temp file: {}", e)))?;
            file.write_all(content.as_bytes())
                .map_err(|e| SpendlogError::Store(format!("Failed to write temp file: {}", e)))?;
            file.sync_all()
                .map_err(|e| SpendlogError::Store(format!("Failed to sync temp file: {}", e)))?;
        }

        let target = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        target
            .lock_exclusive()
            .map_err(|e| SpendlogError::Store(format!("Failed to acquire write lock: {}", e)))?;

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SpendlogError::Store(format!("Failed to rename temp file: {}", e)))?;

        let _ = target.unlock();
        tracing::debug!(path = %self.path.display(), count = items.len(), "saved store");
        Ok(())
    }

    /// Blocks until no other process holds the collection.
    fn lock(&self) -> Result<Option<StoreLock>> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        file.lock_exclusive()
            .map_err(|e| SpendlogError::Store(format!("Failed to acquire update lock: {}", e)))?;
        Ok(Some(StoreLock { file }))
    }
}

/// In-process store, used by tests and as a scratch backend
#[derive(Debug)]
pub struct MemoryStore<T> {
    items: RefCell<Vec<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> MemoryStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RefCell::new(items),
        }
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn load(&self) -> (Vec<T>, Option<StoreWarning>) {
        (self.items.borrow().clone(), None)
    }

    fn set(&self, items: &[T]) -> Result<()> {
        *self.items.borrow_mut() = items.to_vec();
        Ok(())
    }
}
