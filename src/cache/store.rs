//! Named-blob state stores
//!
//! A state store keeps opaque byte payloads under short names. The file
//! store writes one `<name>.json` file per name into a directory; the memory
//! store keeps everything in process.

use crate::constants::cache::STATE_FILE_EXTENSION;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Generic get/set-by-name blob store
pub trait StateStore: Send + Sync {
    /// Read the payload stored under `name`, or None if nothing is stored
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the payload stored under `name`, returning the bytes written
    fn write(&self, name: &str, data: &[u8]) -> Result<usize>;

    /// Drop the payload stored under `name`, if any
    fn remove(&self, name: &str) -> Result<()>;
}

/// File-backed store, one file per name
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", name.trim(), STATE_FILE_EXTENSION))
    }
}

impl StateStore for FileStateStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(name);

        if !path.exists() {
            return Ok(None);
        }

        fs::read(&path).map(Some).map_err(|e| {
            Error::Storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<usize> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Storage(format!("Failed to create state directory: {}", e))
        })?;

        let path = self.path_for(name);
        fs::write(&path, data).map_err(|e| {
            Error::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(data.len())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| Error::Storage("Memory store lock poisoned".to_string()))
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs()?.get(name).cloned())
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<usize> {
        self.blobs()?.insert(name.to_string(), data.to_vec());
        Ok(data.len())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.blobs()?.remove(name);
        Ok(())
    }
}
