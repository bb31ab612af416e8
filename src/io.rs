//! Storage backends for slice files

use crate::error::{Result, VolumeError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Byte-level access to individual slice files
pub trait SliceStorage {
    /// Read at most `max_bytes` bytes from the start of a file
    fn read(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>>;

    /// Create or truncate a file and write `data` to it
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    fn delete(&self, path: &Path) -> Result<()>;
}

/// Local file system storage.
///
/// Every call opens its own handle and drops it before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemStorage;

impl SliceStorage for FileSystemStorage {
    fn read(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
        let file = fs::File::open(path).map_err(|e| VolumeError::io(path, e))?;
        let mut data = Vec::with_capacity(max_bytes);
        file.take(max_bytes as u64)
            .read_to_end(&mut data)
            .map_err(|e| VolumeError::io(path, e))?;
        Ok(data)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = fs::File::create(path).map_err(|e| VolumeError::write(path, e))?;
        file.write_all(data).map_err(|e| VolumeError::write(path, e))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| VolumeError::io(path, e))
    }
}

/// In-memory storage keyed by path, with the same error contract as the file system
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    /// Copy of the full contents of a stored file
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().get(path.as_ref()).cloned()
    }
}

impl SliceStorage for MemoryStorage {
    fn read(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
        let files = self.files.read();
        let data = files
            .get(path)
            .ok_or_else(|| VolumeError::FileNotFound(path.to_path_buf()))?;
        Ok(data[..data.len().min(max_bytes)].to_vec())
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.files.write().insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        self.files
            .write()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| VolumeError::FileNotFound(path.to_path_buf()))
    }
}
