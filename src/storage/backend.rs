//! Document backends
//!
//! A backend owns the location of the single persisted document. Every
//! call acquires and releases the underlying resource; no handle stays
//! open between operations.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::errors::{StorageError, StorageResult};

/// Backend trait for the persisted document
pub trait DocumentBackend: Send + Sync + fmt::Debug {
    /// Read the whole document. `None` if it does not exist yet.
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the whole document
    fn write(&self, data: &[u8]) -> StorageResult<()>;

    /// Human-readable location of the document
    fn location(&self) -> String;
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for Arc<B> {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, data: &[u8]) -> StorageResult<()> {
        (**self).write(data)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Document stored in a single file on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the document file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_failed(&self, source: io::Error) -> StorageError {
        StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn write(&self, data: &[u8]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
            }
        }

        // Write next to the target, then rename over it
        let temp_path = self.temp_path();
        fs::write(&temp_path, data).map_err(|e| self.write_failed(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.write_failed(e)
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    content: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    /// Create a backend with no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend holding the given document
    pub fn with_content(data: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Mutex::new(Some(data.into())),
        }
    }

    /// Returns a copy of the current document
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DocumentBackend for MemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.snapshot())
    }

    fn write(&self, data: &[u8]) -> StorageResult<()> {
        let mut content = self
            .content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *content = Some(data.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
