//! Document I/O
//!
//! The core never touches the filesystem. It asks for a file through
//! `CoreIoRequest` and the host fulfils that request here.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// I/O error
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl IoError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.display().to_string();
        if source.kind() == io::ErrorKind::NotFound {
            IoError::NotFound(path)
        } else {
            IoError::Io { path, source }
        }
    }
}

/// Raw byte access to documents
pub trait DocumentIo {
    /// Read a whole file
    fn read(&mut self, path: &Path) -> Result<Vec<u8>, IoError>;

    /// Replace a whole file
    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<(), IoError>;
}

/// Filesystem-backed document I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentIo;

impl DocumentIo for FsDocumentIo {
    fn read(&mut self, path: &Path) -> Result<Vec<u8>, IoError> {
        fs::read(path).map_err(|err| IoError::from_io(path, err))
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<(), IoError> {
        fs::write(path, bytes).map_err(|err| IoError::from_io(path, err))
    }
}

/// In-memory files keyed by path, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentIo {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryDocumentIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl DocumentIo for MemoryDocumentIo {
    fn read(&mut self, path: &Path) -> Result<Vec<u8>, IoError> {
        let key = path.display().to_string();
        self.files.get(&key).cloned().ok_or(IoError::NotFound(key))
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<(), IoError> {
        self.files.insert(path.display().to_string(), bytes.to_vec());
        Ok(())
    }
}
