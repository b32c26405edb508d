//! Fake — test double for log storage.
//!
//! Provides a deterministic [`MemoryLogSource`] that implements
//! [`LogSource`] using in-memory state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::client::source::{LogSource, SourceFuture};

/// An in-memory log store keyed by path.
///
/// Paths seeded with [`MemoryLogSource::add_unreadable`] exist but fail to
/// read, which lets tests exercise the read-error path.
#[derive(Default)]
pub struct MemoryLogSource {
    files: Mutex<HashMap<PathBuf, Option<Vec<u8>>>>,
}

impl MemoryLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log file.
    pub async fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.lock().await.insert(path.into(), Some(contents.into()));
    }

    /// Seed a file that exists but cannot be read.
    pub async fn add_unreadable(&self, path: impl Into<PathBuf>) {
        self.files.lock().await.insert(path.into(), None);
    }
}

impl LogSource for MemoryLogSource {
    fn is_file<'a>(&'a self, path: &'a Path) -> SourceFuture<'a, bool> {
        Box::pin(async move { self.files.lock().await.contains_key(path) })
    }

    fn read<'a>(&'a self, path: &'a Path) -> SourceFuture<'a, std::io::Result<Vec<u8>>> {
        Box::pin(async move {
            match self.files.lock().await.get(path) {
                Some(Some(contents)) => Ok(contents.clone()),
                Some(None) => Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "unreadable fake file",
                )),
                None => Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such fake file")),
            }
        })
    }
}
