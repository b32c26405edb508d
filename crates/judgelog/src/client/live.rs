//! Live — implements `LogSource` on the local filesystem.

use std::path::Path;

use crate::client::source::{LogSource, SourceFuture};

/// Reads logs from disk with `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLogSource;

impl FsLogSource {
    pub fn new() -> Self {
        Self
    }
}

impl LogSource for FsLogSource {
    fn is_file<'a>(&'a self, path: &'a Path) -> SourceFuture<'a, bool> {
        Box::pin(async move {
            match tokio::fs::symlink_metadata(path).await {
                Ok(meta) => meta.is_file(),
                Err(_) => false,
            }
        })
    }

    fn read<'a>(&'a self, path: &'a Path) -> SourceFuture<'a, std::io::Result<Vec<u8>>> {
        Box::pin(tokio::fs::read(path))
    }
}
