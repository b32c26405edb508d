//! LogSource trait — abstract interface for reading judge logs.
//!
//! `live.rs` provides the filesystem implementation.
//! `fake.rs` provides a test double.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

/// Boxed future returned by [`LogSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Unified async interface over log storage.
///
/// Object-safe thanks to `Pin<Box<…>>` returns, so the parser can hold an
/// `Arc<dyn LogSource>`.
pub trait LogSource: Send + Sync {
    /// True when `path` names an existing regular file (symlinks are not
    /// followed).
    fn is_file<'a>(&'a self, path: &'a Path) -> SourceFuture<'a, bool>;

    /// Raw bytes of the log at `path`.
    fn read<'a>(&'a self, path: &'a Path) -> SourceFuture<'a, std::io::Result<Vec<u8>>>;
}
