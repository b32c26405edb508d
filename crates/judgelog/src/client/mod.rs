//! Client module — access to stored judge logs.
//!
//! - `source.rs`: the [`LogSource`] trait every caller goes through
//! - `live.rs`: [`FsLogSource`], backed by `tokio::fs`
//! - `fake.rs`: [`MemoryLogSource`], an in-memory test double

pub mod source;
pub mod live;
pub mod fake;

pub use source::LogSource;
pub use live::FsLogSource;
pub use fake::MemoryLogSource;
