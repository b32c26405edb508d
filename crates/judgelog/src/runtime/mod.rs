//! Runtime — process bootstrap and the batch parse run.
//!
//! - `boot.rs`: logging init and config load
//! - `run.rs`: expand input paths, parse logs concurrently, emit reports

pub mod boot;
pub mod run;
