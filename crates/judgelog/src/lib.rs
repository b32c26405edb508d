// Module structure for the judgelog crate.

// Core
pub mod parser;
pub mod client;

// Runtime
pub mod conf;
pub mod runtime;
