//! Boot — logging init, config load, parser construction.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::FsLogSource;
use crate::conf::JudgeLogConfig;
use crate::parser::SubmissionLogParser;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr; stdout carries the JSON reports.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "judgelog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config and build a filesystem-backed parser.
pub fn boot(config_path: Option<&Path>) -> anyhow::Result<(SubmissionLogParser, JudgeLogConfig)> {
    let config = JudgeLogConfig::load(config_path).context("loading configuration")?;
    info!(
        "Loaded configuration: verdicts={}, concurrency={}, accept_mime={:?}, code_size_limit={}",
        config.verdicts.len(),
        config.concurrency,
        config.limits.accept_mime,
        config.limits.code_size_limit
    );

    let parser = SubmissionLogParser::new(Arc::new(FsLogSource::new()), Arc::new(config.verdicts.clone()));

    Ok((parser, config))
}
