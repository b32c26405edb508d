//! Run — parse a batch of logs and write one JSON report per log.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::parser::{ParseError, SubmissionLogParser, SubmissionResult};

/// Report for one input log, as written to stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogReport {
    pub path: PathBuf,
    pub parsed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Result(SubmissionResult),
    Absent(bool),
    Error(ReportedError),
}

#[derive(Debug, Serialize)]
pub struct ReportedError {
    pub kind: &'static str,
    pub message: String,
}

impl From<Result<Option<SubmissionResult>, ParseError>> for Outcome {
    fn from(result: Result<Option<SubmissionResult>, ParseError>) -> Self {
        match result {
            Ok(Some(result)) => Outcome::Result(result),
            Ok(None) => Outcome::Absent(true),
            Err(e) => Outcome::Error(ReportedError {
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
}

impl LogReport {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// Expand inputs: files stay as they are, directories become their direct
/// regular-file children sorted by name.
pub async fn expand_inputs(inputs: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let is_dir = tokio::fs::metadata(input).await.map(|m| m.is_dir()).unwrap_or(false);
        if !is_dir {
            paths.push(input.clone());
            continue;
        }

        let mut children = Vec::new();
        let mut entries = tokio::fs::read_dir(input).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                children.push(entry.path());
            }
        }
        children.sort();
        paths.extend(children);
    }
    Ok(paths)
}

/// Parse every path with at most `concurrency` logs in flight; reports come
/// back in input order.
pub async fn parse_all(parser: &SubmissionLogParser, paths: Vec<PathBuf>, concurrency: usize) -> Vec<LogReport> {
    stream::iter(paths)
        .map(|path| async move { parse_one(parser, &path).await })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Write reports as JSON lines (or pretty JSON documents).
pub fn write_reports<W: Write>(out: &mut W, reports: &[LogReport], pretty: bool) -> anyhow::Result<()> {
    for report in reports {
        if pretty {
            serde_json::to_writer_pretty(&mut *out, report)?;
        } else {
            serde_json::to_writer(&mut *out, report)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Full batch run. Returns `true` when every log parsed (absent logs are
/// not failures).
pub async fn run(parser: &SubmissionLogParser, inputs: &[PathBuf], concurrency: usize, pretty: bool) -> anyhow::Result<bool> {
    let paths = expand_inputs(inputs).await?;
    info!("Parsing {} log(s) with concurrency {}", paths.len(), concurrency);

    let reports = parse_all(parser, paths, concurrency).await;

    let stdout = std::io::stdout();
    write_reports(&mut stdout.lock(), &reports, pretty)?;

    let snapshot = parser.metrics().snapshot();
    info!(
        graded = snapshot.graded,
        compile_errors = snapshot.compile_errors,
        absent = snapshot.absent,
        failed = snapshot.failed,
        test_cases = snapshot.test_cases,
        "Run complete"
    );

    Ok(!reports.iter().any(LogReport::is_error))
}

/// Parse one log into its report, logging failures and absent files.
pub async fn parse_one(parser: &SubmissionLogParser, path: &Path) -> LogReport {
    let outcome = Outcome::from(parser.parse_log(path).await);
    match &outcome {
        Outcome::Error(e) => error!(path = %path.display(), kind = e.kind, "{}", e.message),
        Outcome::Absent(_) => warn!(path = %path.display(), "Not a log file"),
        Outcome::Result(_) => {}
    }
    LogReport {
        path: path.to_path_buf(),
        parsed_at: Utc::now(),
        outcome,
    }
}
