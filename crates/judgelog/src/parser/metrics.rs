use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use super::model::{ParseError, SubmissionResult};

/// Outcome counters (one increment per log)
#[derive(Debug, Default)]
pub struct OutcomeMetrics {
    pub graded: AtomicU64,
    pub compile_errors: AtomicU64,
    pub absent: AtomicU64,
}

/// Failure counters by error kind
#[derive(Debug, Default)]
pub struct ErrorMetrics {
    pub malformed_filename: AtomicU64,
    pub malformed_header: AtomicU64,
    pub malformed_body: AtomicU64,
    pub invalid_score: AtomicU64,
    pub read: AtomicU64,
}

/// Metrics for log parsing.
///
/// All operations use `Ordering::Relaxed`; `snapshot()` is not transactional
/// across fields, which is fine for observability counters.
#[derive(Debug, Default)]
pub struct ParseMetrics {
    pub outcomes: OutcomeMetrics,
    pub errors: ErrorMetrics,
    /// Test cases produced across all graded logs
    pub test_cases: AtomicU64,
    pub time_nanos: AtomicU64,
}

impl ParseMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_result(&self, result: &SubmissionResult, time_nanos: u64) {
        self.time_nanos.fetch_add(time_nanos, Ordering::Relaxed);
        match result {
            SubmissionResult::CompileError(_) => {
                self.outcomes.compile_errors.fetch_add(1, Ordering::Relaxed);
            }
            SubmissionResult::Graded(graded) => {
                self.outcomes.graded.fetch_add(1, Ordering::Relaxed);
                self.test_cases.fetch_add(graded.tests.len() as u64, Ordering::Relaxed);
            }
        }
    }

    #[inline]
    pub fn record_absent(&self) {
        self.outcomes.absent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_error(&self, error: &ParseError) {
        let counter = match error {
            ParseError::MalformedFilename(_) => &self.errors.malformed_filename,
            ParseError::MalformedHeader { .. } => &self.errors.malformed_header,
            ParseError::MalformedBody(_) => &self.errors.malformed_body,
            ParseError::InvalidScore(_) => &self.errors.invalid_score,
            ParseError::Read { .. } => &self.errors.read,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let graded = self.outcomes.graded.load(Ordering::Relaxed);
        let compile_errors = self.outcomes.compile_errors.load(Ordering::Relaxed);
        let parsed = graded + compile_errors;
        let time_nanos = self.time_nanos.load(Ordering::Relaxed);

        let failed = self.errors.malformed_filename.load(Ordering::Relaxed)
            + self.errors.malformed_header.load(Ordering::Relaxed)
            + self.errors.malformed_body.load(Ordering::Relaxed)
            + self.errors.invalid_score.load(Ordering::Relaxed)
            + self.errors.read.load(Ordering::Relaxed);

        MetricsSnapshot {
            graded,
            compile_errors,
            absent: self.outcomes.absent.load(Ordering::Relaxed),
            failed,
            malformed_filename: self.errors.malformed_filename.load(Ordering::Relaxed),
            malformed_header: self.errors.malformed_header.load(Ordering::Relaxed),
            malformed_body: self.errors.malformed_body.load(Ordering::Relaxed),
            invalid_score: self.errors.invalid_score.load(Ordering::Relaxed),
            read_errors: self.errors.read.load(Ordering::Relaxed),
            test_cases: self.test_cases.load(Ordering::Relaxed),
            avg_parse_time_nanos: if parsed > 0 { time_nanos / parsed } else { 0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub graded: u64,
    pub compile_errors: u64,
    pub absent: u64,
    pub failed: u64,
    pub malformed_filename: u64,
    pub malformed_header: u64,
    pub malformed_body: u64,
    pub invalid_score: u64,
    pub read_errors: u64,
    pub test_cases: u64,
    pub avg_parse_time_nanos: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::{CompileErrorResult, GradedResult, SubmissionIdentity, TestCase};

    fn graded(tests: usize) -> SubmissionResult {
        SubmissionResult::Graded(GradedResult {
            identity: SubmissionIdentity::new("1", "p"),
            final_score: 0.0,
            tests: (0..tests)
                .map(|_| TestCase { score: 0.0, time: 0.0, verdict: "WA".into(), details: None })
                .collect(),
        })
    }

    #[test]
    fn test_new_metrics_are_zero() {
        let snapshot = ParseMetrics::new().snapshot();
        assert_eq!(snapshot.graded, 0);
        assert_eq!(snapshot.failed, 0);
        assert_eq!(snapshot.avg_parse_time_nanos, 0);
    }

    #[test]
    fn test_record_results() {
        let metrics = ParseMetrics::new();
        metrics.record_result(&graded(3), 100);
        metrics.record_result(&graded(2), 300);
        metrics.record_result(
            &SubmissionResult::CompileError(CompileErrorResult::new(SubmissionIdentity::new("1", "p"), "")),
            200,
        );
        metrics.record_absent();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.graded, 2);
        assert_eq!(snapshot.compile_errors, 1);
        assert_eq!(snapshot.absent, 1);
        assert_eq!(snapshot.test_cases, 5);
        assert_eq!(snapshot.avg_parse_time_nanos, 200);
    }

    #[test]
    fn test_record_errors_by_kind() {
        let metrics = ParseMetrics::new();
        metrics.record_error(&ParseError::MalformedBody(1));
        metrics.record_error(&ParseError::InvalidScore("x".into()));
        metrics.record_error(&ParseError::InvalidScore("y".into()));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.failed, 3);
        assert_eq!(snapshot.malformed_body, 1);
        assert_eq!(snapshot.invalid_score, 2);
        assert_eq!(snapshot.malformed_header, 0);
    }
}
