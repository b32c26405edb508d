//! Log — the root parser: file check, read, identity, segmentation, tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::metrics::ParseMetrics;
use super::model::{CompileErrorResult, GradedResult, ParseError, SubmissionResult, TestCase};
use super::segment::{segment, Segmented};
use super::traits::VerdictMapper;
use super::{filename, test_case};
use crate::client::LogSource;

/// Parses judge logs into [`SubmissionResult`]s.
///
/// Holds no per-log state, so one instance can serve any number of
/// concurrent `parse_log` calls.
pub struct SubmissionLogParser {
    source: Arc<dyn LogSource>,
    verdicts: Arc<dyn VerdictMapper>,
    metrics: Arc<ParseMetrics>,
}

impl SubmissionLogParser {
    pub fn new(source: Arc<dyn LogSource>, verdicts: Arc<dyn VerdictMapper>) -> Self {
        Self {
            source,
            verdicts,
            metrics: Arc::new(ParseMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &Arc<ParseMetrics> {
        &self.metrics
    }

    /// Parse the log at `path`.
    ///
    /// `Ok(None)` when `path` is not a regular file: a submission without a
    /// log yet is a normal state, not an error.
    pub async fn parse_log(&self, path: &Path) -> Result<Option<SubmissionResult>, ParseError> {
        if !self.source.is_file(path).await {
            debug!(path = %path.display(), "No log file");
            self.metrics.record_absent();
            return Ok(None);
        }

        let result = self.read_and_parse(path).await;
        if let Err(e) = &result {
            self.metrics.record_error(e);
        }
        result.map(Some)
    }

    async fn read_and_parse(&self, path: &Path) -> Result<SubmissionResult, ParseError> {
        let bytes = self.source.read(path).await.map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "Log is not valid UTF-8; decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        let started = Instant::now();
        let result = build_result(&file_name, &text, self.verdicts.as_ref())?;
        self.metrics.record_result(&result, started.elapsed().as_nanos() as u64);

        debug!(
            path = %path.display(),
            id = %result.identity().id,
            problem = %result.identity().problem,
            compile_error = result.is_compile_error(),
            tests = result.tests().len(),
            "Parsed judge log"
        );
        Ok(result)
    }

    /// Parse log text already in memory. `file_name` is the log's base name.
    pub fn parse_text(&self, file_name: &str, text: &str) -> Result<SubmissionResult, ParseError> {
        build_result(file_name, text, self.verdicts.as_ref())
    }
}

/// The pure pipeline: identity, segmentation, per-test parsing.
pub fn build_result(
    file_name: &str,
    text: &str,
    verdicts: &dyn VerdictMapper,
) -> Result<SubmissionResult, ParseError> {
    let identity = filename::decode(file_name)?;

    match segment(text, &identity)? {
        Segmented::CompileError { details } => {
            Ok(SubmissionResult::CompileError(CompileErrorResult::new(identity, details)))
        }
        Segmented::Graded { final_score, tests } => {
            let tests = tests
                .into_iter()
                .map(|raw| test_case::parse(raw, verdicts))
                .collect::<Result<Vec<TestCase>, _>>()?;
            Ok(SubmissionResult::Graded(GradedResult {
                identity,
                final_score,
                tests,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryLogSource;
    use crate::parser::model::SubmissionIdentity;
    use crate::parser::traits::VerdictTable;
    use crate::parser::EOL;

    fn log(lines: &[&str]) -> String {
        lines.join(EOL)
    }

    fn verdicts() -> Arc<VerdictTable> {
        Arc::new(
            [
                ("Kết quả khớp đáp án!", "Accepted"),
                ("Kết quả KHÁC đáp án!", "Wrong Answer"),
                ("Chạy sinh lỗi", "Runtime Error"),
            ]
            .into_iter()
            .collect(),
        )
    }

    async fn parser_with(files: &[(&str, &str)]) -> SubmissionLogParser {
        let source = MemoryLogSource::new();
        for (path, contents) in files {
            source.add_file(*path, contents.as_bytes().to_vec()).await;
        }
        SubmissionLogParser::new(Arc::new(source), verdicts())
    }

    // ── End-to-end ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_compile_error_log() {
        let text = log(&["77‣sumA: abc", "b1", "b2", "sumA.cpp: In function 'int main()':", "error: 'x' was not declared"]);
        let parser = parser_with(&[("logs/judge[77][sumA].log", text.as_str())]).await;

        let result = parser.parse_log(Path::new("logs/judge[77][sumA].log")).await.unwrap().unwrap();
        match &result {
            SubmissionResult::CompileError(ce) => {
                assert_eq!(ce.identity, SubmissionIdentity::new("77", "sumA"));
                assert_eq!(ce.details, "sumA.cpp: In function 'int main()':\r\nerror: 'x' was not declared");
            }
            other => panic!("expected compile error, got {:?}", other),
        }
        assert!(result.final_score().is_nan());
    }

    #[tokio::test]
    async fn test_graded_single_test_log() {
        let text = log(&["9‣addB: 100", "b1", "b2", "b3", "9‣addB‣Test01: 100", "", "AC", ""]);
        let parser = parser_with(&[("judge[9][addB].log", text.as_str())]).await;

        let result = parser.parse_log(Path::new("judge[9][addB].log")).await.unwrap().unwrap();
        assert_eq!(
            result,
            SubmissionResult::Graded(GradedResult {
                identity: SubmissionIdentity::new("9", "addB"),
                final_score: 100.0,
                tests: vec![TestCase { score: 100.0, time: 0.0, verdict: "AC".into(), details: None }],
            })
        );
    }

    #[tokio::test]
    async fn test_graded_multi_test_log() {
        let text = log(&[
            "9‣addB: 1.5",
            "b1",
            "b2",
            "b3",
            "9‣addB‣Test01: 1",
            "Thời gian ≈ 0.042 giây",
            "Kết quả khớp đáp án!",
            "9‣addB‣Test02: 0.5",
            "Thời gian ≈ 1.003 giây",
            "Kết quả KHÁC đáp án!",
            "Đáp án: 3\nNhận được: 4",
            "9‣addB‣Test03: 0",
            "Chạy sinh lỗi",
            "Exit code 255 (Hexadecimal: FF)",
            "",
        ]);
        let parser = parser_with(&[("judge[9][addB].log", text.as_str())]).await;

        let result = parser.parse_log(Path::new("judge[9][addB].log")).await.unwrap().unwrap();
        assert_eq!(result.final_score(), 1.5);

        let tests = result.tests();
        assert_eq!(tests.len(), 3);
        assert_eq!(tests[0], TestCase { score: 1.0, time: 0.042, verdict: "Accepted".into(), details: None });
        assert_eq!(tests[1].score, 0.5);
        assert_eq!(tests[1].time, 1.003);
        assert_eq!(tests[1].verdict, "Wrong Answer");
        assert_eq!(tests[1].details.as_deref(), Some("Đáp án: 3\nNhận được: 4"));
        assert_eq!(tests[2].verdict, "Runtime Error");
        assert_eq!(tests[2].details.as_deref(), Some("Exit code: FF"));
        assert_eq!(tests[2].time, 0.0);
    }

    // ── Absent and failing logs ──────────────────────────────────

    #[tokio::test]
    async fn test_missing_file_is_absent() {
        let parser = parser_with(&[]).await;
        let result = parser.parse_log(Path::new("judge[1][a].log")).await.unwrap();
        assert!(result.is_none());
        assert_eq!(parser.metrics().snapshot().absent, 1);
    }

    #[tokio::test]
    async fn test_malformed_filename() {
        let parser = parser_with(&[("no-brackets.log", "x: 1")]).await;
        let err = parser.parse_log(Path::new("no-brackets.log")).await.unwrap_err();
        assert!(matches!(err, ParseError::MalformedFilename(_)));
        assert_eq!(parser.metrics().snapshot().malformed_filename, 1);
    }

    #[tokio::test]
    async fn test_brackets_in_directory_are_ignored() {
        let text = log(&["9‣addB: 0"]);
        let parser = parser_with(&[("[old][dir]/no-brackets.log", text.as_str())]).await;
        let err = parser.parse_log(Path::new("[old][dir]/no-brackets.log")).await.unwrap_err();
        assert!(matches!(err, ParseError::MalformedFilename(ref name) if name == "no-brackets.log"));
    }

    #[tokio::test]
    async fn test_invalid_test_score() {
        let text = log(&["9‣addB: 1", "b1", "b2", "b3", "9‣addB‣Test01: mười", "AC"]);
        let parser = parser_with(&[("judge[9][addB].log", text.as_str())]).await;
        let err = parser.parse_log(Path::new("judge[9][addB].log")).await.unwrap_err();
        assert!(matches!(err, ParseError::InvalidScore(ref s) if s == "mười"));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_read_error() {
        let source = MemoryLogSource::new();
        source.add_unreadable("judge[1][a].log").await;
        let parser = SubmissionLogParser::new(Arc::new(source), verdicts());

        let err = parser.parse_log(Path::new("judge[1][a].log")).await.unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
        assert_eq!(parser.metrics().snapshot().read_errors, 1);
    }

    #[tokio::test]
    async fn test_non_utf8_bytes_are_replaced() {
        let source = MemoryLogSource::new();
        let mut bytes = "1‣a: 1\r\nb1\r\nb2\r\nb3\r\n1‣a‣Test01: 1\r\nWA\r\n".as_bytes().to_vec();
        bytes.extend_from_slice(b"\xFF\xFE");
        source.add_file("judge[1][a].log", bytes).await;
        let parser = SubmissionLogParser::new(Arc::new(source), verdicts());

        let result = parser.parse_log(Path::new("judge[1][a].log")).await.unwrap().unwrap();
        assert_eq!(result.tests()[0].details.as_deref(), Some("\u{FFFD}\u{FFFD}"));
    }

    // ── Pure entry point ─────────────────────────────────────────

    #[tokio::test]
    async fn test_parse_text_matches_parse_log() {
        let text = log(&["5‣p: 10", "b1", "b2", "b3", "5‣p‣Test01: 10", "Kết quả khớp đáp án!"]);
        let parser = parser_with(&[("x[5][p].log", text.as_str())]).await;

        let from_file = parser.parse_log(Path::new("x[5][p].log")).await.unwrap().unwrap();
        let from_text = parser.parse_text("x[5][p].log", &text).unwrap();
        assert_eq!(from_file, from_text);
    }

    #[test]
    fn test_numeric_header_always_graded() {
        for header in ["0", "100", "12.25", " 7 ", ""] {
            let header_line = format!("1‣a: {}", header);
            let text = log(&[header_line.as_str(), "b1", "b2", "b3"]);
            let result = build_result("[1][a]", &text, &VerdictTable::new()).unwrap();
            assert!(!result.is_compile_error(), "header {:?}", header);
        }
        for header in ["abc", "Dịch lỗi"] {
            let header_line = format!("1‣a: {}", header);
            let text = log(&[header_line.as_str(), "b1", "b2", "b3"]);
            let result = build_result("[1][a]", &text, &VerdictTable::new()).unwrap();
            assert!(result.is_compile_error(), "header {:?}", header);
        }
    }

    #[test]
    fn test_blank_scores_grade_as_zero() {
        let text = log(&["9‣addB: ", "b1", "b2", "b3", "9‣addB‣Test01:  ", "Kết quả KHÁC đáp án!"]);
        let result = build_result("j[9][addB].log", &text, verdicts().as_ref()).unwrap();
        assert!(!result.is_compile_error());
        assert_eq!(result.final_score(), 0.0);
        assert_eq!(result.tests(), &[TestCase { score: 0.0, time: 0.0, verdict: "Wrong Answer".into(), details: None }]);
    }
}
