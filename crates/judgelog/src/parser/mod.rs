/// Judge log parsing module
///
/// Turns a Themis-style submission log (CRLF-terminated, Vietnamese report)
/// into a structured [`SubmissionResult`].
///
/// # Architecture
///
/// - `traits.rs`: the verdict mapping seam
/// - `grammar.rs`: literal sub-matchers (header, score markers, numbers)
/// - `filename.rs`: submission identity from the log's file name
/// - `segment.rs`: header / compile error / test chunk segmentation
/// - `time.rs`, `verdict.rs`, `test_case.rs`: per-test field extraction
/// - `log.rs`: the orchestrating [`SubmissionLogParser`]
/// - `metrics.rs`: parsing counters
///
/// Everything below `log.rs` is pure and synchronous; the only I/O is the
/// file read delegated to [`crate::client::LogSource`].

pub mod traits;
pub mod model;
pub mod grammar;
pub mod filename;
pub mod segment;
pub mod time;
pub mod verdict;
pub mod test_case;
pub mod log;
pub mod metrics;

// Re-export commonly used types
pub use traits::{VerdictMapper, VerdictTable};
pub use model::{
    CompileErrorResult, GradedResult, NoScore, ParseError, SubmissionIdentity, SubmissionResult,
    TestCase,
};
pub use self::log::SubmissionLogParser;
pub use metrics::ParseMetrics;

// Constants
/// The only record separator in a judge log.
pub const EOL: &str = "\r\n";
/// Separator between identity parts in header and score marker lines.
pub const SEPARATOR: char = '‣';
/// First line of compiler diagnostics (lines 1–2 are boilerplate).
pub const COMPILE_ERROR_DETAILS_LINE: usize = 3;
/// First line of test data (lines 1–3 are boilerplate).
pub const TEST_DATA_LINE: usize = 4;
