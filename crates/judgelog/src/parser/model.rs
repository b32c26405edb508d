use std::path::PathBuf;
use thiserror::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};


/// Who submitted what, decoded from the log's file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionIdentity {
    pub id: String,
    pub problem: String,
}

impl SubmissionIdentity {
    pub fn new(id: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            problem: problem.into(),
        }
    }
}

/// One graded test case, in the order it appears in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub score: f64,
    /// Elapsed time in seconds (0 when the judge did not report it)
    pub time: f64,
    pub verdict: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Score slot of a compile error: there is none, and JSON shows `null`
/// so both result variants carry a `finalScore` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoScore;

impl Serialize for NoScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }
}

impl<'de> Deserialize<'de> for NoScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer)?;
        Ok(NoScore)
    }
}

/// Submission that failed to compile. Its final score is NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileErrorResult {
    #[serde(flatten)]
    pub identity: SubmissionIdentity,
    #[serde(default)]
    pub final_score: NoScore,
    /// Compiler diagnostics, CRLF line endings preserved
    pub details: String,
}

impl CompileErrorResult {
    pub fn new(identity: SubmissionIdentity, details: impl Into<String>) -> Self {
        Self {
            identity,
            final_score: NoScore,
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedResult {
    #[serde(flatten)]
    pub identity: SubmissionIdentity,
    pub final_score: f64,
    pub tests: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResult {
    CompileError(CompileErrorResult),
    Graded(GradedResult),
}

impl SubmissionResult {
    pub fn identity(&self) -> &SubmissionIdentity {
        match self {
            SubmissionResult::CompileError(ce) => &ce.identity,
            SubmissionResult::Graded(graded) => &graded.identity,
        }
    }

    /// Overall score; NaN for a compile error.
    pub fn final_score(&self) -> f64 {
        match self {
            SubmissionResult::CompileError(_) => f64::NAN,
            SubmissionResult::Graded(graded) => graded.final_score,
        }
    }

    pub fn is_compile_error(&self) -> bool {
        matches!(self, SubmissionResult::CompileError(_))
    }

    pub fn tests(&self) -> &[TestCase] {
        match self {
            SubmissionResult::CompileError(_) => &[],
            SubmissionResult::Graded(graded) => &graded.tests,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed log file name (need two [..] groups): {0}")]
    MalformedFilename(String),

    #[error("Header line does not match '{id}‣{problem}: <score>'")]
    MalformedHeader { id: String, problem: String },

    #[error("Odd number of score/block fragments in log body: {0}")]
    MalformedBody(usize),

    #[error("Invalid test score: {0:?}")]
    InvalidScore(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Short machine-readable kind, used in CLI reports and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::MalformedFilename(_) => "malformed_filename",
            ParseError::MalformedHeader { .. } => "malformed_header",
            ParseError::MalformedBody(_) => "malformed_body",
            ParseError::InvalidScore(_) => "invalid_score",
            ParseError::Read { .. } => "read",
        }
    }
}
