//! Segment — split a whole log into its compile-error or graded shape.
//!
//! Layout of a judge log (CRLF separated):
//!
//! ```text
//! 0     <id>‣<problem>: <final score>
//! 1..3  fixed boilerplate
//! 4..   compiler output, or <id>‣<problem>‣TestNN: <score> blocks
//! ```
//!
//! The compile-error path keeps everything from line 3; the graded path
//! starts at line 4. Both offsets are a format contract with the judge.

use tracing::{debug, warn};

use super::grammar::{match_header, parse_number, ScoreMarkers};
use super::model::{ParseError, SubmissionIdentity};
use super::{COMPILE_ERROR_DETAILS_LINE, EOL, TEST_DATA_LINE};

/// One raw `(score, block)` pair, borrowed from the log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTestCase<'a> {
    pub score: &'a str,
    pub block: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segmented<'a> {
    CompileError { details: &'a str },
    Graded { final_score: f64, tests: Vec<RawTestCase<'a>> },
}

/// First line of `text` (up to the first CRLF).
fn first_line(text: &str) -> &str {
    text.split(EOL).next().unwrap_or("")
}

/// Everything from line `n` on; CRLF splitting then rejoining is the
/// identity on that suffix. Empty when the text has fewer lines.
pub fn lines_from(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find(EOL) {
            Some(idx) => rest = &rest[idx + EOL.len()..],
            None => return "",
        }
    }
    rest
}

/// Split `body` around score markers, regex-split style:
/// `[prefix, score₁, block₁, score₂, block₂, …]`.
pub fn split_on_markers<'a>(body: &'a str, identity: &SubmissionIdentity) -> Vec<&'a str> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for marker in ScoreMarkers::new(body, identity) {
        fragments.push(&body[last..marker.start]);
        fragments.push(marker.score);
        last = marker.end;
    }
    fragments.push(&body[last..]);
    fragments
}

/// Drop empty fragments and pair the rest in order.
pub fn pair_fragments<'a>(fragments: &[&'a str]) -> Result<Vec<RawTestCase<'a>>, ParseError> {
    let kept: Vec<&str> = fragments.iter().copied().filter(|f| !f.is_empty()).collect();
    if kept.len() % 2 != 0 {
        return Err(ParseError::MalformedBody(kept.len()));
    }
    Ok(kept
        .chunks_exact(2)
        .map(|pair| RawTestCase { score: pair[0], block: pair[1] })
        .collect())
}

/// Segment a full log.
pub fn segment<'a>(text: &'a str, identity: &SubmissionIdentity) -> Result<Segmented<'a>, ParseError> {
    let header = first_line(text);
    let score_text = match_header(header, identity).ok_or_else(|| ParseError::MalformedHeader {
        id: identity.id.clone(),
        problem: identity.problem.clone(),
    })?;

    let Some(final_score) = parse_number(score_text) else {
        debug!(id = %identity.id, problem = %identity.problem, header = %score_text, "Compile error log");
        return Ok(Segmented::CompileError {
            details: lines_from(text, COMPILE_ERROR_DETAILS_LINE),
        });
    };

    check_boilerplate(text, identity);

    let body = lines_from(text, TEST_DATA_LINE);
    let tests = pair_fragments(&split_on_markers(body, identity))?;
    debug!(
        id = %identity.id,
        problem = %identity.problem,
        final_score,
        tests = tests.len(),
        "Graded log segmented"
    );

    Ok(Segmented::Graded { final_score, tests })
}

/// Warn when a score marker sits inside the skipped boilerplate lines,
/// which means the judge's layout moved and the fixed offsets are stale.
///
/// Returns the line number of the misplaced marker.
fn check_boilerplate(text: &str, identity: &SubmissionIdentity) -> Option<usize> {
    let (line_no, _) = text
        .split(EOL)
        .enumerate()
        .skip(1)
        .take(TEST_DATA_LINE - 1)
        .find(|(_, line)| ScoreMarkers::new(line, identity).next().is_some())?;

    warn!(
        id = %identity.id,
        problem = %identity.problem,
        line = line_no,
        "Score marker inside header boilerplate; log layout may have changed"
    );
    Some(line_no)
}
