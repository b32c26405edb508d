//! Time — the optional `Thời gian ≈ <seconds> giây` line of a test block.

use std::borrow::Cow;

use super::grammar::{parse_number, rest_of_line};
use super::EOL;

const TIME_PREFIX: &str = "Thời gian ≈ ";
const TIME_SUFFIX: &str = " giây";

/// A test block with its time line removed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedBlock<'a> {
    /// Seconds; 0 when the block has no time line
    pub time: f64,
    pub block: Cow<'a, str>,
}

/// Location of a time line: `(line start, end including CRLF, seconds)`.
pub fn find_time_line(block: &str) -> Option<(usize, usize, f64)> {
    let mut line_starts = std::iter::once(0).chain(block.match_indices('\n').map(|(i, _)| i + 1));

    line_starts.find_map(|start| {
        let line = rest_of_line(&block[start..]);
        let line_end = start + line.len();
        if !block[line_end..].starts_with(EOL) {
            return None;
        }
        let seconds = line
            .strip_prefix(TIME_PREFIX)?
            .strip_suffix(TIME_SUFFIX)
            .filter(|seconds| !seconds.is_empty())?;
        let time = parse_number(seconds)?;
        Some((start, line_end + EOL.len(), time))
    })
}

/// Pull the elapsed time out of a block, leaving the other lines untouched.
pub fn extract(block: &str) -> TimedBlock<'_> {
    match find_time_line(block) {
        Some((0, end, time)) => TimedBlock { time, block: Cow::Borrowed(&block[end..]) },
        Some((start, end, time)) => {
            let mut rest = String::with_capacity(block.len() - (end - start));
            rest.push_str(&block[..start]);
            rest.push_str(&block[end..]);
            TimedBlock { time, block: Cow::Owned(rest) }
        }
        None => TimedBlock { time: 0.0, block: Cow::Borrowed(block) },
    }
}
