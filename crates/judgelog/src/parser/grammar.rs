//! Grammar — literal sub-matchers for the judge log format.
//!
//! The log grammar is small and fixed: identity parts joined by `‣`, a
//! `": "` before a score, `Test` plus a two-digit index for score markers.
//! Identity parts come from the file name and may contain any character, so
//! everything here matches literally (case-insensitively) instead of going
//! through a pattern compiler.

use super::model::SubmissionIdentity;
use super::SEPARATOR;

/// Case-insensitive character comparison (full lowercase mapping).
pub(crate) fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Match `needle` at byte offset `at` of `hay`, ignoring case.
///
/// Returns the byte offset just past the match.
pub fn match_ignore_case_at(hay: &str, at: usize, needle: &str) -> Option<usize> {
    let rest = hay.get(at..)?;
    let mut hay_chars = rest.char_indices();
    for n in needle.chars() {
        let (_, h) = hay_chars.next()?;
        if !chars_eq_ignore_case(h, n) {
            return None;
        }
    }
    Some(match hay_chars.next() {
        Some((i, _)) => at + i,
        None => hay.len(),
    })
}

/// Leftmost case-insensitive occurrence of `needle` at or after `from`.
pub fn find_ignore_case(hay: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    let rest = hay.get(from..)?;
    rest.char_indices()
        .map(|(i, _)| from + i)
        .find_map(|start| match_ignore_case_at(hay, start, needle).map(|end| (start, end)))
}

/// Text up to (not including) the first CR or LF.
pub fn rest_of_line(s: &str) -> &str {
    match s.find(['\r', '\n']) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Parse a judge-printed number.
///
/// Surrounding whitespace is ignored, and blank text counts as zero (the
/// judge prints an empty score for a test worth nothing). Only finite
/// decimal values count; `inf`/`nan` spellings are not numbers.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Extract the score text from a header line `<id>‣<problem>: <score>`.
pub fn match_header<'a>(line: &'a str, identity: &SubmissionIdentity) -> Option<&'a str> {
    let needle = format!("{}{}{}: ", identity.id, SEPARATOR, identity.problem);
    let (_, end) = find_ignore_case(line, &needle, 0)?;
    Some(rest_of_line(&line[end..]))
}

/// One `<id>‣<problem>‣TestNN: <score>` marker found in the log body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMarker<'a> {
    /// Byte offset of the marker start
    pub start: usize,
    /// Byte offset just past the captured score
    pub end: usize,
    pub score: &'a str,
}

/// Left-to-right, non-overlapping scan for score markers.
pub struct ScoreMarkers<'a> {
    text: &'a str,
    prefix: String,
    pos: usize,
}

impl<'a> ScoreMarkers<'a> {
    pub fn new(text: &'a str, identity: &SubmissionIdentity) -> Self {
        Self {
            text,
            prefix: format!(
                "{}{sep}{}{sep}Test",
                identity.id,
                identity.problem,
                sep = SEPARATOR
            ),
            pos: 0,
        }
    }
}

impl<'a> Iterator for ScoreMarkers<'a> {
    type Item = ScoreMarker<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        loop {
            let (start, prefix_end) = find_ignore_case(text, &self.prefix, self.pos)?;
            let tail = &text.as_bytes()[prefix_end..];

            // Two-digit index, then ": "
            if tail.len() >= 4
                && tail[0].is_ascii_digit()
                && tail[1].is_ascii_digit()
                && &tail[2..4] == b": "
            {
                let score_start = prefix_end + 4;
                let score = rest_of_line(&text[score_start..]);
                let end = score_start + score.len();
                self.pos = end;
                return Some(ScoreMarker { start, end, score });
            }

            // Not a marker here; resume after the first char of this candidate
            let step = text[start..].chars().next().map_or(1, char::len_utf8);
            self.pos = start + step;
        }
    }
}
