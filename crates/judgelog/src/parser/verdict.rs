//! Verdict — verdict token and diagnostic details of a test block.

use super::grammar::rest_of_line;
use super::traits::VerdictMapper;
use super::EOL;

const EXIT_CODE_OPEN: &str = "(Hexadecimal: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub verdict: String,
    pub details: Option<String>,
}

/// Hex payload of a `(Hexadecimal: <payload>)` annotation.
///
/// The payload runs to the last `)` on the line.
pub fn exit_code(line: &str) -> Option<&str> {
    let open = line.find(EXIT_CODE_OPEN)?;
    let tail = rest_of_line(&line[open + EXIT_CODE_OPEN.len()..]);
    let close = tail.rfind(')')?;
    Some(&tail[..close]).filter(|payload| !payload.is_empty())
}

/// Split a (time-stripped) block into verdict and details.
///
/// Blank lines before the verdict token are skipped; the line after the
/// token is the details line.
pub fn extract(block: &str, mapper: &dyn VerdictMapper) -> Verdict {
    // Skipping blanks departs from "line 0 is the verdict": a block like
    // `\r\nAC` yields verdict "AC" instead of "" with details "AC".
    let mut lines = block.split(EOL).skip_while(|line| line.is_empty());
    let raw_verdict = lines.next().unwrap_or("");
    let raw_details = lines.next().unwrap_or("");

    let details = match exit_code(raw_details) {
        Some(hex) => Some(format!("Exit code: {}", hex)),
        None if raw_details.is_empty() => None,
        None => Some(raw_details.to_string()),
    };

    Verdict {
        verdict: mapper.map(raw_verdict).to_string(),
        details,
    }
}
