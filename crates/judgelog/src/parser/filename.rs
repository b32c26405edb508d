//! Filename — decode `...[id][problem].log` into a [`SubmissionIdentity`].

use super::model::{ParseError, SubmissionIdentity};

/// Contents of every non-empty `[...]` group, left to right.
///
/// A group closes at the first `]` after at least one content character,
/// so `[]x]` yields `]x`.
pub fn bracket_groups(name: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut pos = 0;

    while let Some(open) = name[pos..].find('[').map(|i| pos + i) {
        let content_start = open + 1;
        let Some(first) = name[content_start..].chars().next() else {
            break;
        };
        let search_from = content_start + first.len_utf8();
        match name[search_from..].find(']') {
            Some(i) => {
                let close = search_from + i;
                groups.push(&name[content_start..close]);
                pos = close + 1;
            }
            None => pos = content_start,
        }
    }

    groups
}

/// Decode the submission identity from a log file name.
///
/// Only the last two bracket groups count: `[id][problem]`.
pub fn decode(name: &str) -> Result<SubmissionIdentity, ParseError> {
    let groups = bracket_groups(name);
    match groups.as_slice() {
        [.., id, problem] => Ok(SubmissionIdentity::new(*id, *problem)),
        _ => Err(ParseError::MalformedFilename(name.to_string())),
    }
}
