use super::grammar::parse_number;
use super::model::{ParseError, TestCase};
use super::segment::RawTestCase;
use super::traits::VerdictMapper;
use super::{time, verdict, EOL};

/// Build a [`TestCase`] from one raw `(score, block)` pair.
pub fn parse(raw: RawTestCase<'_>, mapper: &dyn VerdictMapper) -> Result<TestCase, ParseError> {
    let score = parse_number(raw.score).ok_or_else(|| ParseError::InvalidScore(raw.score.to_string()))?;

    // The marker line's own terminator
    let block = raw.block.strip_prefix(EOL).unwrap_or(raw.block);

    let timed = time::extract(block);
    let verdict = verdict::extract(&timed.block, mapper);

    Ok(TestCase {
        score,
        time: timed.time,
        verdict: verdict.verdict,
        details: verdict.details,
    })
}
