//! Parsing of human-typed inline-comment locations.
//!
//! Three syntaxes are accepted, tried most-structured-first so a malformed
//! character range can never fall through to the line-range grammar:
//!
//! - `L12C13-L12C19`: character range (letter markers case-insensitive)
//! - `10-20`: line range
//! - `10`: single line

use once_cell::sync::Lazy;
use regex::Regex;

use crate::client::models::CommentRange;
use crate::error::{GerritError, Result};

/// Character sentinel wide enough to cover any realistic line length. The
/// server's range model requires character bounds even for line-granularity
/// comments.
const LINE_RANGE_END_CHARACTER: u32 = 10000;

static CHAR_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^L(\d+)C(\d+)-L(\d+)C(\d+)$").unwrap());
static LINE_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)-(\d+)$").unwrap());
static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)$").unwrap());

/// A parsed comment anchor within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSpec {
    /// A single line.
    Line(u32),
    /// An inclusive range of whole lines.
    LineRange { start: u32, end: u32 },
    /// A character-granular range.
    CharRange(CommentRange),
}

impl LocationSpec {
    /// Parse a location string. All patterns are anchored; trailing garbage
    /// or non-numeric components fail with `InvalidLocation`.
    pub fn parse(spec: &str) -> Result<Self> {
        if let Some(caps) = CHAR_RANGE_RE.captures(spec) {
            return Ok(LocationSpec::CharRange(CommentRange {
                start_line: parse_int(&caps[1], spec)?,
                start_character: parse_int(&caps[2], spec)?,
                end_line: parse_int(&caps[3], spec)?,
                end_character: parse_int(&caps[4], spec)?,
            }));
        }

        if let Some(caps) = LINE_RANGE_RE.captures(spec) {
            return Ok(LocationSpec::LineRange {
                start: parse_int(&caps[1], spec)?,
                end: parse_int(&caps[2], spec)?,
            });
        }

        if let Some(caps) = LINE_RE.captures(spec) {
            return Ok(LocationSpec::Line(parse_int(&caps[1], spec)?));
        }

        Err(GerritError::InvalidLocation(spec.to_string()))
    }

    /// The anchor line: always the last line covered by the location.
    pub fn line(&self) -> u32 {
        match self {
            LocationSpec::Line(line) => *line,
            LocationSpec::LineRange { end, .. } => *end,
            LocationSpec::CharRange(range) => range.end_line,
        }
    }

    /// The wire-level range, when the location is wider than a single line.
    pub fn range(&self) -> Option<CommentRange> {
        match self {
            LocationSpec::Line(_) => None,
            LocationSpec::LineRange { start, end } => Some(CommentRange {
                start_line: *start,
                start_character: 0,
                end_line: *end,
                end_character: LINE_RANGE_END_CHARACTER,
            }),
            LocationSpec::CharRange(range) => Some(*range),
        }
    }
}

fn parse_int(digits: &str, spec: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|_| GerritError::InvalidLocation(spec.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_parses() {
        let spec = LocationSpec::parse("10").unwrap();
        assert_eq!(spec, LocationSpec::Line(10));
        assert_eq!(spec.line(), 10);
        assert_eq!(spec.range(), None);
    }

    #[test]
    fn line_range_parses_with_character_sentinel() {
        let spec = LocationSpec::parse("10-20").unwrap();
        assert_eq!(spec, LocationSpec::LineRange { start: 10, end: 20 });
        assert_eq!(spec.line(), 20);
        assert_eq!(
            spec.range(),
            Some(CommentRange {
                start_line: 10,
                start_character: 0,
                end_line: 20,
                end_character: 10000,
            })
        );
    }

    #[test]
    fn char_range_parses_verbatim() {
        let spec = LocationSpec::parse("L12C13-L12C19").unwrap();
        assert_eq!(spec.line(), 12);
        assert_eq!(
            spec.range(),
            Some(CommentRange {
                start_line: 12,
                start_character: 13,
                end_line: 12,
                end_character: 19,
            })
        );
    }

    #[test]
    fn char_range_markers_are_case_insensitive() {
        let spec = LocationSpec::parse("l3c0-L4C7").unwrap();
        assert_eq!(spec.line(), 4);
    }

    #[test]
    fn char_range_spanning_lines_anchors_on_end_line() {
        let spec = LocationSpec::parse("L5C2-L9C1").unwrap();
        assert_eq!(spec.line(), 9);
        assert_eq!(spec.range().unwrap().start_line, 5);
    }

    #[test]
    fn non_numeric_location_is_rejected() {
        assert!(matches!(
            LocationSpec::parse("abc"),
            Err(GerritError::InvalidLocation(s)) if s == "abc"
        ));
    }

    #[test]
    fn malformed_char_range_does_not_fall_through_to_line_range() {
        // Has a dash like a line range but non-numeric halves.
        assert!(LocationSpec::parse("L12C13-L12").is_err());
        assert!(LocationSpec::parse("1x-20").is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(LocationSpec::parse("10 ").is_err());
        assert!(LocationSpec::parse("10-20x").is_err());
        assert!(LocationSpec::parse("L1C1-L1C2!").is_err());
    }

    #[test]
    fn empty_location_is_rejected() {
        assert!(LocationSpec::parse("").is_err());
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        assert!(LocationSpec::parse("99999999999999999999").is_err());
    }
}
