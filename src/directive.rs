//! Directive parsing
//!
//! Translated programs carry their pattern literals around as strings:
//! `s/old/new/g`, `s|a\|b|X|`, `m/pat/i`. This module tokenizes those
//! directive strings into structured form. The separator is whatever
//! character follows the marker, and a backslash escapes it inside a
//! segment. Parsing is pure: the same directive string always yields the
//! same value, and a malformed directive yields `DirectiveSyntaxError`
//! without any partial result.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Parsed form of a substitution literal (`s<sep>PATTERN<sep>REPLACEMENT<sep>FLAGS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Raw pattern text, not yet compiled. May contain backslash-escaped
    /// separators; the engine interprets those, not the parser.
    pub pattern: String,
    /// Replacement text in the engine's replacement syntax. The legacy
    /// `\$` (literal dollar) marker has already been normalized to the
    /// engine's `$$` spelling.
    pub replacement: String,
    /// Replace every non-overlapping match instead of only the first.
    pub global: bool,
    /// The raw flag letters after the final separator. Only `g` and `i`
    /// carry meaning; the rest pass through uninterpreted.
    pub flags: Vec<char>,
}

impl Directive {
    pub fn case_insensitive(&self) -> bool {
        self.flags.contains(&'i')
    }
}

/// Parsed form of a match literal (`m<sep>PATTERN<sep>FLAGS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDirective {
    pub pattern: String,
    pub flags: Vec<char>,
}

impl MatchDirective {
    pub fn case_insensitive(&self) -> bool {
        self.flags.contains(&'i')
    }
}

/// Malformed directive string. Carries the offending directive so the
/// translated program's caller can see exactly what failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSyntaxError {
    pub directive: String,
    pub reason: String,
}

impl DirectiveSyntaxError {
    fn new(directive: &str, reason: impl Into<String>) -> Self {
        DirectiveSyntaxError {
            directive: directive.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DirectiveSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed directive '{}': {}", self.directive, self.reason)
    }
}

impl std::error::Error for DirectiveSyntaxError {}

/// Parse a substitution directive.
///
/// The character immediately after the `s` marker is the separator; any
/// character is legal. The pattern segment runs to the next un-escaped
/// separator (a `\<sep>` pair is kept verbatim in the segment), the
/// replacement segment to the one after that by the same scan, and
/// everything past the final separator is flags.
pub fn parse_substitution(directive: &str) -> Result<Directive, DirectiveSyntaxError> {
    let mut chars = directive.chars().peekable();

    match chars.next() {
        Some('s') => {}
        _ => {
            return Err(DirectiveSyntaxError::new(
                directive,
                "missing substitution marker 's'",
            ));
        }
    }

    let sep = chars.next().ok_or_else(|| {
        DirectiveSyntaxError::new(directive, "missing separator after 's'")
    })?;

    let pattern = scan_segment(&mut chars, sep).ok_or_else(|| {
        DirectiveSyntaxError::new(directive, "unterminated pattern segment")
    })?;

    let replacement_raw = scan_segment(&mut chars, sep).ok_or_else(|| {
        DirectiveSyntaxError::new(directive, "unterminated replacement segment")
    })?;

    let flags: Vec<char> = chars.collect();
    let global = flags.contains(&'g');

    Ok(Directive {
        pattern,
        replacement: normalize_literal_dollar(&replacement_raw),
        global,
        flags,
    })
}

/// Parse a match directive.
///
/// Accepts the `m<sep>PATTERN<sep>FLAGS` form, or the legacy shorthand
/// `/PATTERN/FLAGS` with the marker omitted.
pub fn parse_match(directive: &str) -> Result<MatchDirective, DirectiveSyntaxError> {
    let mut chars = directive.chars().peekable();

    let sep = match chars.next() {
        Some('m') => chars.next().ok_or_else(|| {
            DirectiveSyntaxError::new(directive, "missing separator after 'm'")
        })?,
        Some('/') => '/',
        _ => {
            return Err(DirectiveSyntaxError::new(
                directive,
                "missing match marker 'm'",
            ));
        }
    };

    let pattern = scan_segment(&mut chars, sep).ok_or_else(|| {
        DirectiveSyntaxError::new(directive, "unterminated pattern segment")
    })?;

    let flags: Vec<char> = chars.collect();

    Ok(MatchDirective { pattern, flags })
}

/// Consume characters up to the next un-escaped separator, which is itself
/// consumed but not included. A backslash escapes the following character;
/// the backslash is preserved in the output (interpreting `\<sep>` is the
/// engine's job). Returns None when the scan hits end-of-string first.
fn scan_segment(chars: &mut Peekable<Chars>, sep: char) -> Option<String> {
    let mut segment = String::new();

    while let Some(c) = chars.next() {
        if c == '\\' {
            // Escaped character: keep the pair verbatim. A trailing
            // backslash means the segment never terminated.
            segment.push(c);
            segment.push(chars.next()?);
        } else if c == sep {
            return Some(segment);
        } else {
            segment.push(c);
        }
    }

    None
}

/// Rewrite the legacy `\$` (literal dollar, not a backreference) marker to
/// the engine's literal-dollar spelling `$$`, so the executor can hand the
/// replacement straight to the engine.
fn normalize_literal_dollar(replacement: &str) -> String {
    let mut result = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'$') {
            chars.next();
            result.push_str("$$");
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_substitution() {
        let d = parse_substitution("s/foo/bar/g").unwrap();
        assert_eq!(
            d,
            Directive {
                pattern: "foo".to_string(),
                replacement: "bar".to_string(),
                global: true,
                flags: vec!['g'],
            }
        );
    }

    #[test]
    fn test_parse_without_global_flag() {
        let d = parse_substitution("s/foo/bar/").unwrap();
        assert!(!d.global);
        assert!(d.flags.is_empty());
    }

    #[test]
    fn test_parse_alternate_separator() {
        let d = parse_substitution("s#a/b#c#").unwrap();
        assert_eq!(d.pattern, "a/b");
        assert_eq!(d.replacement, "c");
    }

    #[test]
    fn test_escaped_separator_preserved_in_pattern() {
        // The escape must not terminate the pattern early, and the
        // backslash stays in the segment for the engine.
        let d = parse_substitution(r"s|a\|b|X|").unwrap();
        assert_eq!(d.pattern, r"a\|b");
        assert_eq!(d.replacement, "X");
    }

    #[test]
    fn test_escaped_backslash_then_separator_terminates() {
        // `\\` is a complete escape pair, so the following separator is
        // un-escaped and ends the segment.
        let d = parse_substitution(r"s/a\\/b/").unwrap();
        assert_eq!(d.pattern, r"a\\");
        assert_eq!(d.replacement, "b");
    }

    #[test]
    fn test_literal_dollar_normalized() {
        let d = parse_substitution(r"s/x/\$1/").unwrap();
        assert_eq!(d.replacement, "$$1");
    }

    #[test]
    fn test_backreference_left_alone() {
        let d = parse_substitution("s/(a)/$1$1/").unwrap();
        assert_eq!(d.replacement, "$1$1");
    }

    #[test]
    fn test_unknown_flags_pass_through() {
        let d = parse_substitution("s/a/b/gx").unwrap();
        assert!(d.global);
        assert_eq!(d.flags, vec!['g', 'x']);
    }

    #[test]
    fn test_case_insensitive_flag() {
        let d = parse_substitution("s/a/b/i").unwrap();
        assert!(d.case_insensitive());
        assert!(!d.global);
    }

    #[test]
    fn test_missing_marker() {
        let err = parse_substitution("x/a/b/").unwrap_err();
        assert!(err.reason.contains("marker"));
        assert_eq!(err.directive, "x/a/b/");
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_substitution("s").unwrap_err();
        assert!(err.reason.contains("separator"));
    }

    #[test]
    fn test_unterminated_pattern() {
        let err = parse_substitution("s/ab").unwrap_err();
        assert!(err.reason.contains("pattern"));
    }

    #[test]
    fn test_unterminated_replacement() {
        let err = parse_substitution("s/a/b").unwrap_err();
        assert!(err.reason.contains("replacement"));
    }

    #[test]
    fn test_trailing_backslash_is_unterminated() {
        let err = parse_substitution(r"s/a\").unwrap_err();
        assert!(err.reason.contains("pattern"));
    }

    #[test]
    fn test_empty_segments_are_legal() {
        let d = parse_substitution("s///").unwrap();
        assert_eq!(d.pattern, "");
        assert_eq!(d.replacement, "");
    }

    #[test]
    fn test_parse_is_pure() {
        let a = parse_substitution(r"s|a\|b|X|g").unwrap();
        let b = parse_substitution(r"s|a\|b|X|g").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_match_directive() {
        let m = parse_match("m/e(l+)o/").unwrap();
        assert_eq!(m.pattern, "e(l+)o");
        assert!(m.flags.is_empty());
    }

    #[test]
    fn test_parse_match_shorthand() {
        let m = parse_match("/xyz/i").unwrap();
        assert_eq!(m.pattern, "xyz");
        assert!(m.case_insensitive());
    }

    #[test]
    fn test_parse_match_alternate_separator() {
        let m = parse_match(r"m#a/b#").unwrap();
        assert_eq!(m.pattern, "a/b");
    }

    #[test]
    fn test_parse_match_missing_marker() {
        let err = parse_match("xyz").unwrap_err();
        assert!(err.reason.contains("marker"));
    }

    #[test]
    fn test_parse_match_unterminated() {
        let err = parse_match("m/abc").unwrap_err();
        assert!(err.reason.contains("pattern"));
    }
}
