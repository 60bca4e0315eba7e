//! Regex engine adapter
//!
//! Thin boundary between the runtime and the `regex` crate. Everything that
//! compiles or runs a pattern goes through here, so the rest of the crate
//! never touches engine types directly except for the compiled `Regex`.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Compile a raw pattern, optionally case-insensitively.
///
/// Case-insensitivity is the only engine option the legacy flag set can
/// toggle (the `i` flag); everything else uses the engine defaults.
pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    if case_insensitive {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid regex pattern: {}", pattern))
    } else {
        Regex::new(pattern)
            .with_context(|| format!("Invalid regex pattern: {}", pattern))
    }
}

/// Run a search and return the captured groups, or None when the pattern
/// does not match.
///
/// Group 0 is the whole match; groups 1..N follow the engine's numbering
/// for parenthesized captures. A group that did not participate in the
/// match is returned as `None` at its index.
pub fn search(re: &Regex, subject: &str) -> Option<Vec<Option<String>>> {
    re.captures(subject).map(|caps| {
        (0..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_valid_pattern() {
        let re = compile("a(b+)c", false).unwrap();
        assert!(re.is_match("abbbc"));
    }

    #[test]
    fn test_compile_invalid_pattern() {
        let err = compile("a(b", false).unwrap_err();
        assert!(err.to_string().contains("a(b"));
    }

    #[test]
    fn test_compile_case_insensitive() {
        let re = compile("hello", true).unwrap();
        assert!(re.is_match("HELLO world"));
    }

    #[test]
    fn test_search_captures_in_order() {
        let re = compile("(a+)(b+)", false).unwrap();
        let groups = search(&re, "xxaabbyy").unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].as_deref(), Some("aabb"));
        assert_eq!(groups[1].as_deref(), Some("aa"));
        assert_eq!(groups[2].as_deref(), Some("bb"));
    }

    #[test]
    fn test_search_no_match() {
        let re = compile("zzz", false).unwrap();
        assert!(search(&re, "hello").is_none());
    }

    #[test]
    fn test_search_unparticipating_group() {
        let re = compile("a(x)?b", false).unwrap();
        let groups = search(&re, "ab").unwrap();
        assert_eq!(groups[0].as_deref(), Some("ab"));
        assert_eq!(groups[1], None);
    }
}
