//! Shape checks: does a value look like a pattern?
//!
//! A [`Matcher`] wraps any JSON value and validates its shape. `regex` and
//! `glob` are the primitives; `uuid` and `short_id` are named
//! specializations. New named shape checks follow the same pattern: validate
//! the target's type, build a rule, assert, return the outcome.

use glob::Pattern;
use regex::Regex;
use serde_json::Value;

use crate::error::{shape_of, ExpectError};
use crate::grammar::Grammar;

/// Canonical lowercase 8-4-4-4-12 UUID shape.
const UUID_PATTERN: &str =
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

/// Validates one value's shape.
///
/// Constructed directly rather than through [`expect`](crate::expect): shape
/// checks apply to values the dispatch root does not wrap (strings), and to
/// mapping entry values via [`EntryCheck`](crate::EntryCheck).
///
/// ```
/// use affirm::Matcher;
/// use serde_json::json;
///
/// Matcher::new(json!("f81d4fae-7dec-41d0-a765-00a0c91e6bf6")).uuid()?;
/// Matcher::new(json!(123456)).short_id()?;
/// # Ok::<(), affirm::ExpectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    value: Value,
}

impl Matcher {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Assert the target is a string whose entirety matches `pattern`.
    ///
    /// The match is full-string, not a substring search. A non-string target
    /// or an invalid pattern is a usage error; a mismatch is an assertion
    /// failure.
    pub fn regex(&self, pattern: &str) -> Result<bool, ExpectError> {
        let text = self.text("regex")?;

        let re = Regex::new(&format!("^(?:{})$", pattern)).map_err(|err| {
            ExpectError::BadPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            }
        })?;

        if re.is_match(text) {
            Ok(true)
        } else {
            Err(ExpectError::Assertion(format!(
                "\"{}\" does not match pattern \"{}\"",
                text, pattern
            )))
        }
    }

    /// Assert the target is a string whose entirety matches the glob
    /// `pattern` (e.g. `*.json`).
    pub fn glob(&self, pattern: &str) -> Result<bool, ExpectError> {
        let text = self.text("glob")?;

        let glob = Pattern::new(pattern).map_err(|err| ExpectError::BadPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;

        if glob.matches(text) {
            Ok(true)
        } else {
            Err(ExpectError::Assertion(format!(
                "\"{}\" does not match glob \"{}\"",
                text, pattern
            )))
        }
    }

    /// Assert the target is a canonically formatted lowercase UUID string.
    pub fn uuid(&self) -> Result<bool, ExpectError> {
        self.regex(UUID_PATTERN)
    }

    /// Assert the target is an integer strictly between 100000 and 999999,
    /// the range short identifiers are drawn from.
    pub fn short_id(&self) -> Result<bool, ExpectError> {
        let n = self
            .value
            .as_i64()
            .ok_or_else(|| ExpectError::WrongType {
                check: "short_id",
                expected: "integer",
                actual: self.value.to_string(),
            })?;

        if 100000 < n && n < 999999 {
            Ok(true)
        } else {
            Err(ExpectError::Assertion(format!(
                "{} is not in the short identifier range 100000..999999",
                n
            )))
        }
    }

    fn text(&self, check: &'static str) -> Result<&str, ExpectError> {
        self.value.as_str().ok_or_else(|| ExpectError::WrongType {
            check,
            expected: "string",
            actual: format!("{} {}", shape_of(&self.value), self.value),
        })
    }
}

impl Grammar for Matcher {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_regex_requires_full_match() {
        let matcher = Matcher::new(json!("abc123"));
        assert!(matcher.regex(r"[a-z]+\d+").is_ok());
        // A partial match is not enough.
        assert!(matcher.regex(r"[a-z]+").is_err());
    }

    #[test]
    fn test_regex_on_non_string_is_usage_error() {
        let err = Matcher::new(json!(42)).regex(".*").unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_invalid_regex_is_usage_error() {
        let err = Matcher::new(json!("abc")).regex("(unclosed").unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_uuid_accepts_canonical_form() {
        let matcher = Matcher::new(json!("f81d4fae-7dec-41d0-a765-00a0c91e6bf6"));
        assert_eq!(matcher.that().uuid().ok(), Some(true));
    }

    #[test]
    fn test_uuid_rejects_wrong_segment_lengths() {
        let matcher = Matcher::new(json!("f81d4fae-7dec-41d0-a765-00a0c91e6bf"));
        let err = matcher.uuid().unwrap_err();
        assert!(err.is_assertion());
    }

    #[test]
    fn test_uuid_rejects_uppercase() {
        let matcher = Matcher::new(json!("F81D4FAE-7DEC-41D0-A765-00A0C91E6BF6"));
        assert!(matcher.uuid().is_err());
    }

    #[test]
    fn test_glob_full_match() {
        assert!(Matcher::new(json!("config.json")).glob("*.json").is_ok());
        assert!(Matcher::new(json!("config.yaml")).glob("*.json").is_err());
    }

    #[test]
    fn test_short_id_bounds_are_exclusive() {
        assert!(Matcher::new(json!(100001)).short_id().is_ok());
        assert!(Matcher::new(json!(999998)).short_id().is_ok());
        assert!(Matcher::new(json!(100000)).short_id().is_err());
        assert!(Matcher::new(json!(999999)).short_id().is_err());
    }

    #[test]
    fn test_short_id_on_float_is_usage_error() {
        let err = Matcher::new(json!(123456.5)).short_id().unwrap_err();
        assert!(err.is_usage());
    }
}
