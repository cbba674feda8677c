//! Key and membership assertions over a JSON object target.
//!
//! [`MapAssertion`] consumes the full chain flag set: the quantifier flag
//! picks "all" vs "any" semantics for [`keys`](MapAssertion::keys), the
//! inclusion flag relaxes the exact-set requirement, and negation inverts
//! the aggregate result last.
//!
//! A second membership mode checks a single key's *value*: an
//! [`EntryCheck`] pairs a key with a shape rule or lazy comparison and is
//! evaluated by [`MapAssertion::should`].

use serde_json::{Map, Value};

use crate::chain::{ChainFlags, Flagged};
use crate::error::ExpectError;
use crate::grammar::Grammar;
use crate::lazy::LazyComparison;
use crate::matcher::Matcher;

/// The mapping-oriented assertable wrapper.
///
/// ```
/// use affirm::{expect, Flagged, Grammar};
/// use serde_json::json;
///
/// expect(json!({"a": 1, "b": 2}))?.to().have().all().keys(&["a", "b"])?;
/// expect(json!({"a": 1, "b": 2}))?.to().not().have().any().keys(&["c", "d"])?;
/// expect(json!({"a": 1, "b": 2, "c": 3}))?.to().include().all().keys(&["a", "b"])?;
/// # Ok::<(), affirm::ExpectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MapAssertion {
    target: Map<String, Value>,
    flags: ChainFlags,
}

impl MapAssertion {
    pub fn new(target: Map<String, Value>) -> Self {
        Self {
            target,
            flags: ChainFlags::default(),
        }
    }

    /// The wrapped target.
    pub fn target(&self) -> &Map<String, Value> {
        &self.target
    }

    fn target_literal(&self) -> String {
        Value::Object(self.target.clone()).to_string()
    }

    /// Assert the target has the given keys.
    ///
    /// By default the target must have all of the given keys and no more;
    /// an extra key present in the target fails immediately, before
    /// negation applies. Add `.include()` earlier in the chain to only
    /// require a superset, or `.any()` to require at least one of the given
    /// keys (exactness is never checked in any-mode). Add `.not()` to
    /// negate the aggregate result.
    pub fn keys(&self, requested: &[&str]) -> Result<(), ExpectError> {
        let mut result;

        if self.flags.check_all {
            result = true;

            // No short-circuit: only the aggregate boolean matters.
            for key in requested {
                if !self.target.contains_key(*key) {
                    result = false;
                }
            }

            if !self.flags.include_only {
                for present in self.target.keys() {
                    if !requested.contains(&present.as_str()) {
                        return Err(ExpectError::Assertion(format!(
                            "key \"{}\" exists in the target {} unexpectedly",
                            present,
                            self.target_literal()
                        )));
                    }
                }
            }
        } else {
            result = requested.iter().any(|key| self.target.contains_key(*key));
        }

        if self.flags.negated {
            result = !result;
        }

        if result {
            Ok(())
        } else {
            Err(ExpectError::Assertion(self.keys_failure(requested)))
        }
    }

    /// Assert on a single key; shorthand for `keys(&[key])`.
    pub fn key(&self, key: &str) -> Result<(), ExpectError> {
        self.keys(&[key])
    }

    /// Evaluate a group of per-entry checks against the target.
    ///
    /// Every check in the group runs unconditionally; a failure in one does
    /// not stop the others. The first error encountered is returned once
    /// all have run.
    ///
    /// ```
    /// use affirm::{be, expect, have, Grammar};
    /// use serde_json::json;
    ///
    /// let order = json!({
    ///     "orderId": "f81d4fae-7dec-41d0-a765-00a0c91e6bf6",
    ///     "quantity": 3,
    /// });
    ///
    /// expect(order)?.should(&[
    ///     have().a().key("orderId").that().uuid(),
    ///     have().a().key("quantity").that().matches(be().greater_than(0.0)),
    /// ])?;
    /// # Ok::<(), affirm::ExpectError>(())
    /// ```
    pub fn should(&self, checks: &[EntryCheck]) -> Result<(), ExpectError> {
        let mut first_failure = None;

        for check in checks {
            if let Err(err) = check.check_in(&self.target) {
                first_failure.get_or_insert(err);
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn keys_failure(&self, requested: &[&str]) -> String {
        let quantifier = if self.flags.check_all { "all" } else { "any" };

        if self.flags.negated {
            format!(
                "{} has {} of keys {:?}, should not",
                self.target_literal(),
                quantifier,
                requested
            )
        } else {
            format!(
                "{} does not have {} of keys {:?}",
                self.target_literal(),
                quantifier,
                requested
            )
        }
    }
}

impl Flagged for MapAssertion {
    fn flags_mut(&mut self) -> &mut ChainFlags {
        &mut self.flags
    }
}

impl Grammar for MapAssertion {}

/// Start building an [`EntryCheck`]:
/// `have().a().key("gameId").that().uuid()`.
pub fn have() -> Selector {
    Selector
}

/// Entry point for per-entry checks; see [`have`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Selector;

impl Selector {
    /// Name the key whose value the check applies to.
    pub fn key(self, key: &str) -> KeySelector {
        KeySelector {
            key: key.to_string(),
        }
    }
}

impl Grammar for Selector {}

/// A named key awaiting its rule.
#[derive(Debug, Clone)]
pub struct KeySelector {
    key: String,
}

impl KeySelector {
    /// Require the key's value to be a canonical lowercase UUID string.
    pub fn uuid(self) -> EntryCheck {
        self.rule(EntryRule::Uuid)
    }

    /// Require the key's value to be a short identifier (see
    /// [`Matcher::short_id`]).
    pub fn short_id(self) -> EntryCheck {
        self.rule(EntryRule::ShortId)
    }

    /// Require the key's value to fully match a regex pattern.
    pub fn regex(self, pattern: &str) -> EntryCheck {
        self.rule(EntryRule::Regex(pattern.to_string()))
    }

    /// Require the key's value to fully match a glob pattern.
    pub fn glob(self, pattern: &str) -> EntryCheck {
        self.rule(EntryRule::Glob(pattern.to_string()))
    }

    /// Require the key's value to satisfy a lazy comparison registry.
    pub fn matches(self, rules: LazyComparison) -> EntryCheck {
        self.rule(EntryRule::Matches(rules))
    }

    fn rule(self, rule: EntryRule) -> EntryCheck {
        EntryCheck {
            key: self.key,
            rule,
        }
    }
}

impl Grammar for KeySelector {}

#[derive(Debug, Clone)]
enum EntryRule {
    Uuid,
    ShortId,
    Regex(String),
    Glob(String),
    Matches(LazyComparison),
}

/// A check on one mapping entry's value, built via [`have`].
#[derive(Debug, Clone)]
pub struct EntryCheck {
    key: String,
    rule: EntryRule,
}

impl EntryCheck {
    /// The key this check applies to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Assert the key is present in `target` and its value satisfies the
    /// rule. A missing key is a usage error naming the key and the target.
    ///
    /// Public so external wrappers (e.g. a response-object shim) can apply
    /// entry checks to whatever attribute map they expose.
    pub fn check_in(&self, target: &Map<String, Value>) -> Result<(), ExpectError> {
        let value = target.get(&self.key).ok_or_else(|| ExpectError::MissingKey {
            key: self.key.clone(),
            target: Value::Object(target.clone()).to_string(),
        })?;

        match &self.rule {
            EntryRule::Uuid => Matcher::new(value.clone()).uuid().map(|_| ()),
            EntryRule::ShortId => Matcher::new(value.clone()).short_id().map(|_| ()),
            EntryRule::Regex(pattern) => Matcher::new(value.clone()).regex(pattern).map(|_| ()),
            EntryRule::Glob(pattern) => Matcher::new(value.clone()).glob(pattern).map(|_| ()),
            EntryRule::Matches(rules) => {
                let number = value.as_f64().ok_or_else(|| ExpectError::WrongType {
                    check: "matches",
                    expected: "number",
                    actual: value.to_string(),
                })?;
                rules.matches(number)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::be;
    use serde_json::json;

    fn map(value: Value) -> MapAssertion {
        match value {
            Value::Object(object) => MapAssertion::new(object),
            other => panic!("test fixture must be an object, got {}", other),
        }
    }

    #[test]
    fn test_all_keys_exact() {
        map(json!({"a": 1, "b": 2})).keys(&["a", "b"]).unwrap();
    }

    #[test]
    fn test_all_keys_extra_key_fails_in_exact_mode() {
        let err = map(json!({"a": 1, "b": 2, "c": 3}))
            .keys(&["a", "b"])
            .unwrap_err();
        assert!(err.to_string().contains("\"c\" exists in the target"));
    }

    #[test]
    fn test_include_relaxes_exactness() {
        map(json!({"a": 1, "b": 2, "c": 3}))
            .include()
            .keys(&["a", "b"])
            .unwrap();
    }

    #[test]
    fn test_include_aliases() {
        map(json!({"a": 1, "b": 2, "c": 3})).includes().keys(&["a", "b"]).unwrap();
        map(json!({"a": 1, "b": 2, "c": 3})).contain().keys(&["a", "b"]).unwrap();
        map(json!({"a": 1, "b": 2, "c": 3})).contains().keys(&["a", "b"]).unwrap();
    }

    #[test]
    fn test_include_with_duplicate_requested_keys() {
        map(json!({"a": 1, "b": 2, "c": 3}))
            .include()
            .keys(&["a", "b", "b", "b"])
            .unwrap();
    }

    #[test]
    fn test_any_keys() {
        map(json!({"a": 1})).any().keys(&["a", "z"]).unwrap();

        let err = map(json!({"a": 1})).any().keys(&["y", "z"]).unwrap_err();
        assert!(err.is_assertion());
    }

    #[test]
    fn test_any_ignores_extra_keys() {
        map(json!({"a": 1, "b": 2, "c": 3})).any().keys(&["a"]).unwrap();
    }

    #[test]
    fn test_not_any_keys() {
        map(json!({"a": 1, "b": 2}))
            .not()
            .any()
            .keys(&["c", "d"])
            .unwrap();
    }

    #[test]
    fn test_not_all_keys_fails_when_all_present() {
        let err = map(json!({"a": 1, "b": 2}))
            .not()
            .keys(&["a", "b"])
            .unwrap_err();
        assert!(err.to_string().contains("should not"));
    }

    #[test]
    fn test_key_shorthand() {
        map(json!({"a": 1})).key("a").unwrap();
        map(json!({"a": 1, "b": 2})).any().key("a").unwrap();
    }

    #[test]
    fn test_zero_keys_any_mode_never_matches() {
        assert!(map(json!({"a": 1})).any().keys(&[]).is_err());
        assert!(map(json!({})).any().keys(&[]).is_err());
    }

    #[test]
    fn test_zero_keys_all_exact_requires_empty_target() {
        map(json!({})).keys(&[]).unwrap();
        assert!(map(json!({"a": 1})).keys(&[]).is_err());
    }

    #[test]
    fn test_extra_key_check_fires_before_negation() {
        // Fail-fast exactness is not invertible by .not().
        let err = map(json!({"a": 1, "b": 2, "c": 3}))
            .not()
            .keys(&["a", "b"])
            .unwrap_err();
        assert!(err.to_string().contains("unexpectedly"));
    }

    #[test]
    fn test_failure_message_names_target_and_keys() {
        let err = map(json!({"a": 1})).include().keys(&["a", "b"]).unwrap_err();
        let text = err.to_string();
        assert!(text.contains(r#"{"a":1}"#));
        assert!(text.contains("all"));
        assert!(text.contains("\"b\""));
    }

    #[test]
    fn test_entry_check_uuid() {
        let target = json!({"gameId": "f81d4fae-7dec-41d0-a765-00a0c91e6bf6"});
        map(target)
            .should(&[have().a().key("gameId").that().uuid()])
            .unwrap();
    }

    #[test]
    fn test_entry_check_missing_key_is_usage_error() {
        let err = map(json!({"a": 1}))
            .should(&[have().key("gameId").uuid()])
            .unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("gameId"));
    }

    #[test]
    fn test_entry_checks_all_run_despite_early_failure() {
        // The first check fails, the second names a missing key. All run;
        // the first error reported is the first check's.
        let err = map(json!({"count": 0}))
            .should(&[
                have().key("count").matches(be().greater_than(5.0)),
                have().key("absent").uuid(),
            ])
            .unwrap_err();
        assert!(err.is_assertion());
        assert!(err.to_string().contains("not greater than 5"));
    }

    #[test]
    fn test_entry_check_lazy_on_non_number_is_usage_error() {
        let err = map(json!({"count": "three"}))
            .should(&[have().key("count").matches(be().greater_than(0.0))])
            .unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_entry_check_regex_and_glob() {
        let target = json!({"name": "player_42", "path": "saves/slot1.json"});
        map(target.clone())
            .should(&[have().key("name").regex(r"player_\d+")])
            .unwrap();
        map(target)
            .should(&[have().key("path").glob("saves/*.json")])
            .unwrap();
    }

    #[test]
    fn test_entry_check_short_id() {
        map(json!({"gameId": 123456}))
            .should(&[have().key("gameId").short_id()])
            .unwrap();
        assert!(map(json!({"gameId": 99}))
            .should(&[have().key("gameId").short_id()])
            .is_err());
    }
}
