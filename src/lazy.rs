//! Deferred comparisons: record predicates now, match values later.
//!
//! A [`LazyComparison`] is built without a target, then replayed against one
//! or more values supplied elsewhere in a chain (see
//! [`ValueAssertion::should`](crate::ValueAssertion::should) and
//! [`KeySelector::matches`](crate::KeySelector::matches)). Rules are stored
//! as plain `{operator, operand}` value objects, not closures, and replay in
//! registration order.

use crate::error::ExpectError;
use crate::grammar::Grammar;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LazyOp {
    LessThan,
    GreaterThan,
    DivisibleBy,
    Equal,
}

#[derive(Debug, Clone, Copy)]
struct LazyRule {
    op: LazyOp,
    operand: f64,
}

/// An ordered registry of comparison rules awaiting a target.
///
/// Registration methods append a rule and return the registry, so rules can
/// be chained. Unlike immediate comparisons, lazy rules carry no negation:
/// each is always asserted true with its own message.
///
/// ```
/// use affirm::be;
///
/// let rules = be().greater_than(1.0).less_than(5.0);
/// rules.matches(3.0)?;
/// assert!(rules.matches(10.0).is_err());
/// # Ok::<(), affirm::ExpectError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LazyComparison {
    rules: Vec<LazyRule>,
}

/// Start a lazy comparison chain. Reads well in entry checks:
/// `have().key("count").matches(be().greater_than(0.0))`.
pub fn be() -> LazyComparison {
    LazyComparison::new()
}

impl LazyComparison {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(mut self, op: LazyOp, operand: f64) -> Self {
        self.rules.push(LazyRule { op, operand });
        self
    }

    /// Record that a future target must be less than `other`.
    pub fn less_than(self, other: f64) -> Self {
        self.register(LazyOp::LessThan, other)
    }

    /// Record that a future target must be greater than `other`.
    pub fn greater_than(self, other: f64) -> Self {
        self.register(LazyOp::GreaterThan, other)
    }

    /// Record that a future target must be divisible by `other`.
    pub fn divisible_by(self, other: f64) -> Self {
        self.register(LazyOp::DivisibleBy, other)
    }

    /// Record that a future target must equal `other`.
    pub fn equal(self, other: f64) -> Self {
        self.register(LazyOp::Equal, other)
    }

    /// Replay the recorded rules against `target`, in registration order.
    ///
    /// The first failing rule returns its own message; a zero divisor in a
    /// `divisible_by` rule is a usage error, not a failed assertion.
    pub fn matches(&self, target: f64) -> Result<(), ExpectError> {
        for rule in &self.rules {
            let held = match rule.op {
                LazyOp::LessThan => target < rule.operand,
                LazyOp::GreaterThan => target > rule.operand,
                LazyOp::DivisibleBy => {
                    if rule.operand == 0.0 {
                        return Err(ExpectError::ZeroDivisor);
                    }
                    target % rule.operand == 0.0
                }
                LazyOp::Equal => target == rule.operand,
            };

            if !held {
                return Err(ExpectError::Assertion(rule.failure(target)));
            }
        }

        Ok(())
    }

    /// Number of rules registered so far.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl LazyRule {
    fn failure(&self, target: f64) -> String {
        match self.op {
            LazyOp::LessThan => format!("{} is not less than {}", target, self.operand),
            LazyOp::GreaterThan => format!("{} is not greater than {}", target, self.operand),
            LazyOp::DivisibleBy => format!("{} is not divisible by {}", target, self.operand),
            LazyOp::Equal => format!("{} does not equal {}", target, self.operand),
        }
    }
}

impl Grammar for LazyComparison {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_accepts_inside_rejects_outside() {
        let rules = be().less_than(5.0).greater_than(1.0);

        assert!(rules.matches(3.0).is_ok());
        assert!(rules.matches(0.0).is_err());
        assert!(rules.matches(10.0).is_err());
    }

    #[test]
    fn test_rules_replay_in_registration_order() {
        // 10 fails both rules; the first registered one reports.
        let rules = be().less_than(5.0).greater_than(20.0);
        let err = rules.matches(10.0).unwrap_err();
        assert_eq!(err.to_string(), "assertion failed: 10 is not less than 5");
    }

    #[test]
    fn test_registry_replays_many_times() {
        let rules = be().divisible_by(2.0);
        assert!(rules.matches(4.0).is_ok());
        assert!(rules.matches(8.0).is_ok());
        assert!(rules.matches(3.0).is_err());
    }

    #[test]
    fn test_equal_message() {
        let err = be().equal(7.0).matches(6.0).unwrap_err();
        assert_eq!(err.to_string(), "assertion failed: 6 does not equal 7");
    }

    #[test]
    fn test_zero_divisor_is_usage_error() {
        let err = be().divisible_by(0.0).matches(4.0).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_empty_registry_accepts_anything() {
        assert!(be().matches(42.0).is_ok());
        assert!(be().is_empty());
    }
}
