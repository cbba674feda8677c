//! Immediate comparisons against a single numeric target.
//!
//! A [`ValueAssertion`] holds one number for the lifetime of one chain.
//! Terminal calls evaluate their predicate, invert the result if `.not()`
//! appeared earlier, and report failure with a message that states the
//! un-negated fact.

use serde_json::Number;

use crate::chain::{ChainFlags, Flagged};
use crate::error::ExpectError;
use crate::grammar::Grammar;
use crate::lazy::LazyComparison;

/// The scalar-oriented assertable wrapper.
///
/// ```
/// use affirm::{expect, Flagged, Grammar};
/// use serde_json::json;
///
/// expect(json!(5))?.to().not().less_than(3.0)?;
/// expect(json!(10))?.to().divisible_by(2.0)?;
/// # Ok::<(), affirm::ExpectError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ValueAssertion {
    target: Number,
    flags: ChainFlags,
}

impl ValueAssertion {
    pub fn new(target: Number) -> Self {
        Self {
            target,
            flags: ChainFlags::default(),
        }
    }

    /// The wrapped target.
    pub fn target(&self) -> &Number {
        &self.target
    }

    fn target_f64(&self) -> f64 {
        self.target.as_f64().unwrap_or(f64::NAN)
    }

    /// Evaluate one predicate outcome against the negation flag.
    ///
    /// Negation inverts the result after evaluation rather than swapping the
    /// operator, so every comparison composes with `.not()` uniformly.
    fn compare(&self, held: bool, other: f64, comparison: &str) -> Result<(), ExpectError> {
        let result = if self.flags.negated { !held } else { held };

        if result {
            return Ok(());
        }

        let message = if self.flags.negated {
            format!("{} is {} {}, should not be", self.target, comparison, other)
        } else {
            format!("{} is not {} {}", self.target, comparison, other)
        };

        Err(ExpectError::Assertion(message))
    }

    /// Assert the target is less than `other`.
    pub fn less_than(&self, other: f64) -> Result<(), ExpectError> {
        self.compare(self.target_f64() < other, other, "less than")
    }

    /// Assert the target is greater than `other`.
    pub fn greater_than(&self, other: f64) -> Result<(), ExpectError> {
        self.compare(self.target_f64() > other, other, "greater than")
    }

    /// Assert the target divides evenly by `other`.
    ///
    /// A zero divisor is a usage error regardless of negation.
    pub fn divisible_by(&self, other: f64) -> Result<(), ExpectError> {
        if other == 0.0 {
            return Err(ExpectError::ZeroDivisor);
        }
        self.compare(self.target_f64() % other == 0.0, other, "divisible by")
    }

    /// Assert the target equals `other`.
    pub fn equal(&self, other: f64) -> Result<(), ExpectError> {
        self.compare(self.target_f64() == other, other, "equal to")
    }

    /// Begin an open-interval range check; terminate with
    /// [`Between::and`]. The two bounds may be supplied in either order.
    pub fn between(&self, this: f64) -> Between {
        Between {
            target: self.target.clone(),
            this,
            negated: self.flags.negated,
        }
    }

    /// Replay one or more lazy comparison registries against the target.
    ///
    /// ```
    /// use affirm::{be, expect};
    /// use serde_json::json;
    ///
    /// expect(json!(3))?.should_be(&[be().less_than(5.0).greater_than(1.0)])?;
    /// # Ok::<(), affirm::ExpectError>(())
    /// ```
    pub fn should(&self, rules: &[LazyComparison]) -> Result<(), ExpectError> {
        let target = self.target_f64();
        for registry in rules {
            registry.matches(target)?;
        }
        Ok(())
    }
}

/// A partially applied range check: holds the target and the first bound
/// until `.and()` supplies the second.
#[derive(Debug, Clone)]
pub struct Between {
    target: Number,
    this: f64,
    negated: bool,
}

impl Between {
    /// Supply the second bound and evaluate.
    ///
    /// The interval is open on both sides and normalized by min/max, so
    /// `between(2.0).and(8.0)` and `between(8.0).and(2.0)` accept the same
    /// targets. The failure message preserves the order the bounds were
    /// given in.
    pub fn and(self, other: f64) -> Result<(), ExpectError> {
        let target = self.target.as_f64().unwrap_or(f64::NAN);

        let held = if self.this < other {
            self.this < target && target < other
        } else {
            other < target && target < self.this
        };
        let result = if self.negated { !held } else { held };

        if result {
            return Ok(());
        }

        let message = if self.negated {
            format!(
                "{} is between {} and {}, should not be",
                self.target, self.this, other
            )
        } else {
            format!("{} is not between {} and {}", self.target, self.this, other)
        };

        Err(ExpectError::Assertion(message))
    }
}

impl Flagged for ValueAssertion {
    fn flags_mut(&mut self) -> &mut ChainFlags {
        &mut self.flags
    }
}

impl Grammar for ValueAssertion {}
