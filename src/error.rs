//! Error type shared by every assertion chain.
//!
//! Failures come in two families that must stay distinguishable:
//! - **Assertion failures**: the checked condition did not hold. This is the
//!   normal output of the library.
//! - **Usage failures**: the chain itself was malformed (wrong target shape,
//!   zero divisor, missing key, invalid pattern). These indicate a broken
//!   test, not a broken value.

use serde_json::Value;
use thiserror::Error;

/// Error produced by a terminal chain call.
#[derive(Debug, Error)]
pub enum ExpectError {
    /// The asserted condition did not hold. The message names the target's
    /// literal value, the operator or shape tested, the operand(s), and
    /// whether negation was in effect.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// A check was applied to a target of the wrong shape.
    #[error("{check} requires a {expected} target, got {actual}")]
    WrongType {
        check: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// `divisible_by` was given a zero divisor.
    #[error("cannot check divisibility by zero")]
    ZeroDivisor,

    /// A membership-by-value check named a key the target does not have.
    #[error("key \"{key}\" not in target {target}")]
    MissingKey { key: String, target: String },

    /// A regex or glob pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    BadPattern { pattern: String, reason: String },

    /// The dispatch root was handed a value no wrapper supports.
    #[error("no assertable wrapper implemented for {shape} values")]
    UnsupportedShape { shape: &'static str },
}

impl ExpectError {
    /// True if the checked condition failed (as opposed to the chain being
    /// malformed).
    pub fn is_assertion(&self) -> bool {
        matches!(self, ExpectError::Assertion(_))
    }

    /// True if the chain itself was misused: wrong target shape, zero
    /// divisor, missing key, bad pattern, or an unsupported dispatch shape.
    pub fn is_usage(&self) -> bool {
        !self.is_assertion()
    }
}

/// Human-readable shape name for a JSON value, used in dispatch and
/// type-mismatch errors.
pub(crate) fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
