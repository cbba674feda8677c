//! # affirm
//!
//! A fluent assertion DSL for JSON values.
//!
//! A check is written as a readable chain of grammar words, flag words, and
//! one terminal call, evaluated against the wrapped target. Terminal calls
//! return `Result<(), ExpectError>` so failures propagate with `?` and
//! harnesses can tell a failed check from a malformed one.
//!
//! ## Quick start
//!
//! ```
//! use affirm::{be, expect, have, Flagged, Grammar};
//! use serde_json::json;
//!
//! // Membership with quantifier and inclusion modes
//! expect(json!({"a": 1, "b": 2}))?.to().have().all().keys(&["a", "b"])?;
//! expect(json!({"a": 1, "b": 2}))?.to().not().have().any().keys(&["c", "d"])?;
//! expect(json!({"a": 1, "b": 2, "c": 3}))?.to().include().all().keys(&["a", "b"])?;
//!
//! // Immediate comparisons
//! expect(json!(5))?.to().not().less_than(3.0)?;
//! expect(json!(5))?.to().between(2.0)?.and(8.0)?;
//!
//! // Deferred comparisons and per-entry checks
//! expect(json!(3))?.should_be(&[be().less_than(5.0).greater_than(1.0)])?;
//! expect(json!({"id": "f81d4fae-7dec-41d0-a765-00a0c91e6bf6"}))?
//!     .should(&[have().a().key("id").that().uuid()])?;
//! # Ok::<(), affirm::ExpectError>(())
//! ```
//!
//! ## Extending the dispatch
//!
//! Dispatch is closed: [`expect`] only wraps objects and numbers, and
//! errors on anything else. Adapters for other shapes wrap the root and
//! special-case their own types before delegating:
//!
//! ```rust,ignore
//! fn expect_response(response: &Response) -> Result<MapAssertion, ExpectError> {
//!     // Expose the response's interesting attributes as a map, then reuse
//!     // the standard membership semantics against it.
//!     let mut attrs = serde_json::Map::new();
//!     attrs.insert("status_code".into(), response.status().as_u16().into());
//!     Ok(MapAssertion::new(attrs))
//! }
//! ```

mod chain;
mod error;
mod grammar;
mod lazy;
mod map;
mod matcher;
mod value;

pub use chain::{ChainFlags, Flagged};
pub use error::ExpectError;
pub use grammar::Grammar;
pub use lazy::{be, LazyComparison};
pub use map::{have, EntryCheck, KeySelector, MapAssertion, Selector};
pub use matcher::Matcher;
pub use value::{Between, ValueAssertion};

use error::shape_of;
use serde_json::Value;

/// Wrap a value in the assertable wrapper matching its shape.
///
/// Objects get [`MapAssertion`] semantics, numbers get [`ValueAssertion`]
/// semantics; any other shape is an [`ExpectError::UnsupportedShape`] usage
/// error rather than a silent pass-through.
///
/// ```
/// use affirm::expect;
/// use serde_json::json;
///
/// assert!(expect(json!({"a": 1})).is_ok());
/// assert!(expect(json!(5)).is_ok());
/// assert!(expect(json!([1, 2])).unwrap_err().is_usage());
/// ```
pub fn expect(value: impl Into<Value>) -> Result<Assertable, ExpectError> {
    Assertable::create(value)
}

/// The polymorphic wrapper returned by [`expect`].
///
/// A closed tagged variant over the supported target shapes. Chain methods
/// delegate to the wrapped assertion; applying a mapping operation to a
/// scalar target (or vice versa) is a usage error.
#[derive(Debug, Clone)]
pub enum Assertable {
    Map(MapAssertion),
    Value(ValueAssertion),
}

impl Assertable {
    /// Select and construct the wrapper for `value`; same contract as
    /// [`expect`].
    pub fn create(value: impl Into<Value>) -> Result<Self, ExpectError> {
        match value.into() {
            Value::Object(object) => Ok(Assertable::Map(MapAssertion::new(object))),
            Value::Number(number) => Ok(Assertable::Value(ValueAssertion::new(number))),
            other => Err(ExpectError::UnsupportedShape {
                shape: shape_of(&other),
            }),
        }
    }

    /// The concrete mapping wrapper, or a usage error for scalar targets.
    pub fn into_map(self) -> Result<MapAssertion, ExpectError> {
        match self {
            Assertable::Map(map) => Ok(map),
            Assertable::Value(value) => {
                Err(wrong_shape("into_map", "object", value.target()))
            }
        }
    }

    /// The concrete scalar wrapper, or a usage error for mapping targets.
    pub fn into_value(self) -> Result<ValueAssertion, ExpectError> {
        match self {
            Assertable::Value(value) => Ok(value),
            Assertable::Map(map) => Err(wrong_shape(
                "into_value",
                "number",
                Value::Object(map.target().clone()),
            )),
        }
    }

    // Membership operations (mapping targets).

    /// See [`MapAssertion::keys`].
    pub fn keys(self, requested: &[&str]) -> Result<(), ExpectError> {
        self.into_map().map_err(retag("keys"))?.keys(requested)
    }

    /// See [`MapAssertion::key`].
    pub fn key(self, key: &str) -> Result<(), ExpectError> {
        self.into_map().map_err(retag("key"))?.key(key)
    }

    /// See [`MapAssertion::should`].
    pub fn should(self, checks: &[EntryCheck]) -> Result<(), ExpectError> {
        self.into_map().map_err(retag("should"))?.should(checks)
    }

    // Comparison operations (scalar targets).

    /// See [`ValueAssertion::less_than`].
    pub fn less_than(self, other: f64) -> Result<(), ExpectError> {
        self.into_value()
            .map_err(retag("less_than"))?
            .less_than(other)
    }

    /// See [`ValueAssertion::greater_than`].
    pub fn greater_than(self, other: f64) -> Result<(), ExpectError> {
        self.into_value()
            .map_err(retag("greater_than"))?
            .greater_than(other)
    }

    /// See [`ValueAssertion::divisible_by`].
    pub fn divisible_by(self, other: f64) -> Result<(), ExpectError> {
        self.into_value()
            .map_err(retag("divisible_by"))?
            .divisible_by(other)
    }

    /// See [`ValueAssertion::equal`].
    pub fn equal(self, other: f64) -> Result<(), ExpectError> {
        self.into_value().map_err(retag("equal"))?.equal(other)
    }

    /// See [`ValueAssertion::between`].
    pub fn between(self, this: f64) -> Result<Between, ExpectError> {
        Ok(self.into_value().map_err(retag("between"))?.between(this))
    }

    /// See [`ValueAssertion::should`].
    pub fn should_be(self, rules: &[LazyComparison]) -> Result<(), ExpectError> {
        self.into_value().map_err(retag("should_be"))?.should(rules)
    }
}

impl Flagged for Assertable {
    fn flags_mut(&mut self) -> &mut ChainFlags {
        match self {
            Assertable::Map(map) => map.flags_mut(),
            Assertable::Value(value) => value.flags_mut(),
        }
    }
}

impl Grammar for Assertable {}

fn wrong_shape(check: &'static str, expected: &'static str, actual: impl ToString) -> ExpectError {
    ExpectError::WrongType {
        check,
        expected,
        actual: actual.to_string(),
    }
}

/// Rewrites the `check` name of a delegation type error so the message
/// names the operation the caller actually invoked.
fn retag(check: &'static str) -> impl Fn(ExpectError) -> ExpectError {
    move |err| match err {
        ExpectError::WrongType {
            expected, actual, ..
        } => ExpectError::WrongType {
            check,
            expected,
            actual,
        },
        other => other,
    }
}
