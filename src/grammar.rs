//! Decorative grammar words.
//!
//! These exist only to make chains read like English; each returns the
//! current object unchanged and carries no state, so any chainable type can
//! mix them in without inheriting behavior.

/// No-op connector words for fluent chains.
///
/// ```
/// use affirm::{expect, Flagged, Grammar};
/// use serde_json::json;
///
/// expect(json!({"a": 1, "b": 2}))?.to().have().all().keys(&["a", "b"])?;
/// # Ok::<(), affirm::ExpectError>(())
/// ```
pub trait Grammar: Sized {
    fn to(self) -> Self {
        self
    }

    fn have(self) -> Self {
        self
    }

    fn a(self) -> Self {
        self
    }

    fn an(self) -> Self {
        self
    }

    fn that(self) -> Self {
        self
    }

    fn which(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Probe(u32);

    impl Grammar for Probe {}

    #[test]
    fn test_grammar_words_are_identity() {
        let probe = Probe(7).to().have().a().an().that().which();
        assert_eq!(probe, Probe(7));
    }
}
