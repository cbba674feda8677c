//! Chain state: the flag set an assertion accumulates as it is walked.
//!
//! Every assertable wrapper owns one [`ChainFlags`]. Flag words are ordinary
//! builder methods that set (never flip) their flag and return the wrapper,
//! so they can appear anywhere in the chain before the terminal call.

/// The mutable state of one assertion chain.
///
/// Defaults: not negated, quantifier "all", exact-set membership.
#[derive(Debug, Clone, Copy)]
pub struct ChainFlags {
    /// A `.not()` appeared in the chain; the terminal result is inverted.
    pub negated: bool,
    /// Quantifier mode: `true` = every requested key must match ("all"),
    /// `false` = at least one must ("any").
    pub check_all: bool,
    /// Inclusion mode: `true` = the target's keys may be a superset of the
    /// requested set, `false` = the sets must match exactly.
    pub include_only: bool,
}

impl Default for ChainFlags {
    fn default() -> Self {
        Self {
            negated: false,
            check_all: true,
            include_only: false,
        }
    }
}

/// Flag-setting chain words, mixed into every wrapper that owns a
/// [`ChainFlags`].
///
/// Each setter is idempotent: `.not().not()` is the same as `.not()`.
pub trait Flagged: Sized {
    fn flags_mut(&mut self) -> &mut ChainFlags;

    /// Negate the terminal check.
    fn not(mut self) -> Self {
        self.flags_mut().negated = true;
        self
    }

    /// Require every requested key to match (the default).
    fn all(mut self) -> Self {
        self.flags_mut().check_all = true;
        self
    }

    /// Require at least one requested key to match.
    fn any(mut self) -> Self {
        self.flags_mut().check_all = false;
        self
    }

    /// Allow the target's keys to be a superset of the requested set,
    /// rather than an identical set. Ignored when `.any()` is in effect.
    fn include(mut self) -> Self {
        self.flags_mut().include_only = true;
        self
    }

    /// Alias for [`include`](Flagged::include).
    fn includes(self) -> Self {
        self.include()
    }

    /// Alias for [`include`](Flagged::include).
    fn contain(self) -> Self {
        self.include()
    }

    /// Alias for [`include`](Flagged::include).
    fn contains(self) -> Self {
        self.include()
    }
}
