//! Recursion depth bound for the type name parser.

use crate::{Error, Result};

/// Maximum nesting depth of recursive type name rules
pub const MAX_RECURSION_DEPTH: usize = 100;

/// Bounded depth counter for recursive descent over untrusted input.
///
/// Every recursive grammar rule calls [`RecursionGuard::enter`] before descending and
/// [`RecursionGuard::exit`] on the way out, whether the rule succeeded or not.
#[derive(Debug, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    /// Create a guard at depth 0
    #[must_use]
    pub fn new() -> Self {
        RecursionGuard { depth: 0 }
    }

    /// Increments the depth.
    ///
    /// # Errors
    /// Returns [`Error::RecursionLimit`] if the new depth would exceed [`MAX_RECURSION_DEPTH`].
    /// The depth is left unchanged in that case.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(Error::RecursionLimit(MAX_RECURSION_DEPTH));
        }

        self.depth += 1;
        Ok(())
    }

    /// Decrements the depth
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Decrements the depth by `levels`
    pub fn exit_many(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Current depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}
