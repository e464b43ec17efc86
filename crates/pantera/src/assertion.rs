//! Base assertion primitives.
//!
//! Every semantic assertion in the crate normalizes through these helpers:
//! the predicate produces an [`AssertionResult`], which converts into a
//! pass (`Ok`) or a failed-assertion error. Fatal conditions (element
//! resolution, protocol errors) never pass through here.

use std::fmt::Debug;

use crate::result::{PanteraError, PanteraResult};

/// Result of an assertion
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable failure description
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Convert into a test outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PanteraError::AssertionFailed`] when the predicate was false.
    pub fn into_result(self) -> PanteraResult<()> {
        self.into_result_with("")
    }

    /// Convert into a test outcome, prefixing a caller-supplied message.
    ///
    /// An empty `message` leaves the failure description unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PanteraError::AssertionFailed`] when the predicate was false.
    pub fn into_result_with(self, message: &str) -> PanteraResult<()> {
        if self.passed {
            return Ok(());
        }
        let full = if message.is_empty() {
            self.message
        } else {
            format!("{message}: {}", self.message)
        };
        Err(PanteraError::AssertionFailed { message: full })
    }
}

/// Assertion helpers shared by both client backends
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn same<T: PartialEq + Debug>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert a string contains a substring (case-sensitive)
    #[must_use]
    pub fn string_contains(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected '{haystack}' to contain '{needle}'"))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }

    /// Assert a condition is false
    #[must_use]
    pub fn is_false(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::fail(message)
        } else {
            AssertionResult::pass()
        }
    }
}
