//! Result and error types for Pantera.

use thiserror::Error;

/// Result type for Pantera operations
pub type PanteraResult<T> = Result<T, PanteraError>;

/// Errors that can occur in Pantera
#[derive(Debug, Error)]
pub enum PanteraError {
    /// An assertion predicate was false
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Failure description, including any caller-supplied message
        message: String,
    },

    /// The test-client service could not be resolved at bootstrap
    #[error("Configuration error: {message}")]
    Configuration {
        /// Diagnostic message
        message: String,
    },

    /// A locator resolved to zero elements
    #[error("Element not found for locator '{locator}'")]
    ElementNotFound {
        /// The locator that failed to resolve
        locator: String,
    },

    /// Browser backend communication failure
    #[error("Protocol error: {message}")]
    Protocol {
        /// Error message from the backend
        message: String,
    },

    /// Active-client misuse (no client registered, wrong variant for the call)
    #[error("Session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PanteraError {
    /// Whether this error is an ordinary assertion failure.
    ///
    /// Everything else (configuration, element resolution, protocol) is
    /// fatal for the current test rather than a failed predicate.
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_failure_classification() {
        let failed = PanteraError::AssertionFailed {
            message: "title mismatch".to_string(),
        };
        assert!(failed.is_assertion_failure());

        let fatal = PanteraError::ElementNotFound {
            locator: "#missing".to_string(),
        };
        assert!(!fatal.is_assertion_failure());
    }

    #[test]
    fn test_error_display() {
        let err = PanteraError::ElementNotFound {
            locator: "button.primary".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Element not found for locator 'button.primary'"
        );
    }

    #[test]
    fn test_navigation_error_display() {
        let err = PanteraError::Navigation {
            url: "http://localhost:9999/".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("http://localhost:9999/"));
        assert!(err.to_string().contains("connection refused"));
    }
}
