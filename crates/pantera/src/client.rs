//! Test client abstraction.
//!
//! Both client variants expose the same capability set; the assertion
//! dispatcher selects behavior with a single variant test instead of
//! inspecting concrete types at every call site.

use crate::element::ElementHandle;
use crate::locator::Selector;
use crate::result::PanteraResult;

/// Runtime variant of a test client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// In-process request/response page model, no real rendering
    Simulated,
    /// Live browser session driven through an automation protocol
    RealBrowser,
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulated => f.write_str("simulated"),
            Self::RealBrowser => f.write_str("real-browser"),
        }
    }
}

/// Capability interface shared by both client variants.
///
/// One client is active per test session; assertion calls borrow it for a
/// single dispatch and never hold on to it.
pub trait TestClient: Send + Sync + std::fmt::Debug {
    /// Variant tag used for dispatch
    fn kind(&self) -> ClientKind;

    /// Current document title
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot read the title.
    fn title(&self) -> PanteraResult<String>;

    /// Resolve exactly one element for a selector.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PanteraError::ElementNotFound`] when zero elements
    /// match, or a protocol error from the backend.
    fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle>;

    /// Current page URL, for diagnostics
    fn current_url(&self) -> String;

    /// Whether this client drives a real browser
    fn is_real_browser(&self) -> bool {
        matches!(self.kind(), ClientKind::RealBrowser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ClientKind::Simulated.to_string(), "simulated");
        assert_eq!(ClientKind::RealBrowser.to_string(), "real-browser");
    }

    #[test]
    fn test_default_variant_check() {
        #[derive(Debug)]
        struct Fixed(ClientKind);
        impl TestClient for Fixed {
            fn kind(&self) -> ClientKind {
                self.0
            }
            fn title(&self) -> PanteraResult<String> {
                Ok(String::new())
            }
            fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle> {
                Err(crate::PanteraError::ElementNotFound {
                    locator: selector.as_str().to_string(),
                })
            }
            fn current_url(&self) -> String {
                String::from("about:blank")
            }
        }

        assert!(Fixed(ClientKind::RealBrowser).is_real_browser());
        assert!(!Fixed(ClientKind::Simulated).is_real_browser());
    }
}
