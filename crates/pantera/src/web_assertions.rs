//! Dual-mode web test assertions.
//!
//! One trait serves both client variants: title assertions against a real
//! browser read the live title and check the predicate locally, while a
//! simulated client delegates unchanged to the base title assertions.
//! Element-state assertions resolve through the real-browser backend only.
//!
//! Every call is a one-shot, stateless decision over the active client's
//! variant tag. Failures are immediate: a false predicate fails the
//! current test at that line, and backend errors (element not found,
//! protocol faults) propagate unmodified as fatal.

use crate::assertion::Assertion;
use crate::browser::RealBrowserClient;
use crate::client::TestClient;
use crate::element::ElementHandle;
use crate::result::{PanteraError, PanteraResult};
use crate::session::TestSession;
use crate::simulated;

/// Web test assertions dispatched over the active client.
///
/// Implementors provide the active-client accessor; every assertion is a
/// provided method. The caller-supplied `message` is honored on both
/// dispatch paths; pass `""` for the default failure description.
pub trait WebAssertions {
    /// The currently active test client.
    ///
    /// # Errors
    ///
    /// Returns a session error when no client is active.
    fn active_client(&self) -> PanteraResult<&dyn TestClient>;

    /// Assert the page title equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when the titles differ, or a fatal
    /// backend error.
    fn assert_page_title_same(&self, expected: &str, message: &str) -> PanteraResult<()> {
        let client = self.active_client()?;
        if client.is_real_browser() {
            tracing::debug!(expected, "asserting live page title equality");
            let title = client.title()?;
            return Assertion::same(&expected, &title.as_str()).into_result_with(message);
        }
        simulated::assert_title_same(client, expected, message)
    }

    /// Assert the page title contains `expected` as a substring
    /// (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when the substring is absent, or a
    /// fatal backend error.
    fn assert_page_title_contains(&self, expected: &str, message: &str) -> PanteraResult<()> {
        let client = self.active_client()?;
        if client.is_real_browser() {
            tracing::debug!(expected, "asserting live page title substring");
            let title = client.title()?;
            return Assertion::string_contains(&title, expected).into_result_with(message);
        }
        simulated::assert_title_contains(client, expected, message)
    }

    /// Assert the element for `locator` is visible.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when hidden, or a fatal error when the
    /// element cannot be resolved.
    fn assert_selector_is_visible(&self, locator: &str) -> PanteraResult<()> {
        let element = self.find_element(locator)?;
        Assertion::is_true(
            element.is_displayed(),
            "Failed asserting that element is visible.",
        )
        .into_result()
    }

    /// Assert the element for `locator` is not visible.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when visible, or a fatal error when the
    /// element cannot be resolved.
    fn assert_selector_is_not_visible(&self, locator: &str) -> PanteraResult<()> {
        let element = self.find_element(locator)?;
        Assertion::is_false(
            element.is_displayed(),
            "Failed asserting that element is not visible.",
        )
        .into_result()
    }

    /// Assert the element for `locator` is enabled.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when disabled, or a fatal error when
    /// the element cannot be resolved.
    fn assert_selector_is_enabled(&self, locator: &str) -> PanteraResult<()> {
        let element = self.find_element(locator)?;
        Assertion::is_true(
            element.is_enabled(),
            "Failed asserting that element is enabled.",
        )
        .into_result()
    }

    /// Assert the element for `locator` is disabled.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when enabled, or a fatal error when the
    /// element cannot be resolved.
    fn assert_selector_is_disabled(&self, locator: &str) -> PanteraResult<()> {
        let element = self.find_element(locator)?;
        Assertion::is_false(
            element.is_enabled(),
            "Failed asserting that element is disabled.",
        )
        .into_result()
    }

    /// Resolve exactly one element through the real-browser client.
    ///
    /// # Errors
    ///
    /// Returns a session error when the active client is not a real
    /// browser, [`PanteraError::ElementNotFound`] for zero matches, or a
    /// protocol error from the backend. Never retried.
    fn find_element(&self, locator: &str) -> PanteraResult<ElementHandle> {
        let client = self.active_client()?;
        if !client.is_real_browser() {
            return Err(PanteraError::Session {
                message: format!(
                    "element assertions require the real-browser client; active client is {}",
                    client.kind()
                ),
            });
        }
        let selector = RealBrowserClient::selector_from_locator(locator);
        tracing::debug!(locator, "resolving element");
        client.find_element(&selector)
    }
}

impl WebAssertions for TestSession {
    fn active_client(&self) -> PanteraResult<&dyn TestClient> {
        self.client()
    }
}
