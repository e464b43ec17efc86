//! Simulated in-process client.
//!
//! Wraps a request/response page model with no real rendering: the test
//! installs a page (URL, title, element set) and the client answers title
//! and element queries against it. This module also carries the base title
//! assertions the dispatcher delegates to for simulated clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assertion::Assertion;
use crate::client::{ClientKind, TestClient};
use crate::element::ElementHandle;
use crate::locator::Selector;
use crate::result::{PanteraError, PanteraResult};

/// Server parameter overrides applied to a new client at bootstrap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerParams(BTreeMap<String, String>);

impl ServerParams {
    /// Create an empty parameter set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a parameter
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.0.insert(name.into(), value.into());
        self
    }

    /// Look up a parameter
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A response document installed into the simulated client.
///
/// Element identifiers double as `id` attributes for selector matching
/// unless the element carries an explicit `id` attribute.
#[derive(Debug, Clone, Default)]
pub struct Page {
    url: String,
    title: String,
    elements: Vec<ElementHandle>,
}

impl Page {
    /// Create a page for a URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            elements: Vec::new(),
        }
    }

    /// Set the document title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add an element to the document
    #[must_use]
    pub fn with_element(mut self, element: ElementHandle) -> Self {
        self.elements.push(element);
        self
    }

    /// The page URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The document's elements
    #[must_use]
    pub fn elements(&self) -> &[ElementHandle] {
        &self.elements
    }
}

/// In-process test client over a simulated page
#[derive(Debug)]
pub struct SimulatedClient {
    server_params: ServerParams,
    page: Page,
}

impl Default for SimulatedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedClient {
    /// Create a client with a blank page
    #[must_use]
    pub fn new() -> Self {
        Self {
            server_params: ServerParams::new(),
            page: Page::new("about:blank"),
        }
    }

    /// Install a response document
    pub fn load_page(&mut self, page: Page) {
        tracing::debug!(url = page.url(), "simulated client loading page");
        self.page = page;
    }

    /// Apply server parameter overrides
    pub fn set_server_parameters(&mut self, params: ServerParams) {
        self.server_params = params;
    }

    /// The applied server parameters
    #[must_use]
    pub const fn server_parameters(&self) -> &ServerParams {
        &self.server_params
    }

    /// The currently loaded page
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }
}

impl TestClient for SimulatedClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Simulated
    }

    fn title(&self) -> PanteraResult<String> {
        Ok(self.page.title.clone())
    }

    fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle> {
        let raw = match selector {
            Selector::Css(raw) => raw,
            Selector::XPath(_) => {
                return Err(PanteraError::Protocol {
                    message: "XPath resolution is not supported by the simulated client"
                        .to_string(),
                })
            }
        };
        let parsed = SimpleSelector::parse(raw).ok_or_else(|| PanteraError::Protocol {
            message: format!("unsupported selector '{raw}'"),
        })?;
        self.page
            .elements
            .iter()
            .find(|e| parsed.matches(e))
            .cloned()
            .ok_or_else(|| PanteraError::ElementNotFound {
                locator: raw.clone(),
            })
    }

    fn current_url(&self) -> String {
        self.page.url.clone()
    }
}

/// Base title-equality assertion, the delegation target for simulated
/// clients.
///
/// # Errors
///
/// Returns an assertion failure when the titles differ.
pub fn assert_title_same(
    client: &dyn TestClient,
    expected: &str,
    message: &str,
) -> PanteraResult<()> {
    let title = client.title()?;
    Assertion::same(&expected, &title.as_str()).into_result_with(message)
}

/// Base title-substring assertion, the delegation target for simulated
/// clients.
///
/// # Errors
///
/// Returns an assertion failure when the title does not contain `expected`.
pub fn assert_title_contains(
    client: &dyn TestClient,
    expected: &str,
    message: &str,
) -> PanteraResult<()> {
    let title = client.title()?;
    Assertion::string_contains(&title, expected).into_result_with(message)
}

/// One compound selector: tag, id, classes and attribute tests.
/// Combinators (descendant, child, sibling) are not supported.
#[derive(Debug, Default)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl SimpleSelector {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut selector = Self::default();
        let mut chars = raw.chars().peekable();

        let mut tag = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                tag.push(c);
                let _ = chars.next();
            } else {
                break;
            }
        }
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(c) = chars.next() {
            match c {
                '#' | '.' => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_alphanumeric() || n == '-' || n == '_' {
                            name.push(n);
                            let _ = chars.next();
                        } else {
                            break;
                        }
                    }
                    if name.is_empty() {
                        return None;
                    }
                    if c == '#' {
                        selector.id = Some(name);
                    } else {
                        selector.classes.push(name);
                    }
                }
                '[' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == ']' {
                            closed = true;
                            break;
                        }
                        body.push(n);
                    }
                    if !closed {
                        return None;
                    }
                    let (name, value) = match body.split_once('=') {
                        Some((n, v)) => (
                            n.trim().to_string(),
                            Some(v.trim().trim_matches('\'').trim_matches('"').to_string()),
                        ),
                        None => (body.trim().to_string(), None),
                    };
                    if name.is_empty() {
                        return None;
                    }
                    selector.attributes.push((name, value));
                }
                _ => return None,
            }
        }

        Some(selector)
    }

    fn matches(&self, element: &ElementHandle) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            let element_id = element.attribute("id").unwrap_or(&element.id);
            if element_id != id {
                return false;
            }
        }
        for class in &self.classes {
            if !element.classes().contains(&class.as_str()) {
                return false;
            }
        }
        for (name, value) in &self.attributes {
            match (element.attribute(name), value) {
                (Some(actual), Some(expected)) if actual == expected => {}
                (Some(_), None) => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_page() -> Page {
        Page::new("http://localhost/welcome")
            .with_title("Welcome to the demo")
            .with_element(
                ElementHandle::new("submit", "button")
                    .with_attribute("class", "btn btn-primary")
                    .with_text("Send"),
            )
            .with_element(
                ElementHandle::new("name", "input")
                    .with_attribute("type", "text")
                    .with_attribute("data-testid", "name-field"),
            )
            .with_element(ElementHandle::new("spinner", "div").with_displayed(false))
    }

    fn demo_client() -> SimulatedClient {
        let mut client = SimulatedClient::new();
        client.load_page(demo_page());
        client
    }

    mod page_tests {
        use super::*;

        #[test]
        fn test_blank_client() {
            let client = SimulatedClient::new();
            assert_eq!(client.current_url(), "about:blank");
            assert_eq!(client.title().unwrap(), "");
        }

        #[test]
        fn test_load_page() {
            let client = demo_client();
            assert_eq!(client.current_url(), "http://localhost/welcome");
            assert_eq!(client.title().unwrap(), "Welcome to the demo");
            assert_eq!(client.page().elements().len(), 3);
        }

        #[test]
        fn test_client_kind() {
            let client = demo_client();
            assert_eq!(client.kind(), ClientKind::Simulated);
            assert!(!client.is_real_browser());
        }
    }

    mod server_params_tests {
        use super::*;

        #[test]
        fn test_params_applied() {
            let mut client = SimulatedClient::new();
            client.set_server_parameters(
                ServerParams::new().with("HTTP_HOST", "testhost.example"),
            );
            assert_eq!(
                client.server_parameters().get("HTTP_HOST"),
                Some("testhost.example")
            );
            assert_eq!(client.server_parameters().len(), 1);
        }

        #[test]
        fn test_params_default_empty() {
            let client = SimulatedClient::new();
            assert!(client.server_parameters().is_empty());
        }
    }

    mod find_element_tests {
        use super::*;

        #[test]
        fn test_find_by_tag() {
            let client = demo_client();
            let elem = client.find_element(&Selector::css("button")).unwrap();
            assert_eq!(elem.id, "submit");
        }

        #[test]
        fn test_find_by_id() {
            let client = demo_client();
            let elem = client.find_element(&Selector::css("#name")).unwrap();
            assert_eq!(elem.tag_name, "input");
        }

        #[test]
        fn test_find_by_class() {
            let client = demo_client();
            let elem = client.find_element(&Selector::css(".btn-primary")).unwrap();
            assert_eq!(elem.id, "submit");
        }

        #[test]
        fn test_find_by_attribute() {
            let client = demo_client();
            let elem = client
                .find_element(&Selector::css("input[data-testid=name-field]"))
                .unwrap();
            assert_eq!(elem.id, "name");
        }

        #[test]
        fn test_find_by_quoted_attribute() {
            let client = demo_client();
            let elem = client
                .find_element(&Selector::css("[type='text']"))
                .unwrap();
            assert_eq!(elem.id, "name");
        }

        #[test]
        fn test_find_compound() {
            let client = demo_client();
            let elem = client
                .find_element(&Selector::css("button#submit.btn"))
                .unwrap();
            assert_eq!(elem.text_content.as_deref(), Some("Send"));
        }

        #[test]
        fn test_no_match_is_element_not_found() {
            let client = demo_client();
            let err = client
                .find_element(&Selector::css("#missing"))
                .unwrap_err();
            assert!(matches!(err, PanteraError::ElementNotFound { .. }));
        }

        #[test]
        fn test_combinators_are_unsupported() {
            let client = demo_client();
            let err = client
                .find_element(&Selector::css("div > button"))
                .unwrap_err();
            assert!(matches!(err, PanteraError::Protocol { .. }));
        }

        #[test]
        fn test_xpath_is_unsupported() {
            let client = demo_client();
            let err = client
                .find_element(&Selector::xpath("//button"))
                .unwrap_err();
            assert!(matches!(err, PanteraError::Protocol { .. }));
        }
    }

    mod base_assertion_tests {
        use super::*;

        #[test]
        fn test_title_same_pass() {
            let client = demo_client();
            assert!(assert_title_same(&client, "Welcome to the demo", "").is_ok());
        }

        #[test]
        fn test_title_same_fail() {
            let client = demo_client();
            let err = assert_title_same(&client, "Goodbye", "").unwrap_err();
            assert!(err.is_assertion_failure());
        }

        #[test]
        fn test_title_contains_pass() {
            let client = demo_client();
            assert!(assert_title_contains(&client, "demo", "").is_ok());
        }

        #[test]
        fn test_title_contains_fail_case_sensitive() {
            let client = demo_client();
            let err = assert_title_contains(&client, "DEMO", "").unwrap_err();
            assert!(err.is_assertion_failure());
        }

        #[test]
        fn test_custom_message_surfaces_on_failure() {
            let client = demo_client();
            let err = assert_title_same(&client, "Goodbye", "after login").unwrap_err();
            assert!(err.to_string().contains("after login"));
        }
    }

    mod selector_parse_tests {
        use super::*;

        #[test]
        fn test_parse_tag_only() {
            let sel = SimpleSelector::parse("button").unwrap();
            assert_eq!(sel.tag.as_deref(), Some("button"));
            assert!(sel.id.is_none());
        }

        #[test]
        fn test_parse_rejects_empty() {
            assert!(SimpleSelector::parse("").is_none());
            assert!(SimpleSelector::parse("   ").is_none());
        }

        #[test]
        fn test_parse_rejects_unclosed_attribute() {
            assert!(SimpleSelector::parse("input[type=text").is_none());
        }

        #[test]
        fn test_parse_rejects_bare_dot() {
            assert!(SimpleSelector::parse("button.").is_none());
        }

        #[test]
        fn test_tag_match_is_case_insensitive() {
            let sel = SimpleSelector::parse("BUTTON").unwrap();
            assert!(sel.matches(&ElementHandle::new("x", "button")));
        }
    }
}
