//! Locator translation for element selection.
//!
//! Callers address elements with an opaque locator string. The translator
//! classifies it as CSS or XPath; the real-browser backend then turns the
//! selector into a DOM query expression evaluated in the page. No further
//! validation happens here: a malformed selector surfaces as a backend
//! error when the query runs.

use serde::{Deserialize, Serialize};

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath expression (e.g., "//button[@id='submit']")
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Translate an opaque locator string into a selector.
    ///
    /// Strings starting with `//` or `./` are XPath expressions; everything
    /// else is a CSS selector.
    #[must_use]
    pub fn from_locator(locator: &str) -> Self {
        if locator.starts_with("//") || locator.starts_with("./") {
            Self::XPath(locator.to_string())
        } else {
            Self::Css(locator.to_string())
        }
    }

    /// The raw locator text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }

    /// DOM query expression resolving the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
        }
    }

    /// DOM query expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength")
            }
        }
    }

    /// DOM expression probing the first match's state.
    ///
    /// Evaluates to `null` when nothing matches, otherwise to an object with
    /// `tag`, `text`, `attrs`, `displayed` and `enabled` fields that
    /// deserializes into an element snapshot.
    #[must_use]
    pub fn to_probe_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return null; \
             const style = window.getComputedStyle(el); \
             const rect = el.getBoundingClientRect(); \
             const attrs = {{}}; \
             for (const a of el.attributes) attrs[a.name] = a.value; \
             return {{ tag: el.tagName.toLowerCase(), \
                       text: el.textContent, \
                       attrs, \
                       displayed: style.display !== 'none' && style.visibility !== 'hidden' && rect.width > 0 && rect.height > 0, \
                       enabled: !el.disabled }}; }})()",
            self.to_query()
        )
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod translation_tests {
        use super::*;

        #[test]
        fn test_css_locator() {
            let selector = Selector::from_locator("button.primary");
            assert_eq!(selector, Selector::css("button.primary"));
        }

        #[test]
        fn test_xpath_locator() {
            let selector = Selector::from_locator("//button[@id='submit']");
            assert_eq!(selector, Selector::xpath("//button[@id='submit']"));
        }

        #[test]
        fn test_relative_xpath_locator() {
            let selector = Selector::from_locator("./div/span");
            assert!(matches!(selector, Selector::XPath(_)));
        }

        #[test]
        fn test_id_locator_is_css() {
            // A single leading slash-free string is CSS even with odd chars
            let selector = Selector::from_locator("#main [data-testid=score]");
            assert!(matches!(selector, Selector::Css(_)));
        }

        #[test]
        fn test_as_str_roundtrip() {
            assert_eq!(Selector::from_locator("//a").as_str(), "//a");
            assert_eq!(Selector::from_locator("a.link").as_str(), "a.link");
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let query = Selector::css("button.primary").to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("button.primary"));
        }

        #[test]
        fn test_xpath_query() {
            let query = Selector::xpath("//button").to_query();
            assert!(query.contains("evaluate"));
            assert!(query.contains("XPathResult"));
        }

        #[test]
        fn test_count_query() {
            let query = Selector::css("li").to_count_query();
            assert!(query.contains("querySelectorAll"));
            assert!(query.contains(".length"));
        }

        #[test]
        fn test_xpath_count_query() {
            let query = Selector::xpath("//li").to_count_query();
            assert!(query.contains("SNAPSHOT"));
            assert!(query.contains("snapshotLength"));
        }

        #[test]
        fn test_probe_query_captures_state() {
            let query = Selector::css("input#name").to_probe_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("displayed"));
            assert!(query.contains("enabled"));
            assert!(query.contains("getComputedStyle"));
        }

        #[test]
        fn test_probe_query_null_on_no_match() {
            let query = Selector::css("#missing").to_probe_query();
            assert!(query.contains("return null"));
        }
    }
}
