//! Element snapshots captured from a client backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of a located DOM node.
///
/// A handle is borrowed for the duration of a single assertion; the
/// dispatcher never caches one across calls. The identifier is the
/// element's `id` attribute when present, otherwise the locator that
/// resolved it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Identifier for the element
    pub id: String,
    /// Element tag name (lowercase)
    pub tag_name: String,
    /// Element text content
    pub text_content: Option<String>,
    /// Attribute map
    pub attributes: BTreeMap<String, String>,
    /// Whether the element is rendered visible
    pub displayed: bool,
    /// Whether the element accepts interaction
    pub enabled: bool,
}

impl ElementHandle {
    /// Create a new element handle.
    ///
    /// Fresh handles are displayed and enabled; hidden or disabled are the
    /// marked states.
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
            attributes: BTreeMap::new(),
            displayed: true,
            enabled: true,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the displayed state
    #[must_use]
    pub const fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Set the enabled state
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if the element is rendered visible
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Check if the element accepts interaction
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The element's class list
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod handle_tests {
        use super::*;

        #[test]
        fn test_element_handle_creation() {
            let elem = ElementHandle::new("btn-1", "button");
            assert_eq!(elem.id, "btn-1");
            assert_eq!(elem.tag_name, "button");
            assert!(elem.text_content.is_none());
        }

        #[test]
        fn test_defaults_are_displayed_and_enabled() {
            let elem = ElementHandle::new("btn-1", "button");
            assert!(elem.is_displayed());
            assert!(elem.is_enabled());
        }

        #[test]
        fn test_hidden_element() {
            let elem = ElementHandle::new("spinner", "div").with_displayed(false);
            assert!(!elem.is_displayed());
            assert!(elem.is_enabled());
        }

        #[test]
        fn test_disabled_element() {
            let elem = ElementHandle::new("submit", "button").with_enabled(false);
            assert!(elem.is_displayed());
            assert!(!elem.is_enabled());
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn test_attribute_lookup() {
            let elem = ElementHandle::new("name", "input")
                .with_attribute("type", "text")
                .with_attribute("placeholder", "Your name");
            assert_eq!(elem.attribute("type"), Some("text"));
            assert_eq!(elem.attribute("missing"), None);
        }

        #[test]
        fn test_classes() {
            let elem =
                ElementHandle::new("cta", "button").with_attribute("class", "btn btn-primary");
            assert_eq!(elem.classes(), vec!["btn", "btn-primary"]);
        }

        #[test]
        fn test_classes_empty_without_attribute() {
            let elem = ElementHandle::new("cta", "button");
            assert!(elem.classes().is_empty());
        }
    }
}
