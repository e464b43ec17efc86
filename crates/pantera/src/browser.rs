//! Real-browser client and backends.
//!
//! The client drives an actual browser through an abstract [`BrowserBackend`]
//! trait. The default backend speaks the Chrome DevTools Protocol via
//! chromiumoxide when the `browser` feature is enabled; the always-available
//! [`ScriptedBackend`] answers from in-memory page state for unit tests.
//!
//! The public API is synchronous call-and-return; the CDP backend owns its
//! async runtime and blocks internally.

use crate::client::{ClientKind, TestClient};
use crate::element::ElementHandle;
use crate::locator::Selector;
use crate::result::{PanteraError, PanteraResult};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserClientConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserClientConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserClientConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Abstract backend for driving a real browser.
///
/// Allows swapping the protocol implementation without touching the
/// assertion layer.
pub trait BrowserBackend: Send + Sync {
    /// Navigate to a URL
    ///
    /// # Errors
    ///
    /// Returns a navigation error when the page cannot be loaded.
    fn navigate(&mut self, url: &str) -> PanteraResult<()>;

    /// Live document title
    ///
    /// # Errors
    ///
    /// Returns a protocol error when the backend cannot answer.
    fn title(&self) -> PanteraResult<String>;

    /// Resolve exactly one element
    ///
    /// # Errors
    ///
    /// Returns [`PanteraError::ElementNotFound`] for zero matches, or a
    /// protocol error from the driver.
    fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle>;

    /// Current page URL
    fn current_url(&self) -> String;

    /// Close the browser session
    ///
    /// # Errors
    ///
    /// Returns a protocol error when shutdown fails.
    fn close(&mut self) -> PanteraResult<()>;
}

/// In-memory backend answering from scripted page state.
///
/// Used to unit-test the assertion layer without a browser process.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    url: String,
    title: String,
    elements: Vec<(String, ElementHandle)>,
    fault: Option<String>,
    history: Vec<String>,
}

impl ScriptedBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the live title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Script an element for a locator
    #[must_use]
    pub fn with_element(mut self, locator: impl Into<String>, element: ElementHandle) -> Self {
        self.elements.push((locator.into(), element));
        self
    }

    /// Make every query fail with a protocol error
    #[must_use]
    pub fn with_protocol_fault(mut self, message: impl Into<String>) -> Self {
        self.fault = Some(message.into());
        self
    }

    /// Update the live title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Recorded calls
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Check if a method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history.iter().any(|c| c.starts_with(method))
    }

    fn check_fault(&self) -> PanteraResult<()> {
        match &self.fault {
            Some(message) => Err(PanteraError::Protocol {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl BrowserBackend for ScriptedBackend {
    fn navigate(&mut self, url: &str) -> PanteraResult<()> {
        self.history.push(format!("navigate:{url}"));
        self.url = url.to_string();
        Ok(())
    }

    fn title(&self) -> PanteraResult<String> {
        self.check_fault()?;
        Ok(self.title.clone())
    }

    fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle> {
        self.check_fault()?;
        self.elements
            .iter()
            .find(|(locator, _)| locator == selector.as_str())
            .map(|(_, element)| element.clone())
            .ok_or_else(|| PanteraError::ElementNotFound {
                locator: selector.as_str().to_string(),
            })
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn close(&mut self) -> PanteraResult<()> {
        self.history.push("close".to_string());
        Ok(())
    }
}

/// Test client driving a live browser session
pub struct RealBrowserClient {
    backend: Box<dyn BrowserBackend>,
}

impl RealBrowserClient {
    /// Create a client over an existing backend
    #[must_use]
    pub fn with_backend(backend: Box<dyn BrowserBackend>) -> Self {
        Self { backend }
    }

    /// Launch a real Chromium session
    ///
    /// # Errors
    ///
    /// Returns a launch error when no browser can be started.
    #[cfg(feature = "browser")]
    pub fn launch(config: BrowserClientConfig) -> PanteraResult<Self> {
        Ok(Self::with_backend(Box::new(cdp::CdpBackend::launch(
            config,
        )?)))
    }

    /// Translate an opaque locator string into the client's native selector
    #[must_use]
    pub fn selector_from_locator(locator: &str) -> Selector {
        Selector::from_locator(locator)
    }

    /// Navigate to a URL
    ///
    /// # Errors
    ///
    /// Returns a navigation error when the page cannot be loaded.
    pub fn goto(&mut self, url: &str) -> PanteraResult<()> {
        self.backend.navigate(url)
    }

    /// Close the browser session
    ///
    /// # Errors
    ///
    /// Returns a protocol error when shutdown fails.
    pub fn close(&mut self) -> PanteraResult<()> {
        self.backend.close()
    }
}

impl std::fmt::Debug for RealBrowserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealBrowserClient")
            .field("url", &self.backend.current_url())
            .finish()
    }
}

impl TestClient for RealBrowserClient {
    fn kind(&self) -> ClientKind {
        ClientKind::RealBrowser
    }

    fn title(&self) -> PanteraResult<String> {
        self.backend.title()
    }

    fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle> {
        self.backend.find_element(selector)
    }

    fn current_url(&self) -> String {
        self.backend.current_url()
    }
}

// ============================================================================
// CDP backend (when the `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{
        BrowserBackend, BrowserClientConfig, ElementHandle, PanteraError, PanteraResult, Selector,
    };
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tokio::runtime::Runtime;

    /// Element state captured by the probe expression
    #[derive(Debug, Deserialize)]
    struct ElementProbe {
        tag: String,
        text: Option<String>,
        attrs: BTreeMap<String, String>,
        displayed: bool,
        enabled: bool,
    }

    /// Backend speaking the Chrome DevTools Protocol.
    ///
    /// Owns a tokio runtime and blocks on every call so the assertion layer
    /// stays synchronous.
    #[derive(Debug)]
    pub struct CdpBackend {
        runtime: Runtime,
        browser: CdpBrowser,
        page: CdpPage,
        url: String,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl CdpBackend {
        /// Launch a Chromium session
        ///
        /// # Errors
        ///
        /// Returns a launch error when the browser cannot be started.
        pub fn launch(config: BrowserClientConfig) -> PanteraResult<Self> {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);
            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }
            let cdp_config = builder
                .build()
                .map_err(|message| PanteraError::BrowserLaunch { message })?;

            let (browser, mut handler) = runtime
                .block_on(CdpBrowser::launch(cdp_config))
                .map_err(|e| PanteraError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            let handle = runtime.spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = runtime
                .block_on(browser.new_page("about:blank"))
                .map_err(|e| PanteraError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            Ok(Self {
                runtime,
                browser,
                page,
                url: String::from("about:blank"),
                handle,
            })
        }
    }

    impl BrowserBackend for CdpBackend {
        fn navigate(&mut self, url: &str) -> PanteraResult<()> {
            self.runtime
                .block_on(self.page.goto(url))
                .map_err(|e| PanteraError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            self.url = url.to_string();
            Ok(())
        }

        fn title(&self) -> PanteraResult<String> {
            let title = self
                .runtime
                .block_on(self.page.get_title())
                .map_err(|e| PanteraError::Protocol {
                    message: e.to_string(),
                })?;
            Ok(title.unwrap_or_default())
        }

        fn find_element(&self, selector: &Selector) -> PanteraResult<ElementHandle> {
            let result = self
                .runtime
                .block_on(self.page.evaluate(selector.to_probe_query()))
                .map_err(|e| PanteraError::Protocol {
                    message: e.to_string(),
                })?;
            // A JS null result may surface as a missing value depending on
            // the protocol round-trip; treat both as "no match".
            let value = result.value().cloned().unwrap_or(serde_json::Value::Null);

            if value.is_null() {
                return Err(PanteraError::ElementNotFound {
                    locator: selector.as_str().to_string(),
                });
            }

            let probe: ElementProbe = serde_json::from_value(value)?;
            let id = probe
                .attrs
                .get("id")
                .cloned()
                .unwrap_or_else(|| selector.as_str().to_string());
            let mut element = ElementHandle::new(id, probe.tag)
                .with_displayed(probe.displayed)
                .with_enabled(probe.enabled);
            if let Some(text) = probe.text {
                element = element.with_text(text);
            }
            element.attributes = probe.attrs;
            Ok(element)
        }

        fn current_url(&self) -> String {
            self.url.clone()
        }

        fn close(&mut self) -> PanteraResult<()> {
            let Self {
                runtime, browser, ..
            } = self;
            runtime
                .block_on(browser.close())
                .map_err(|e| PanteraError::Protocol {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpBackend;
