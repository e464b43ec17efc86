//! Pantera: dual-mode web test assertions for Rust.
//!
//! Pantera (Spanish: "panther") lets the same assertion call work against
//! either a simulated in-process client or a real browser: per call, the
//! dispatcher inspects the active client's variant and routes to a live
//! browser query or to the base simulated-client assertion implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PANTERA Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌──────────────────┐    │
//! │   │ Test code  │───►│ WebAssertions│───►│ SimulatedClient  │    │
//! │   │ (Rust)     │    │ dispatcher   │ or │ RealBrowserClient│    │
//! │   └────────────┘    └──────────────┘    └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pantera::{Page, SimulatedClient, TestSession, WebAssertions};
//!
//! let mut client = SimulatedClient::new();
//! client.load_page(Page::new("http://localhost/").with_title("Welcome"));
//!
//! let session = TestSession::with_client(Box::new(client));
//! session.assert_page_title_same("Welcome", "")?;
//! session.assert_page_title_contains("Wel", "landing page")?;
//! # Ok::<(), pantera::PanteraError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
mod browser;
mod client;
mod element;

/// Application kernel bootstrap for simulated test sessions.
pub mod kernel;

mod locator;
mod result;
mod session;

/// Simulated in-process client and the base title assertions.
pub mod simulated;

mod web_assertions;

pub use assertion::{Assertion, AssertionResult};
#[cfg(feature = "browser")]
pub use browser::CdpBackend;
pub use browser::{BrowserBackend, BrowserClientConfig, RealBrowserClient, ScriptedBackend};
pub use client::{ClientKind, TestClient};
pub use element::ElementHandle;
pub use kernel::{
    create_client, AppKernel, KernelCapabilities, KernelOptions, ServiceContainer,
    SimulatedClientFactory, TEST_CLIENT_SERVICE,
};
pub use locator::Selector;
pub use result::{PanteraError, PanteraResult};
pub use session::TestSession;
pub use simulated::{Page, ServerParams, SimulatedClient};
pub use web_assertions::WebAssertions;
