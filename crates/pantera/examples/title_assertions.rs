//! Title Assertions Demo - Dual-Mode Dispatch
//!
//! Demonstrates the title assertions against a simulated client and a
//! scripted real-browser client:
//! - assert_page_title_same
//! - assert_page_title_contains
//!
//! # Running
//!
//! ```bash
//! cargo run --example title_assertions -p pantera
//! ```

use pantera::{
    Page, RealBrowserClient, ScriptedBackend, SimulatedClient, TestSession, WebAssertions,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantera=debug".into()),
        )
        .init();

    println!("=== Pantera Title Assertions Demo ===\n");

    demo_simulated_client();
    demo_real_browser_client();
    demo_failure_reporting();

    println!("\n=== Title Assertions Demo Complete ===");
}

fn demo_simulated_client() {
    println!("--- Demo 1: Simulated Client (base assertion path) ---\n");

    let mut client = SimulatedClient::new();
    client.load_page(Page::new("http://localhost/welcome").with_title("Welcome to Pantera"));

    let session = TestSession::with_client(Box::new(client));
    let outcome = session.assert_page_title_same("Welcome to Pantera", "");
    println!("assert_page_title_same(\"Welcome to Pantera\"): {outcome:?}");

    let outcome = session.assert_page_title_contains("Pantera", "");
    println!("assert_page_title_contains(\"Pantera\"): {outcome:?}");

    println!();
}

fn demo_real_browser_client() {
    println!("--- Demo 2: Real-Browser Client (live title path) ---\n");

    // A scripted backend stands in for a live Chromium session; enable the
    // `browser` feature and RealBrowserClient::launch for the real thing.
    let backend = ScriptedBackend::new().with_title("Checkout | Acme Store");
    let session = TestSession::with_client(Box::new(RealBrowserClient::with_backend(Box::new(
        backend,
    ))));

    let outcome = session.assert_page_title_contains("Acme", "");
    println!("assert_page_title_contains(\"Acme\"): {outcome:?}");

    println!();
}

fn demo_failure_reporting() {
    println!("--- Demo 3: Failure Reporting ---\n");

    let backend = ScriptedBackend::new().with_title("Checkout | Acme Store");
    let session = TestSession::with_client(Box::new(RealBrowserClient::with_backend(Box::new(
        backend,
    ))));

    match session.assert_page_title_same("Cart", "after adding an item") {
        Ok(()) => println!("unexpected pass"),
        Err(err) => println!("failure surfaces the custom message:\n  {err}"),
    }
}
