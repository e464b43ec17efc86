//! Element State Assertions Demo
//!
//! Demonstrates the selector-based assertions resolved through the
//! real-browser backend:
//! - assert_selector_is_visible / assert_selector_is_not_visible
//! - assert_selector_is_enabled / assert_selector_is_disabled
//!
//! # Running
//!
//! ```bash
//! cargo run --example element_state -p pantera
//! ```

use pantera::{ElementHandle, RealBrowserClient, ScriptedBackend, TestSession, WebAssertions};

fn main() {
    println!("=== Pantera Element State Demo ===\n");

    let backend = ScriptedBackend::new()
        .with_title("Order Form")
        .with_element(
            "#submit",
            ElementHandle::new("submit", "button").with_text("Place order"),
        )
        .with_element(
            "#spinner",
            ElementHandle::new("spinner", "div").with_displayed(false),
        )
        .with_element(
            "#coupon",
            ElementHandle::new("coupon", "input").with_enabled(false),
        );

    let session = TestSession::with_client(Box::new(RealBrowserClient::with_backend(Box::new(
        backend,
    ))));

    println!("visible submit button:");
    println!(
        "  assert_selector_is_visible(\"#submit\"): {:?}",
        session.assert_selector_is_visible("#submit")
    );
    println!(
        "  assert_selector_is_enabled(\"#submit\"): {:?}",
        session.assert_selector_is_enabled("#submit")
    );

    println!("\nhidden spinner:");
    println!(
        "  assert_selector_is_not_visible(\"#spinner\"): {:?}",
        session.assert_selector_is_not_visible("#spinner")
    );

    println!("\ndisabled coupon field:");
    println!(
        "  assert_selector_is_disabled(\"#coupon\"): {:?}",
        session.assert_selector_is_disabled("#coupon")
    );

    println!("\nunresolvable locator is fatal, not a failed predicate:");
    match session.assert_selector_is_visible("#missing") {
        Ok(()) => println!("  unexpected pass"),
        Err(err) => println!("  {err}"),
    }

    println!("\n=== Element State Demo Complete ===");
}
