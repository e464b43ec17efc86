//! Per-test-case client session context.
//!
//! The session replaces a process-wide "active client" accessor with an
//! explicit context object: each test case creates its own session,
//! registers one client, and drops the session at the end of the test.
//! Exactly one client is active per session at any time.

use crate::client::TestClient;
use crate::result::{PanteraError, PanteraResult};

/// Active-client context for one test case.
pub struct TestSession {
    client: Option<Box<dyn TestClient>>,
}

impl TestSession {
    /// Create a session with no active client
    #[must_use]
    pub const fn new() -> Self {
        Self { client: None }
    }

    /// Create a session with an active client
    #[must_use]
    pub fn with_client(client: Box<dyn TestClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Register the active client, replacing any previous one, and return
    /// a handle to it.
    pub fn set_client(&mut self, client: Box<dyn TestClient>) -> &dyn TestClient {
        &**self.client.insert(client)
    }

    /// The currently active client.
    ///
    /// # Errors
    ///
    /// Returns a session error when no client has been registered.
    pub fn client(&self) -> PanteraResult<&dyn TestClient> {
        self.client
            .as_deref()
            .ok_or_else(|| PanteraError::Session {
                message: "no active test client; register one before asserting".to_string(),
            })
    }

    /// Whether a client is registered
    #[must_use]
    pub const fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Tear down the active client
    pub fn reset(&mut self) {
        self.client = None;
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSession")
            .field("active", &self.client.as_ref().map(|c| c.kind()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientKind;
    use crate::simulated::SimulatedClient;

    #[test]
    fn test_empty_session_is_a_session_error() {
        let session = TestSession::new();
        let err = session.client().unwrap_err();
        assert!(matches!(err, PanteraError::Session { .. }));
        assert!(!err.is_assertion_failure());
    }

    #[test]
    fn test_set_and_read_client() {
        let mut session = TestSession::new();
        assert!(!session.has_client());

        session.set_client(Box::new(SimulatedClient::new()));
        assert!(session.has_client());
        assert_eq!(session.client().unwrap().kind(), ClientKind::Simulated);
    }

    #[test]
    fn test_set_client_replaces_previous() {
        let mut session = TestSession::with_client(Box::new(SimulatedClient::new()));
        let handle = session.set_client(Box::new(SimulatedClient::new()));
        assert_eq!(handle.kind(), ClientKind::Simulated);
        assert!(session.has_client());
    }

    #[test]
    fn test_reset_tears_down_client() {
        let mut session = TestSession::with_client(Box::new(SimulatedClient::new()));
        session.reset();
        assert!(!session.has_client());
    }

    #[test]
    fn test_debug_shows_variant() {
        let session = TestSession::with_client(Box::new(SimulatedClient::new()));
        let debug = format!("{session:?}");
        assert!(debug.contains("TestSession"));
        assert!(debug.contains("Simulated"));
    }
}
