//! Application kernel bootstrap for simulated test sessions.
//!
//! The kernel owns a service container and a pair of startup capability
//! flags. The bootstrap fallback resolves the named test-client service,
//! applies server parameters to the new client and registers it as the
//! session's active client. When the service is absent, the failure
//! diagnostic is chosen from the capability flags determined at startup,
//! never from runtime type probing.

use std::any::Any;
use std::collections::HashMap;

use crate::client::TestClient;
use crate::result::{PanteraError, PanteraResult};
use crate::session::TestSession;
use crate::simulated::{ServerParams, SimulatedClient};

/// Service name of the simulated test client
pub const TEST_CLIENT_SERVICE: &str = "test.client";

/// Options applied when booting the kernel
#[derive(Debug, Clone)]
pub struct KernelOptions {
    /// Runtime environment name
    pub environment: String,
    /// Debug mode
    pub debug: bool,
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self {
            environment: String::from("test"),
            debug: true,
        }
    }
}

impl KernelOptions {
    /// Set the environment name
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set debug mode
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Startup capability flags.
///
/// Determined once when the kernel is constructed; the bootstrap diagnostic
/// for a missing test-client service is selected from these flags.
#[derive(Debug, Clone, Copy)]
pub struct KernelCapabilities {
    /// Test-mode services are wired into the container
    pub test_mode: bool,
    /// The in-process browser-kit dependency is present
    pub browser_kit: bool,
}

impl Default for KernelCapabilities {
    fn default() -> Self {
        Self {
            test_mode: true,
            browser_kit: true,
        }
    }
}

/// Dependency container with lookup by service name
#[derive(Default)]
pub struct ServiceContainer {
    services: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl ServiceContainer {
    /// Create an empty container
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, replacing any previous one under the same name
    pub fn register<T: Any + Send + Sync>(&mut self, name: impl Into<String>, service: T) {
        let _ = self.services.insert(name.into(), Box::new(service));
    }

    /// Look up a service by name and type
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.services.get(name).and_then(|s| s.downcast_ref::<T>())
    }

    /// Whether a service name is registered
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Remove a service by name
    pub fn remove(&mut self, name: &str) -> bool {
        self.services.remove(name).is_some()
    }

    /// Number of registered services
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the container is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("services", &self.services.len())
            .finish()
    }
}

/// Factory service producing simulated clients
pub struct SimulatedClientFactory {
    build: Box<dyn Fn() -> SimulatedClient + Send + Sync>,
}

impl SimulatedClientFactory {
    /// Factory producing blank clients
    #[must_use]
    pub fn new() -> Self {
        Self {
            build: Box::new(SimulatedClient::new),
        }
    }

    /// Factory producing clients from a closure
    #[must_use]
    pub fn with_builder<F>(build: F) -> Self
    where
        F: Fn() -> SimulatedClient + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
        }
    }

    /// Produce a new client
    #[must_use]
    pub fn create(&self) -> SimulatedClient {
        (self.build)()
    }
}

impl Default for SimulatedClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimulatedClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedClientFactory").finish()
    }
}

/// Application kernel with dependency lookup
#[derive(Debug)]
pub struct AppKernel {
    options: KernelOptions,
    capabilities: KernelCapabilities,
    container: ServiceContainer,
    booted: bool,
}

impl AppKernel {
    /// Create an unbooted kernel
    #[must_use]
    pub fn new(options: KernelOptions, capabilities: KernelCapabilities) -> Self {
        Self {
            options,
            capabilities,
            container: ServiceContainer::new(),
            booted: false,
        }
    }

    /// Boot the kernel, wiring test services from the capability flags.
    ///
    /// Booting an already-booted kernel is a no-op.
    pub fn boot(&mut self) {
        if self.booted {
            return;
        }
        tracing::debug!(
            environment = %self.options.environment,
            test_mode = self.capabilities.test_mode,
            browser_kit = self.capabilities.browser_kit,
            "booting kernel"
        );
        if self.capabilities.test_mode && self.capabilities.browser_kit {
            self.container
                .register(TEST_CLIENT_SERVICE, SimulatedClientFactory::new());
        }
        self.booted = true;
    }

    /// Whether the kernel has been booted
    #[must_use]
    pub const fn is_booted(&self) -> bool {
        self.booted
    }

    /// Boot options
    #[must_use]
    pub const fn options(&self) -> &KernelOptions {
        &self.options
    }

    /// Startup capability flags
    #[must_use]
    pub const fn capabilities(&self) -> KernelCapabilities {
        self.capabilities
    }

    /// The service container
    #[must_use]
    pub const fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// Mutable access to the service container
    pub fn container_mut(&mut self) -> &mut ServiceContainer {
        &mut self.container
    }
}

/// Bootstrap fallback: create a simulated-client session from the kernel.
///
/// Boots the kernel, resolves the [`TEST_CLIENT_SERVICE`] factory, applies
/// the server parameters to the new client and registers it as the
/// session's active client.
///
/// # Errors
///
/// Returns a configuration error when the service cannot be resolved; the
/// diagnostic depends on the kernel's browser-kit capability flag.
pub fn create_client<'s>(
    session: &'s mut TestSession,
    kernel: &mut AppKernel,
    server: ServerParams,
) -> PanteraResult<&'s dyn TestClient> {
    kernel.boot();

    let Some(factory) = kernel
        .container()
        .get::<SimulatedClientFactory>(TEST_CLIENT_SERVICE)
    else {
        let message = if kernel.capabilities().browser_kit {
            "cannot create the test client: the framework test mode is not enabled"
        } else {
            "cannot create the test client: browser-kit support is not available"
        };
        return Err(PanteraError::Configuration {
            message: message.to_string(),
        });
    };

    let mut client = factory.create();
    client.set_server_parameters(server);
    tracing::debug!("registering simulated client as the active client");
    Ok(session.set_client(Box::new(client)))
}
