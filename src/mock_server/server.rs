//! Mock control-plane server.
//!
//! Provides an axum-based HTTP server that simulates the SIP control plane.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock SIP control-plane server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `SipClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for trunk in scenario.inbound_trunks {
            state.inbound_trunks.insert(trunk.sip_trunk_id.clone(), trunk);
        }

        for trunk in scenario.outbound_trunks {
            state
                .outbound_trunks
                .insert(trunk.sip_trunk_id.clone(), trunk);
        }

        for rule in scenario.dispatch_rules {
            state
                .dispatch_rules
                .insert(rule.sip_dispatch_rule_id.clone(), rule);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Inbound trunk routes
            .route("/sip/inbound-trunks", get(handlers::list_inbound_trunks))
            .route("/sip/inbound-trunks", post(handlers::create_inbound_trunk))
            .route(
                "/sip/inbound-trunks/:id",
                put(handlers::update_inbound_trunk),
            )
            // Outbound trunk routes
            .route("/sip/outbound-trunks", get(handlers::list_outbound_trunks))
            .route(
                "/sip/outbound-trunks",
                post(handlers::create_outbound_trunk),
            )
            .route(
                "/sip/outbound-trunks/:id",
                put(handlers::update_outbound_trunk),
            )
            // Deletion is shared across trunk kinds
            .route("/sip/trunks/:id", delete(handlers::delete_trunk))
            // Dispatch rule routes
            .route("/sip/dispatch-rules", get(handlers::list_dispatch_rules))
            .route("/sip/dispatch-rules", post(handlers::create_dispatch_rule))
            .route(
                "/sip/dispatch-rules/:id",
                put(handlers::update_dispatch_rule),
            )
            .route(
                "/sip/dispatch-rules/:id",
                delete(handlers::delete_dispatch_rule),
            )
            // Participant routes
            .route("/sip/participants", post(handlers::create_participant))
            .route(
                "/sip/participants/transfer",
                post(handlers::transfer_participant),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
