//! Mock SIP control-plane server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the SIP
//! control plane for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server maintains state
//! across requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use sipctl::mock_server::MockServer;
//! use sipctl::{List, SipClient, SipInboundTrunk};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = SipClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let trunks = SipInboundTrunk::list_all(&client, &Default::default()).await.unwrap();
//!     assert!(!trunks.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Fixtures, BUSY_NUMBER};
pub use server::MockServer;
pub use state::MockState;
