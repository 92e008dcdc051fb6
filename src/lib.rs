//! SIP control-plane client library.
//!
//! A Rust library and CLI for managing SIP telephony resources — trunks,
//! dispatch rules, and participants — on a call-routing control plane,
//! using a trait-based architecture where each operation (List, Create,
//! Update, Delete) is defined as a trait that resource types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use sipctl::{List, SipClient, SipInboundTrunk};
//!
//! #[tokio::main]
//! async fn main() -> sipctl::Result<()> {
//!     // Create client from environment variables
//!     let client = SipClient::from_env()?;
//!
//!     // List all inbound trunks
//!     let trunks = SipInboundTrunk::list_all(&client, &Default::default()).await?;
//!     for trunk in &trunks {
//!         println!("{}: {}", trunk.sip_trunk_id, trunk.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Updates
//!
//! A single `update` invocation performs either a full replace (from a JSON
//! description) or a sparse patch (from flags); [`update::resolve_update`]
//! implements the selection rules and [`UpdateAction`] is the resulting
//! wire envelope. List-valued patch fields use [`ListUpdate`], which keeps
//! "replace with these values", "clear", and "leave untouched"
//! distinguishable.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SIPCTL_API_KEY` (required) - API key for the control plane
//! - `SIPCTL_API_URL` (required) - Base URL of the control plane

mod client;
mod error;
mod models;
mod pagination;
mod traits;

pub mod cli;
pub mod output;
pub mod payload;
pub mod update;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::SipClient;
pub use error::{Result, SipError};
pub use pagination::Page;
pub use update::{ListUpdate, ReplacePayload, UpdateAction, UpdateRequest};

// Re-export traits
pub use traits::{Create, Delete, List, Update};

// Re-export models
pub use models::{
    // Trunk types
    SipInboundTrunk,
    SipInboundTrunkPatch,
    SipMediaEncryption,
    SipOutboundTrunk,
    SipOutboundTrunkPatch,
    SipTransport,
    TrunkListQuery,
    // Dispatch rule types
    DispatchRule,
    DispatchRuleListQuery,
    RoomAgent,
    RoomConfig,
    SipDispatchRule,
    SipDispatchRulePatch,
    // Participant types
    CreateSipParticipantRequest,
    SipParticipant,
    TransferSipParticipantRequest,
    DEFAULT_DIAL_DEADLINE,
};
