//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the sipctl
//! binary, plus the glue that turns update-command flags into resolved
//! mutation requests.

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::models::{
    SipDispatchRule, SipDispatchRulePatch, SipInboundTrunk, SipInboundTrunkPatch,
    SipOutboundTrunk, SipOutboundTrunkPatch, SipTransport,
};
use crate::update::{self, resolve_update, UpdateRequest};

/// SIP control-plane command-line interface.
#[derive(Parser, Debug)]
#[command(name = "sipctl", about = "Manage SIP trunks, dispatch rules, and participants", version)]
pub struct Cli {
    /// Base URL of the control plane.
    #[arg(long, global = true, env = "SIPCTL_API_URL")]
    pub url: Option<String>,

    /// API key used to authenticate.
    #[arg(long, global = true, env = "SIPCTL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inbound SIP trunk management.
    #[command(subcommand, visible_aliases = ["in", "inbound-trunk"])]
    Inbound(InboundCommand),

    /// Outbound SIP trunk management.
    #[command(subcommand, visible_aliases = ["out", "outbound-trunk"])]
    Outbound(OutboundCommand),

    /// SIP dispatch rule management.
    #[command(subcommand, visible_alias = "dispatch-rule")]
    Dispatch(DispatchCommand),

    /// SIP participant management.
    #[command(subcommand)]
    Participant(ParticipantCommand),
}

/// Inbound trunk subcommands.
#[derive(Subcommand, Debug)]
pub enum InboundCommand {
    /// List all inbound SIP trunks.
    List(ListArgs),

    /// Create inbound SIP trunks from JSON descriptions.
    Create {
        /// Trunk descriptions, each a JSON file path or literal.
        #[arg(value_name = "JSON", required = true)]
        requests: Vec<String>,
    },

    /// Update an inbound SIP trunk.
    Update(InboundUpdateArgs),

    /// Delete SIP trunks.
    Delete {
        /// IDs of the trunks to delete.
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
}

/// Outbound trunk subcommands.
#[derive(Subcommand, Debug)]
pub enum OutboundCommand {
    /// List all outbound SIP trunks.
    List(ListArgs),

    /// Create outbound SIP trunks from JSON descriptions.
    Create {
        /// Trunk descriptions, each a JSON file path or literal.
        #[arg(value_name = "JSON", required = true)]
        requests: Vec<String>,
    },

    /// Update an outbound SIP trunk.
    Update(OutboundUpdateArgs),

    /// Delete SIP trunks.
    Delete {
        /// IDs of the trunks to delete.
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
}

/// Dispatch rule subcommands.
#[derive(Subcommand, Debug)]
pub enum DispatchCommand {
    /// List all SIP dispatch rules.
    List(DispatchListArgs),

    /// Create SIP dispatch rules from JSON descriptions.
    Create {
        /// Rule descriptions, each a JSON file path or literal.
        #[arg(value_name = "JSON", required = true)]
        requests: Vec<String>,
    },

    /// Update a SIP dispatch rule.
    Update(DispatchUpdateArgs),

    /// Delete SIP dispatch rules.
    Delete {
        /// IDs of the rules to delete.
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
}

/// Participant subcommands.
#[derive(Subcommand, Debug)]
pub enum ParticipantCommand {
    /// Dial a phone number and place the caller into a room.
    Create(ParticipantCreateArgs),

    /// Transfer an active SIP participant.
    Transfer(ParticipantTransferArgs),
}

/// Pagination and filtering for trunk list commands.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[arg(long)]
    pub count: Option<u32>,

    /// Only list trunks serving this phone number.
    #[arg(long)]
    pub number: Option<String>,
}

/// Pagination and filtering for dispatch rule list commands.
#[derive(Args, Debug, Default)]
pub struct DispatchListArgs {
    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[arg(long)]
    pub count: Option<u32>,

    /// Only list rules covering this trunk.
    #[arg(long)]
    pub trunk: Option<String>,
}

/// Flags for `inbound update`.
#[derive(Args, Debug, Default)]
pub struct InboundUpdateArgs {
    /// ID of the trunk to update.
    #[arg(long)]
    pub id: Option<String>,

    /// Sets a new name for the trunk.
    #[arg(long)]
    pub name: Option<String>,

    /// Sets a new list of numbers for the trunk.
    #[arg(long, value_delimiter = ',')]
    pub numbers: Option<Vec<String>>,

    /// Set username for authentication.
    #[arg(long)]
    pub auth_user: Option<String>,

    /// Set password for authentication.
    #[arg(long)]
    pub auth_pass: Option<String>,

    /// Full trunk description as a JSON file or literal, replacing the trunk.
    #[arg(value_name = "JSON")]
    pub request: Vec<String>,
}

impl InboundUpdateArgs {
    /// Resolve this invocation into a replace or patch request.
    pub fn resolve(&self) -> Result<UpdateRequest<SipInboundTrunk, SipInboundTrunkPatch>> {
        resolve_update(self.id.as_deref(), &self.request, || {
            Ok(SipInboundTrunkPatch {
                name: update::scalar(self.name.as_deref()),
                auth_username: update::scalar(self.auth_user.as_deref()),
                auth_password: update::scalar(self.auth_pass.as_deref()),
                numbers: update::list(self.numbers.as_deref()),
            })
        })
    }
}

/// Flags for `outbound update`.
#[derive(Args, Debug, Default)]
pub struct OutboundUpdateArgs {
    /// ID of the trunk to update.
    #[arg(long)]
    pub id: Option<String>,

    /// Sets a new name for the trunk.
    #[arg(long)]
    pub name: Option<String>,

    /// Sets a new destination address for the trunk.
    #[arg(long)]
    pub address: Option<String>,

    /// Sets a new transport for the trunk.
    #[arg(long)]
    pub transport: Option<String>,

    /// Sets a new list of numbers for the trunk.
    #[arg(long, value_delimiter = ',')]
    pub numbers: Option<Vec<String>>,

    /// Set username for authentication.
    #[arg(long)]
    pub auth_user: Option<String>,

    /// Set password for authentication.
    #[arg(long)]
    pub auth_pass: Option<String>,

    /// Full trunk description as a JSON file or literal, replacing the trunk.
    #[arg(value_name = "JSON")]
    pub request: Vec<String>,
}

impl OutboundUpdateArgs {
    /// Resolve this invocation into a replace or patch request.
    ///
    /// The transport flag is normalized here, so an unsupported transport
    /// only fails patch-mode invocations.
    pub fn resolve(&self) -> Result<UpdateRequest<SipOutboundTrunk, SipOutboundTrunkPatch>> {
        resolve_update(self.id.as_deref(), &self.request, || {
            let transport = match update::scalar(self.transport.as_deref()) {
                Some(v) => Some(v.parse::<SipTransport>()?),
                None => None,
            };
            Ok(SipOutboundTrunkPatch {
                name: update::scalar(self.name.as_deref()),
                address: update::scalar(self.address.as_deref()),
                transport,
                auth_username: update::scalar(self.auth_user.as_deref()),
                auth_password: update::scalar(self.auth_pass.as_deref()),
                numbers: update::list(self.numbers.as_deref()),
            })
        })
    }
}

/// Flags for `dispatch update`.
#[derive(Args, Debug, Default)]
pub struct DispatchUpdateArgs {
    /// ID of the rule to update.
    #[arg(long)]
    pub id: Option<String>,

    /// Sets a new name for the rule.
    #[arg(long)]
    pub name: Option<String>,

    /// Sets a new list of trunk IDs.
    #[arg(long, value_delimiter = ',')]
    pub trunks: Option<Vec<String>>,

    /// Full rule description as a JSON file or literal, replacing the rule.
    #[arg(value_name = "JSON")]
    pub request: Vec<String>,
}

impl DispatchUpdateArgs {
    /// Resolve this invocation into a replace or patch request.
    pub fn resolve(&self) -> Result<UpdateRequest<SipDispatchRule, SipDispatchRulePatch>> {
        resolve_update(self.id.as_deref(), &self.request, || {
            Ok(SipDispatchRulePatch {
                name: update::scalar(self.name.as_deref()),
                trunk_ids: update::list(self.trunks.as_deref()),
            })
        })
    }
}

/// Flags for `participant create`.
#[derive(Args, Debug, Default)]
pub struct ParticipantCreateArgs {
    /// Call description as a JSON file or literal. Flags override its fields.
    #[arg(value_name = "JSON")]
    pub request: Option<String>,

    /// Trunk ID to use for the call (overrides the JSON description).
    #[arg(long)]
    pub trunk: Option<String>,

    /// Number to present as the caller (overrides the JSON description).
    #[arg(long)]
    pub number: Option<String>,

    /// Number to call (overrides the JSON description).
    #[arg(long)]
    pub call: Option<String>,

    /// Room to place the call into (overrides the JSON description).
    #[arg(long)]
    pub room: Option<String>,

    /// Wait for the far end to answer before returning.
    #[arg(long)]
    pub wait: bool,

    /// Timeout in seconds for the call to be answered (requires --wait).
    #[arg(long, value_name = "SECS", default_value_t = 80)]
    pub timeout: u64,
}

/// Flags for `participant transfer`.
#[derive(Args, Debug)]
pub struct ParticipantTransferArgs {
    /// Room the participant is in.
    #[arg(long, required = true)]
    pub room: String,

    /// Identity of the participant to transfer.
    #[arg(long, required = true)]
    pub identity: String,

    /// SIP URL to transfer the call to. Use 'tel:<phone number>' to transfer to a phone.
    #[arg(long, required = true)]
    pub to: String,

    /// Play a dial tone to the participant while the transfer is attempted.
    #[arg(long)]
    pub play_dialtone: bool,
}
