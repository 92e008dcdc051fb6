//! SIP participant requests and trait-free call operations.
//!
//! Participants are not a CRUD resource: creating one dials a phone number
//! and blocks until the call is established, and transfers act on a live
//! call leg. Both are one-shot POSTs with no list/delete counterpart.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::SipClient;
use crate::error::{Result, SipError};

/// Default deadline for dialing a participant.
///
/// Establishing the call can take far longer than an ordinary API request,
/// so dials always use an extended per-request deadline.
pub const DEFAULT_DIAL_DEADLINE: Duration = Duration::from_secs(30);

/// Request to dial a phone number and place the caller into a room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSipParticipantRequest {
    /// Outbound trunk to dial through.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sip_trunk_id: String,

    /// Number to dial.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sip_call_to: String,

    /// Number to present as the caller.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sip_number: String,

    /// Room the participant is placed into.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub room_name: String,

    /// Identity the participant joins with.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub participant_identity: String,

    /// Display name for the participant.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub participant_name: String,

    /// Block until the far end answers instead of returning on ringing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wait_until_answered: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,
}

impl CreateSipParticipantRequest {
    /// Validate that the request describes a dialable call.
    ///
    /// # Errors
    ///
    /// Returns [`SipError::InvalidInput`] naming the missing field.
    pub fn validate(&self) -> Result<()> {
        if self.sip_trunk_id.is_empty() {
            return Err(SipError::InvalidInput(
                "no trunk specified for the call".to_string(),
            ));
        }
        if self.sip_call_to.is_empty() {
            return Err(SipError::InvalidInput(
                "no number to call specified".to_string(),
            ));
        }
        if self.room_name.is_empty() {
            return Err(SipError::InvalidInput(
                "no room name specified".to_string(),
            ));
        }
        Ok(())
    }

    /// The deadline to apply when dialing.
    ///
    /// A caller-supplied deadline is honored only when the request waits for
    /// the far end to answer; otherwise the default applies.
    pub fn dial_deadline(&self, requested: Option<Duration>) -> Duration {
        if self.wait_until_answered {
            if let Some(d) = requested.filter(|d| !d.is_zero()) {
                return d;
            }
        }
        DEFAULT_DIAL_DEADLINE
    }
}

/// Request to transfer an active SIP participant elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferSipParticipantRequest {
    /// Room the participant is currently in.
    pub room_name: String,

    /// Identity of the participant to transfer.
    pub participant_identity: String,

    /// SIP URL to transfer the call to; `tel:<number>` transfers to a phone.
    pub transfer_to: String,

    /// Play a dial tone to the participant while the transfer is attempted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub play_dialtone: bool,
}

/// A participant created by dialing out over a trunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SipParticipant {
    /// Identifier of the SIP call leg.
    #[serde(default)]
    pub sip_call_id: String,

    #[serde(default)]
    pub participant_id: String,

    #[serde(default)]
    pub participant_identity: String,

    #[serde(default)]
    pub room_name: String,
}

impl SipParticipant {
    /// Dial the call described by `req` with an explicit deadline.
    ///
    /// Use [`CreateSipParticipantRequest::dial_deadline`] to derive the
    /// deadline from the request and any caller-supplied timeout.
    ///
    /// # Errors
    ///
    /// A rejected dial surfaces as [`SipError::SipStatus`] carrying the SIP
    /// response code the control plane reported.
    #[tracing::instrument(skip(client, req))]
    pub async fn create(
        client: &SipClient,
        req: &CreateSipParticipantRequest,
        deadline: Duration,
    ) -> Result<Self> {
        let response = client
            .post_with_deadline("sip/participants", req, deadline)
            .await?;
        let participant: Self = response.json().await.map_err(SipError::Http)?;
        Ok(participant)
    }

    /// Transfer an active participant to another destination.
    #[tracing::instrument(skip(client, req))]
    pub async fn transfer(client: &SipClient, req: &TransferSipParticipantRequest) -> Result<()> {
        client.post("sip/participants/transfer", req).await?;
        Ok(())
    }
}
