//! Participant endpoint handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tokio::sync::RwLock;

use crate::mock_server::fixtures::BUSY_NUMBER;
use crate::mock_server::state::MockState;
use crate::{CreateSipParticipantRequest, SipParticipant, TransferSipParticipantRequest};

/// POST /sip/participants
///
/// Dials the requested number. The reserved busy number is rejected with a
/// SIP status pair, the way the real control plane reports failed calls.
pub async fn create_participant(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(req): Json<CreateSipParticipantRequest>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if !state.outbound_trunks.contains_key(&req.sip_trunk_id) {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "Trunk not found",
                "message": format!("No outbound trunk found with ID: {}", req.sip_trunk_id)
            })),
        )
            .into_response();
    }

    if req.sip_call_to == BUSY_NUMBER {
        return (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({
                "sip_status_code": 486,
                "sip_status": "Busy Here"
            })),
        )
            .into_response();
    }

    let participant_identity = if req.participant_identity.is_empty() {
        format!("sip-{}", req.sip_call_to)
    } else {
        req.participant_identity.clone()
    };

    let participant = SipParticipant {
        sip_call_id: state.next_id("SCL"),
        participant_id: state.next_id("PA"),
        participant_identity,
        room_name: req.room_name.clone(),
    };

    (StatusCode::OK, Json(participant)).into_response()
}

/// POST /sip/participants/transfer
pub async fn transfer_participant(
    Json(req): Json<TransferSipParticipantRequest>,
) -> impl IntoResponse {
    if req.transfer_to.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Invalid transfer",
                "message": "transfer_to must not be empty"
            })),
        )
            .into_response();
    }

    (StatusCode::OK, Json(serde_json::json!({}))).into_response()
}
