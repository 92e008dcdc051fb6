//! Trunk endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::update::UpdateAction;
use crate::{SipInboundTrunk, SipInboundTrunkPatch, SipOutboundTrunk, SipOutboundTrunkPatch};

use super::paginate;

/// Query parameters for listing trunks.
#[derive(Debug, Default, Deserialize)]
pub struct ListTrunksQuery {
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub number: Option<String>,
}

/// Response for listing trunks.
#[derive(Debug, Serialize)]
pub struct ListTrunksResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

fn trunk_not_found(id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Trunk not found",
            "message": format!("No trunk found with ID: {}", id)
        })),
    )
        .into_response()
}

/// GET /sip/inbound-trunks
pub async fn list_inbound_trunks(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListTrunksQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let trunks = state.list_inbound_trunks(query.number.as_deref());
    let (items, total) = paginate(trunks, query.page.unwrap_or(1), query.count.unwrap_or(20));

    (StatusCode::OK, Json(ListTrunksResponse { items, total }))
}

/// POST /sip/inbound-trunks
pub async fn create_inbound_trunk(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(mut trunk): Json<SipInboundTrunk>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    trunk.sip_trunk_id = state.next_id("ST");
    trunk.created_at = Some(Utc::now());
    state
        .inbound_trunks
        .insert(trunk.sip_trunk_id.clone(), trunk.clone());

    (StatusCode::OK, Json(trunk))
}

/// PUT /sip/inbound-trunks/{id}
pub async fn update_inbound_trunk(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Json(action): Json<UpdateAction<SipInboundTrunk, SipInboundTrunkPatch>>,
) -> impl IntoResponse {
    let id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let mut state = state.write().await;

    match state.update_inbound_trunk(&id, action) {
        Some(trunk) => (StatusCode::OK, Json(trunk.clone())).into_response(),
        None => trunk_not_found(&id),
    }
}

/// GET /sip/outbound-trunks
pub async fn list_outbound_trunks(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListTrunksQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let trunks = state.list_outbound_trunks(query.number.as_deref());
    let (items, total) = paginate(trunks, query.page.unwrap_or(1), query.count.unwrap_or(20));

    (StatusCode::OK, Json(ListTrunksResponse { items, total }))
}

/// POST /sip/outbound-trunks
pub async fn create_outbound_trunk(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(mut trunk): Json<SipOutboundTrunk>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    trunk.sip_trunk_id = state.next_id("ST");
    trunk.created_at = Some(Utc::now());
    state
        .outbound_trunks
        .insert(trunk.sip_trunk_id.clone(), trunk.clone());

    (StatusCode::OK, Json(trunk))
}

/// PUT /sip/outbound-trunks/{id}
pub async fn update_outbound_trunk(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Json(action): Json<UpdateAction<SipOutboundTrunk, SipOutboundTrunkPatch>>,
) -> impl IntoResponse {
    let id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let mut state = state.write().await;

    match state.update_outbound_trunk(&id, action) {
        Some(trunk) => (StatusCode::OK, Json(trunk.clone())).into_response(),
        None => trunk_not_found(&id),
    }
}

/// DELETE /sip/trunks/{id}
///
/// Deletion is one endpoint shared by both trunk kinds.
pub async fn delete_trunk(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let mut state = state.write().await;

    if let Some(trunk) = state.inbound_trunks.remove(&id) {
        return (StatusCode::OK, Json(serde_json::json!(trunk))).into_response();
    }
    if let Some(trunk) = state.outbound_trunks.remove(&id) {
        return (StatusCode::OK, Json(serde_json::json!(trunk))).into_response();
    }
    trunk_not_found(&id)
}
