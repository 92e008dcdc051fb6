//! Dispatch rule endpoint handlers.

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
use crate::{SipDispatchRule, SipDispatchRulePatch};

use super::paginate;

/// Query parameters for listing dispatch rules.
#[derive(Debug, Default, Deserialize)]
pub struct ListDispatchRulesQuery {
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub trunk_id: Option<String>,
}

/// Response for listing dispatch rules.
#[derive(Debug, Serialize)]
pub struct ListDispatchRulesResponse {
    pub items: Vec<SipDispatchRule>,
    pub total: u64,
}

fn rule_not_found(id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Dispatch rule not found",
            "message": format!("No dispatch rule found with ID: {}", id)
        })),
    )
        .into_response()
}

/// GET /sip/dispatch-rules
pub async fn list_dispatch_rules(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListDispatchRulesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let rules = state.list_dispatch_rules(query.trunk_id.as_deref());
    let (items, total) = paginate(rules, query.page.unwrap_or(1), query.count.unwrap_or(20));

    (
        StatusCode::OK,
        Json(ListDispatchRulesResponse { items, total }),
    )
}

/// POST /sip/dispatch-rules
pub async fn create_dispatch_rule(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(mut rule): Json<SipDispatchRule>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    rule.sip_dispatch_rule_id = state.next_id("SDR");
    rule.created_at = Some(Utc::now());
    state
        .dispatch_rules
        .insert(rule.sip_dispatch_rule_id.clone(), rule.clone());

    (StatusCode::OK, Json(rule))
}

/// PUT /sip/dispatch-rules/{id}
pub async fn update_dispatch_rule(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Json(action): Json<UpdateAction<SipDispatchRule, SipDispatchRulePatch>>,
) -> impl IntoResponse {
    let id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let mut state = state.write().await;

    match state.update_dispatch_rule(&id, action) {
        Some(rule) => (StatusCode::OK, Json(rule.clone())).into_response(),
        None => rule_not_found(&id),
    }
}

/// DELETE /sip/dispatch-rules/{id}
pub async fn delete_dispatch_rule(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id);

    let mut state = state.write().await;

    match state.dispatch_rules.remove(&id) {
        Some(rule) => (StatusCode::OK, Json(rule)).into_response(),
        None => rule_not_found(&id),
    }
}
