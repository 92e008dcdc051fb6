//! Dispatch rule model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::SipClient;
use crate::error::{Result, SipError};
use crate::pagination::Page;
use crate::traits::{Create, Delete, List, Update};
use crate::update::{ListUpdate, ReplacePayload, UpdateAction};

/// How an inbound call is routed to a room.
///
/// Serialized as a single-key object naming the variant, e.g.
/// `{"dispatch_rule_direct": {"room_name": "lobby"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchRule {
    /// All callers join one room.
    DispatchRuleDirect {
        room_name: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pin: String,
    },
    /// Each caller gets their own room under a prefix.
    DispatchRuleIndividual {
        room_prefix: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pin: String,
    },
    /// Callers are grouped by the number they dialed.
    DispatchRuleCallee {
        room_prefix: String,
        #[serde(default)]
        randomize: bool,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pin: String,
    },
}

/// Room configuration applied when a rule dispatches a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Agents dispatched into the room.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<RoomAgent>,
}

/// An agent dispatched alongside the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomAgent {
    pub agent_name: String,
}

/// A rule determining which room an inbound call lands in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SipDispatchRule {
    /// Canonical identifier, assigned by the control plane. Cleared before
    /// the record is submitted as a replacement payload.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sip_dispatch_rule_id: String,

    /// Human-readable rule name.
    #[serde(default)]
    pub name: String,

    /// Trunks the rule applies to. Empty matches any trunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trunk_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<DispatchRule>,

    /// Attributes set on dispatched participants.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_config: Option<RoomConfig>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,

    /// When the rule was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SipDispatchRule {
    /// Short label for the rule variant.
    pub fn rule_kind(&self) -> &'static str {
        match self.rule {
            Some(DispatchRule::DispatchRuleDirect { .. }) => "Direct",
            Some(DispatchRule::DispatchRuleIndividual { .. }) => "Individual (Caller)",
            Some(DispatchRule::DispatchRuleCallee { .. }) => "Callee",
            None => "",
        }
    }

    /// The room name or name pattern calls are routed to.
    pub fn room_pattern(&self) -> String {
        match &self.rule {
            Some(DispatchRule::DispatchRuleDirect { room_name, .. }) => room_name.clone(),
            Some(DispatchRule::DispatchRuleIndividual { room_prefix, .. }) => {
                format!("{room_prefix}_<caller>_<random>")
            }
            Some(DispatchRule::DispatchRuleCallee {
                room_prefix,
                randomize,
                ..
            }) => {
                let mut room = format!("{room_prefix}<callee>");
                if *randomize {
                    room.push_str("_<random>");
                }
                room
            }
            None => String::new(),
        }
    }

    /// The PIN callers must enter, if any.
    pub fn pin(&self) -> &str {
        match &self.rule {
            Some(DispatchRule::DispatchRuleDirect { pin, .. })
            | Some(DispatchRule::DispatchRuleIndividual { pin, .. })
            | Some(DispatchRule::DispatchRuleCallee { pin, .. }) => pin,
            None => "",
        }
    }

    /// Names of agents dispatched by this rule.
    pub fn agent_names(&self) -> Vec<&str> {
        self.room_config
            .as_ref()
            .map(|c| c.agents.iter().map(|a| a.agent_name.as_str()).collect())
            .unwrap_or_default()
    }
}

impl ReplacePayload for SipDispatchRule {
    fn take_id(&mut self) -> String {
        std::mem::take(&mut self.sip_dispatch_rule_id)
    }
}

/// Sparse patch for a dispatch rule. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SipDispatchRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunk_ids: Option<ListUpdate>,
}

/// Query parameters for listing dispatch rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchRuleListQuery {
    /// Only return rules covering this trunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunk_id: Option<String>,
}

/// API response wrapper for listing dispatch rules.
#[derive(Debug, Deserialize)]
struct DispatchRuleListResponse {
    items: Vec<SipDispatchRule>,
    #[serde(default)]
    total: Option<u64>,
}

#[async_trait]
impl List for SipDispatchRule {
    type Query = DispatchRuleListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &SipClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a DispatchRuleListQuery,
            page: u32,
            count: u32,
        }

        let params = RequestParams { query, page, count };

        let response = client.get_with_query("sip/dispatch-rules", &params).await?;
        let data: DispatchRuleListResponse = response.json().await.map_err(SipError::Http)?;

        Ok(Page::new(data.items, page, count, data.total))
    }
}

#[async_trait]
impl Create for SipDispatchRule {
    type Params = SipDispatchRule;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &SipClient, params: Self::Params) -> Result<Self> {
        let response = client.post("sip/dispatch-rules", &params).await?;
        let rule: Self = response.json().await.map_err(SipError::Http)?;
        Ok(rule)
    }
}

#[async_trait]
impl Update for SipDispatchRule {
    type Id = String;
    type Replacement = SipDispatchRule;
    type Patch = SipDispatchRulePatch;

    #[tracing::instrument(skip(client, action))]
    async fn update(
        client: &SipClient,
        id: String,
        action: UpdateAction<Self::Replacement, Self::Patch>,
    ) -> Result<Self> {
        let path = format!("sip/dispatch-rules/{}", urlencoding::encode(&id));

        let response = client.put(&path, &action).await?;
        let rule: Self = response.json().await.map_err(SipError::Http)?;
        Ok(rule)
    }
}

#[async_trait]
impl Delete for SipDispatchRule {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &SipClient, id: String) -> Result<Self> {
        let path = format!("sip/dispatch-rules/{}", urlencoding::encode(&id));

        let response = client.delete(&path).await?;
        let rule: Self = response.json().await.map_err(SipError::Http)?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_variant_serialization() {
        let rule = DispatchRule::DispatchRuleDirect {
            room_name: "lobby".to_string(),
            pin: "1234".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            serde_json::json!({"dispatch_rule_direct": {"room_name": "lobby", "pin": "1234"}})
        );
    }

    #[test]
    fn test_rule_variant_deserialization() {
        let rule: DispatchRule = serde_json::from_value(serde_json::json!({
            "dispatch_rule_callee": {"room_prefix": "call-", "randomize": true}
        }))
        .unwrap();
        assert_eq!(
            rule,
            DispatchRule::DispatchRuleCallee {
                room_prefix: "call-".to_string(),
                randomize: true,
                pin: String::new(),
            }
        );
    }

    #[test]
    fn test_room_pattern() {
        let mut rule = SipDispatchRule {
            rule: Some(DispatchRule::DispatchRuleIndividual {
                room_prefix: "support".to_string(),
                pin: String::new(),
            }),
            ..Default::default()
        };
        assert_eq!(rule.room_pattern(), "support_<caller>_<random>");
        assert_eq!(rule.rule_kind(), "Individual (Caller)");

        rule.rule = Some(DispatchRule::DispatchRuleCallee {
            room_prefix: "line-".to_string(),
            randomize: true,
            pin: String::new(),
        });
        assert_eq!(rule.room_pattern(), "line-<callee>_<random>");
    }

    #[test]
    fn test_take_id_clears_payload() {
        let mut rule: SipDispatchRule = serde_json::from_value(serde_json::json!({
            "sip_dispatch_rule_id": "SDR_42",
            "name": "after-hours"
        }))
        .unwrap();
        assert_eq!(rule.take_id(), "SDR_42");
        assert!(rule.sip_dispatch_rule_id.is_empty());
    }

    #[test]
    fn test_agent_names() {
        let rule = SipDispatchRule {
            room_config: Some(RoomConfig {
                agents: vec![RoomAgent {
                    agent_name: "concierge".to_string(),
                }],
            }),
            ..Default::default()
        };
        assert_eq!(rule.agent_names(), vec!["concierge"]);
    }
}
