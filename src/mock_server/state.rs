//! Mock server state management.
//!
//! Provides the in-memory data store for the mock control-plane server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::update::UpdateAction;
use crate::{
    SipDispatchRule, SipDispatchRulePatch, SipInboundTrunk, SipInboundTrunkPatch,
    SipOutboundTrunk, SipOutboundTrunkPatch,
};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Inbound trunks indexed by trunk ID (e.g., "ST_1").
    pub inbound_trunks: HashMap<String, SipInboundTrunk>,

    /// Outbound trunks indexed by trunk ID.
    pub outbound_trunks: HashMap<String, SipOutboundTrunk>,

    /// Dispatch rules indexed by rule ID (e.g., "SDR_1").
    pub dispatch_rules: HashMap<String, SipDispatchRule>,

    /// Counter for generated identifiers.
    id_counter: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an inbound trunk to the state.
    pub fn with_inbound_trunk(mut self, trunk: SipInboundTrunk) -> Self {
        self.inbound_trunks.insert(trunk.sip_trunk_id.clone(), trunk);
        self
    }

    /// Add an outbound trunk to the state.
    pub fn with_outbound_trunk(mut self, trunk: SipOutboundTrunk) -> Self {
        self.outbound_trunks
            .insert(trunk.sip_trunk_id.clone(), trunk);
        self
    }

    /// Add a dispatch rule to the state.
    pub fn with_dispatch_rule(mut self, rule: SipDispatchRule) -> Self {
        self.dispatch_rules
            .insert(rule.sip_dispatch_rule_id.clone(), rule);
        self
    }

    /// Generate an identifier with the given prefix.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.id_counter += 1;
        format!("{prefix}_{}", 1000 + self.id_counter)
    }

    /// List inbound trunks, optionally filtered by a served number.
    pub fn list_inbound_trunks(&self, number: Option<&str>) -> Vec<&SipInboundTrunk> {
        let mut trunks: Vec<&SipInboundTrunk> = self
            .inbound_trunks
            .values()
            .filter(|t| number.map(|n| t.numbers.iter().any(|v| v == n)).unwrap_or(true))
            .collect();
        trunks.sort_by(|a, b| a.sip_trunk_id.cmp(&b.sip_trunk_id));
        trunks
    }

    /// List outbound trunks, optionally filtered by an originating number.
    pub fn list_outbound_trunks(&self, number: Option<&str>) -> Vec<&SipOutboundTrunk> {
        let mut trunks: Vec<&SipOutboundTrunk> = self
            .outbound_trunks
            .values()
            .filter(|t| number.map(|n| t.numbers.iter().any(|v| v == n)).unwrap_or(true))
            .collect();
        trunks.sort_by(|a, b| a.sip_trunk_id.cmp(&b.sip_trunk_id));
        trunks
    }

    /// List dispatch rules, optionally filtered by a covered trunk.
    pub fn list_dispatch_rules(&self, trunk_id: Option<&str>) -> Vec<&SipDispatchRule> {
        let mut rules: Vec<&SipDispatchRule> = self
            .dispatch_rules
            .values()
            .filter(|r| {
                trunk_id
                    .map(|id| r.trunk_ids.is_empty() || r.trunk_ids.iter().any(|v| v == id))
                    .unwrap_or(true)
            })
            .collect();
        rules.sort_by(|a, b| a.sip_dispatch_rule_id.cmp(&b.sip_dispatch_rule_id));
        rules
    }

    /// Apply an update action to an inbound trunk.
    pub fn update_inbound_trunk(
        &mut self,
        id: &str,
        action: UpdateAction<SipInboundTrunk, SipInboundTrunkPatch>,
    ) -> Option<&SipInboundTrunk> {
        let existing = self.inbound_trunks.get_mut(id)?;
        match action {
            UpdateAction::Replace(mut replacement) => {
                replacement.sip_trunk_id = id.to_string();
                replacement.created_at = existing.created_at;
                *existing = replacement;
            }
            UpdateAction::Update(patch) => {
                if let Some(name) = patch.name {
                    existing.name = name;
                }
                if let Some(user) = patch.auth_username {
                    existing.auth_username = user;
                }
                if let Some(pass) = patch.auth_password {
                    existing.auth_password = pass;
                }
                if let Some(numbers) = patch.numbers {
                    existing.numbers = numbers.set;
                }
            }
        }
        self.inbound_trunks.get(id)
    }

    /// Apply an update action to an outbound trunk.
    pub fn update_outbound_trunk(
        &mut self,
        id: &str,
        action: UpdateAction<SipOutboundTrunk, SipOutboundTrunkPatch>,
    ) -> Option<&SipOutboundTrunk> {
        let existing = self.outbound_trunks.get_mut(id)?;
        match action {
            UpdateAction::Replace(mut replacement) => {
                replacement.sip_trunk_id = id.to_string();
                replacement.created_at = existing.created_at;
                *existing = replacement;
            }
            UpdateAction::Update(patch) => {
                if let Some(name) = patch.name {
                    existing.name = name;
                }
                if let Some(address) = patch.address {
                    existing.address = address;
                }
                if let Some(transport) = patch.transport {
                    existing.transport = transport;
                }
                if let Some(user) = patch.auth_username {
                    existing.auth_username = user;
                }
                if let Some(pass) = patch.auth_password {
                    existing.auth_password = pass;
                }
                if let Some(numbers) = patch.numbers {
                    existing.numbers = numbers.set;
                }
            }
        }
        self.outbound_trunks.get(id)
    }

    /// Apply an update action to a dispatch rule.
    pub fn update_dispatch_rule(
        &mut self,
        id: &str,
        action: UpdateAction<SipDispatchRule, SipDispatchRulePatch>,
    ) -> Option<&SipDispatchRule> {
        let existing = self.dispatch_rules.get_mut(id)?;
        match action {
            UpdateAction::Replace(mut replacement) => {
                replacement.sip_dispatch_rule_id = id.to_string();
                replacement.created_at = existing.created_at;
                *existing = replacement;
            }
            UpdateAction::Update(patch) => {
                if let Some(name) = patch.name {
                    existing.name = name;
                }
                if let Some(trunk_ids) = patch.trunk_ids {
                    existing.trunk_ids = trunk_ids.set;
                }
            }
        }
        self.dispatch_rules.get(id)
    }
}
