//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{
    DispatchRule, SipDispatchRule, SipInboundTrunk, SipOutboundTrunk, SipTransport,
};

/// Number the mock control plane always answers as busy (SIP 486).
pub const BUSY_NUMBER: &str = "+15005550486";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Trunk Fixtures
    // =========================================================================

    /// Create a minimal inbound trunk.
    pub fn inbound_trunk(id: &str, name: &str, numbers: &[&str]) -> SipInboundTrunk {
        SipInboundTrunk {
            sip_trunk_id: id.to_string(),
            name: name.to_string(),
            numbers: numbers.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Create an inbound trunk requiring carrier authentication.
    pub fn authenticated_inbound_trunk(id: &str, name: &str, user: &str) -> SipInboundTrunk {
        let mut trunk = Self::inbound_trunk(id, name, &[]);
        trunk.auth_username = user.to_string();
        trunk.auth_password = "secret".to_string();
        trunk
    }

    /// Create a minimal outbound trunk.
    pub fn outbound_trunk(id: &str, name: &str, address: &str) -> SipOutboundTrunk {
        SipOutboundTrunk {
            sip_trunk_id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            transport: SipTransport::Udp,
            numbers: vec!["+15105550100".to_string()],
            ..Default::default()
        }
    }

    // =========================================================================
    // Dispatch Rule Fixtures
    // =========================================================================

    /// Create a direct dispatch rule routing every caller to one room.
    pub fn direct_rule(id: &str, name: &str, room: &str) -> SipDispatchRule {
        SipDispatchRule {
            sip_dispatch_rule_id: id.to_string(),
            name: name.to_string(),
            rule: Some(DispatchRule::DispatchRuleDirect {
                room_name: room.to_string(),
                pin: String::new(),
            }),
            ..Default::default()
        }
    }

    /// Create a caller-scoped dispatch rule bound to specific trunks.
    pub fn individual_rule(id: &str, name: &str, prefix: &str, trunks: &[&str]) -> SipDispatchRule {
        SipDispatchRule {
            sip_dispatch_rule_id: id.to_string(),
            name: name.to_string(),
            trunk_ids: trunks.iter().map(|t| t.to_string()).collect(),
            rule: Some(DispatchRule::DispatchRuleIndividual {
                room_prefix: prefix.to_string(),
                pin: String::new(),
            }),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The default data a freshly started mock server serves.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            inbound_trunks: vec![
                Self::inbound_trunk("ST_1", "front-desk", &["+15105550100"]),
                Self::authenticated_inbound_trunk("ST_2", "carrier-a", "carrier"),
            ],
            outbound_trunks: vec![Self::outbound_trunk(
                "ST_3",
                "dialer",
                "sip.carrier.example.com",
            )],
            dispatch_rules: vec![
                Self::direct_rule("SDR_1", "lobby", "lobby"),
                Self::individual_rule("SDR_2", "support", "support", &["ST_1"]),
            ],
        }
    }
}

/// A bundle of fixtures used to seed server state.
pub struct DefaultScenario {
    pub inbound_trunks: Vec<SipInboundTrunk>,
    pub outbound_trunks: Vec<SipOutboundTrunk>,
    pub dispatch_rules: Vec<SipDispatchRule>,
}
