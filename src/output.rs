//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization, plus the helpers list
//! commands use to render sensitive and map-valued fields.

use std::collections::HashMap;

use crate::models::{SipDispatchRule, SipInboundTrunk, SipOutboundTrunk, SipParticipant};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Render an auth pair with the password masked.
///
/// Returns an empty string when no credentials are configured.
pub fn mask_auth(user: &str, has_pass: bool) -> String {
    if user.is_empty() && !has_pass {
        return String::new();
    }
    let pass = if has_pass { "****" } else { "" };
    format!("{user} / {pass}")
}

/// Render a header map as sorted `key=value` lines.
pub fn format_headers(headers: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = headers.keys().collect();
    keys.sort();
    keys.iter()
        .map(|k| format!("{k}={}", headers[*k]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render several header maps, blank-line separated, skipping empty ones.
pub fn format_header_maps(maps: &[&HashMap<String, String>]) -> String {
    maps.iter()
        .map(|m| format_headers(m))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl PrettyPrint for SipInboundTrunk {
    fn pretty_print(&self) -> String {
        let header = format!("Inbound Trunk: {}", self.sip_trunk_id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Name:           {}", self.name)];

        if !self.numbers.is_empty() {
            lines.push(format!("Numbers:        {}", self.numbers.join(",")));
        }
        if !self.allowed_addresses.is_empty() {
            lines.push(format!(
                "Allowed Addrs:  {}",
                self.allowed_addresses.join(",")
            ));
        }
        if !self.allowed_numbers.is_empty() {
            lines.push(format!(
                "Allowed Nums:   {}",
                self.allowed_numbers.join(",")
            ));
        }

        let auth = mask_auth(&self.auth_username, !self.auth_password.is_empty());
        if !auth.is_empty() {
            lines.push(format!("Authentication: {auth}"));
        }

        lines.push(format!(
            "Encryption:     {}",
            self.media_encryption.short_name()
        ));

        let headers = format_header_maps(&[&self.headers, &self.headers_to_attributes]);
        if !headers.is_empty() {
            lines.push(format!("Headers:\n{headers}"));
        }

        if !self.metadata.is_empty() {
            lines.push(format!("Metadata:       {}", self.metadata));
        }
        if let Some(ref created) = self.created_at {
            lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for SipOutboundTrunk {
    fn pretty_print(&self) -> String {
        let header = format!("Outbound Trunk: {}", self.sip_trunk_id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.name),
            format!("Address:        {}", self.address),
            format!("Transport:      {}", self.transport.short_name()),
        ];

        if !self.numbers.is_empty() {
            lines.push(format!("Numbers:        {}", self.numbers.join(",")));
        }

        let auth = mask_auth(&self.auth_username, !self.auth_password.is_empty());
        if !auth.is_empty() {
            lines.push(format!("Authentication: {auth}"));
        }

        lines.push(format!(
            "Encryption:     {}",
            self.media_encryption.short_name()
        ));

        let headers = format_header_maps(&[&self.headers, &self.headers_to_attributes]);
        if !headers.is_empty() {
            lines.push(format!("Headers:\n{headers}"));
        }

        if !self.metadata.is_empty() {
            lines.push(format!("Metadata:       {}", self.metadata));
        }
        if let Some(ref created) = self.created_at {
            lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for SipDispatchRule {
    fn pretty_print(&self) -> String {
        let header = format!("Dispatch Rule: {}", self.sip_dispatch_rule_id);
        let divider = "─".repeat(header.len().max(30));

        let trunks = if self.trunk_ids.is_empty() {
            "<any>".to_string()
        } else {
            self.trunk_ids.join(",")
        };

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.name),
            format!("Trunks:         {trunks}"),
            format!("Type:           {}", self.rule_kind()),
            format!("Room:           {}", self.room_pattern()),
        ];

        if !self.pin().is_empty() {
            lines.push(format!("Pin:            {}", self.pin()));
        }

        let agents = self.agent_names();
        if !agents.is_empty() {
            lines.push(format!("Agents:         {}", agents.join(",")));
        }

        if !self.metadata.is_empty() {
            lines.push(format!("Metadata:       {}", self.metadata));
        }
        if let Some(ref created) = self.created_at {
            lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for SipParticipant {
    fn pretty_print(&self) -> String {
        [
            format!("SIPCallID: {}", self.sip_call_id),
            format!("ParticipantID: {}", self.participant_id),
            format!("ParticipantIdentity: {}", self.participant_identity),
            format!("RoomName: {}", self.room_name),
        ]
        .join("\n")
    }
}
