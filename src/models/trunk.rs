//! SIP trunk models and trait implementations.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::SipClient;
use crate::error::{Result, SipError};
use crate::pagination::Page;
use crate::traits::{Create, Delete, List, Update};
use crate::update::{ListUpdate, ReplacePayload, UpdateAction};

/// Transport protocol used to reach a SIP endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SipTransport {
    /// Let the trunk negotiate the transport.
    #[default]
    #[serde(rename = "SIP_TRANSPORT_AUTO")]
    Auto,
    #[serde(rename = "SIP_TRANSPORT_UDP")]
    Udp,
    #[serde(rename = "SIP_TRANSPORT_TCP")]
    Tcp,
    #[serde(rename = "SIP_TRANSPORT_TLS")]
    Tls,
}

impl SipTransport {
    /// The fully qualified enumeration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "SIP_TRANSPORT_AUTO",
            Self::Udp => "SIP_TRANSPORT_UDP",
            Self::Tcp => "SIP_TRANSPORT_TCP",
            Self::Tls => "SIP_TRANSPORT_TLS",
        }
    }

    /// The name without the `SIP_TRANSPORT_` prefix, for display.
    pub fn short_name(&self) -> &'static str {
        self.as_str().trim_start_matches("SIP_TRANSPORT_")
    }

    fn is_auto(&self) -> bool {
        *self == Self::Auto
    }
}

impl std::fmt::Display for SipTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SipTransport {
    type Err = SipError;

    /// Parse a transport name, accepting short (`tcp`) and fully qualified
    /// (`SIP_TRANSPORT_TCP`) forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let mut name = s.to_ascii_uppercase();
        if !name.starts_with("SIP_TRANSPORT_") {
            name = format!("SIP_TRANSPORT_{name}");
        }
        match name.as_str() {
            "SIP_TRANSPORT_AUTO" => Ok(Self::Auto),
            "SIP_TRANSPORT_UDP" => Ok(Self::Udp),
            "SIP_TRANSPORT_TCP" => Ok(Self::Tcp),
            "SIP_TRANSPORT_TLS" => Ok(Self::Tls),
            _ => Err(SipError::InvalidInput(format!(
                "unsupported transport: {name:?}"
            ))),
        }
    }
}

/// Media encryption policy for a trunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SipMediaEncryption {
    #[default]
    #[serde(rename = "SIP_MEDIA_ENCRYPT_DISABLE")]
    Disable,
    #[serde(rename = "SIP_MEDIA_ENCRYPT_ALLOW")]
    Allow,
    #[serde(rename = "SIP_MEDIA_ENCRYPT_REQUIRE")]
    Require,
}

impl SipMediaEncryption {
    /// The name without the `SIP_MEDIA_ENCRYPT_` prefix, for display.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Disable => "DISABLE",
            Self::Allow => "ALLOW",
            Self::Require => "REQUIRE",
        }
    }

    fn is_disable(&self) -> bool {
        *self == Self::Disable
    }
}

/// A trunk accepting calls from a carrier into the control plane.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SipInboundTrunk {
    /// Canonical identifier, assigned by the control plane. Cleared before
    /// the record is submitted as a replacement payload.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sip_trunk_id: String,

    /// Human-readable trunk name.
    #[serde(default)]
    pub name: String,

    /// Phone numbers associated with the trunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numbers: Vec<String>,

    /// Source addresses allowed to send calls over this trunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_addresses: Vec<String>,

    /// Caller numbers allowed on this trunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_numbers: Vec<String>,

    /// Username the carrier authenticates with.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_username: String,

    /// Password the carrier authenticates with.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_password: String,

    #[serde(default, skip_serializing_if = "SipMediaEncryption::is_disable")]
    pub media_encryption: SipMediaEncryption,

    /// SIP headers added to every call on this trunk.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// SIP headers mapped to participant attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers_to_attributes: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,

    /// When the trunk was provisioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A trunk for placing calls out through a carrier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SipOutboundTrunk {
    /// Canonical identifier, assigned by the control plane. Cleared before
    /// the record is submitted as a replacement payload.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sip_trunk_id: String,

    /// Human-readable trunk name.
    #[serde(default)]
    pub name: String,

    /// Destination address calls are sent to.
    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "SipTransport::is_auto")]
    pub transport: SipTransport,

    /// Phone numbers calls may originate from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numbers: Vec<String>,

    /// Username used to authenticate with the carrier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_username: String,

    /// Password used to authenticate with the carrier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_password: String,

    #[serde(default, skip_serializing_if = "SipMediaEncryption::is_disable")]
    pub media_encryption: SipMediaEncryption,

    /// SIP headers added to every call on this trunk.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// SIP headers mapped to participant attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers_to_attributes: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,

    /// When the trunk was provisioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReplacePayload for SipInboundTrunk {
    fn take_id(&mut self) -> String {
        std::mem::take(&mut self.sip_trunk_id)
    }
}

impl ReplacePayload for SipOutboundTrunk {
    fn take_id(&mut self) -> String {
        std::mem::take(&mut self.sip_trunk_id)
    }
}

/// Sparse patch for an inbound trunk. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SipInboundTrunkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers: Option<ListUpdate>,
}

/// Sparse patch for an outbound trunk. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SipOutboundTrunkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<SipTransport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers: Option<ListUpdate>,
}

/// Query parameters for listing trunks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrunkListQuery {
    /// Only return trunks serving this phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// API response wrapper for listing trunks.
#[derive(Debug, Deserialize)]
struct TrunkListResponse<T> {
    items: Vec<T>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Serialize)]
struct ListRequestParams<'a> {
    #[serde(flatten)]
    query: &'a TrunkListQuery,
    page: u32,
    count: u32,
}

#[async_trait]
impl List for SipInboundTrunk {
    type Query = TrunkListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &SipClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let params = ListRequestParams { query, page, count };

        let response = client.get_with_query("sip/inbound-trunks", &params).await?;
        let data: TrunkListResponse<Self> = response.json().await.map_err(SipError::Http)?;

        Ok(Page::new(data.items, page, count, data.total))
    }
}

#[async_trait]
impl Create for SipInboundTrunk {
    type Params = SipInboundTrunk;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &SipClient, params: Self::Params) -> Result<Self> {
        let response = client.post("sip/inbound-trunks", &params).await?;
        let trunk: Self = response.json().await.map_err(SipError::Http)?;
        Ok(trunk)
    }
}

#[async_trait]
impl Update for SipInboundTrunk {
    type Id = String;
    type Replacement = SipInboundTrunk;
    type Patch = SipInboundTrunkPatch;

    #[tracing::instrument(skip(client, action))]
    async fn update(
        client: &SipClient,
        id: String,
        action: UpdateAction<Self::Replacement, Self::Patch>,
    ) -> Result<Self> {
        let path = format!("sip/inbound-trunks/{}", urlencoding::encode(&id));

        let response = client.put(&path, &action).await?;
        let trunk: Self = response.json().await.map_err(SipError::Http)?;
        Ok(trunk)
    }
}

#[async_trait]
impl Delete for SipInboundTrunk {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &SipClient, id: String) -> Result<Self> {
        // Trunk deletion is a single endpoint shared by both kinds.
        let path = format!("sip/trunks/{}", urlencoding::encode(&id));

        let response = client.delete(&path).await?;
        let trunk: Self = response.json().await.map_err(SipError::Http)?;
        Ok(trunk)
    }
}

#[async_trait]
impl List for SipOutboundTrunk {
    type Query = TrunkListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &SipClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let params = ListRequestParams { query, page, count };

        let response = client
            .get_with_query("sip/outbound-trunks", &params)
            .await?;
        let data: TrunkListResponse<Self> = response.json().await.map_err(SipError::Http)?;

        Ok(Page::new(data.items, page, count, data.total))
    }
}

#[async_trait]
impl Create for SipOutboundTrunk {
    type Params = SipOutboundTrunk;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &SipClient, params: Self::Params) -> Result<Self> {
        let response = client.post("sip/outbound-trunks", &params).await?;
        let trunk: Self = response.json().await.map_err(SipError::Http)?;
        Ok(trunk)
    }
}

#[async_trait]
impl Update for SipOutboundTrunk {
    type Id = String;
    type Replacement = SipOutboundTrunk;
    type Patch = SipOutboundTrunkPatch;

    #[tracing::instrument(skip(client, action))]
    async fn update(
        client: &SipClient,
        id: String,
        action: UpdateAction<Self::Replacement, Self::Patch>,
    ) -> Result<Self> {
        let path = format!("sip/outbound-trunks/{}", urlencoding::encode(&id));

        let response = client.put(&path, &action).await?;
        let trunk: Self = response.json().await.map_err(SipError::Http)?;
        Ok(trunk)
    }
}

#[async_trait]
impl Delete for SipOutboundTrunk {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &SipClient, id: String) -> Result<Self> {
        let path = format!("sip/trunks/{}", urlencoding::encode(&id));

        let response = client.delete(&path).await?;
        let trunk: Self = response.json().await.map_err(SipError::Http)?;
        Ok(trunk)
    }
}
