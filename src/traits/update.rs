//! Update trait for mutating resources.

use async_trait::async_trait;

use crate::client::SipClient;
use crate::error::Result;
use crate::update::UpdateAction;

/// Update an existing resource.
///
/// The action is either a full replacement or a sparse patch; see
/// [`crate::update::resolve_update`] for how an invocation picks one.
///
/// # Example
///
/// ```ignore
/// use sipctl::{SipClient, SipInboundTrunk, SipInboundTrunkPatch, Update, UpdateAction};
///
/// let client = SipClient::from_env()?;
/// let updated = SipInboundTrunk::update(
///     &client,
///     "ST_123".to_string(),
///     UpdateAction::Update(SipInboundTrunkPatch {
///         name: Some("front-desk".to_string()),
///         ..Default::default()
///     }),
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this resource.
    type Id;

    /// Full-replacement payload type.
    type Replacement;

    /// Sparse patch type.
    type Patch;

    /// Apply the action and return the updated resource.
    ///
    /// # Arguments
    ///
    /// * `client` - The control-plane client
    /// * `id` - The resource identifier
    /// * `action` - Replace or patch payload
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn update(
        client: &SipClient,
        id: Self::Id,
        action: UpdateAction<Self::Replacement, Self::Patch>,
    ) -> Result<Self>;
}
