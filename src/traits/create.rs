//! Create trait for provisioning resources.

use async_trait::async_trait;

use crate::client::SipClient;
use crate::error::Result;

/// Create a new resource from a full description.
///
/// The control plane assigns the canonical identifier; any identifier in
/// the description is ignored.
#[async_trait]
pub trait Create: Sized {
    /// Full resource description submitted on creation.
    type Params;

    /// Create the resource and return the canonical record.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is rejected or the request fails.
    async fn create(client: &SipClient, params: Self::Params) -> Result<Self>;
}
