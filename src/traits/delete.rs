//! Delete trait for removing resources.

use async_trait::async_trait;

use crate::client::SipClient;
use crate::error::Result;

/// Delete a resource by ID.
///
/// Returns the record as it was at deletion time, so callers can report
/// what was removed.
#[async_trait]
pub trait Delete: Sized {
    /// The ID type for this resource.
    type Id;

    /// Delete the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn delete(client: &SipClient, id: Self::Id) -> Result<Self>;
}
