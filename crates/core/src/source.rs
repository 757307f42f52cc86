//! The capability the display layer needs from persistence.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::image_resolution::OwnerDisplayData;
use crate::images::OwnerRef;

/// Loads everything needed to resolve one owner's display images.
///
/// Implemented over the database in `brushlog-db`; tests use in-memory
/// implementations.
#[async_trait]
pub trait ImageOwnerSource: Send + Sync {
    /// Fetch the owner, its image records and its parent-game fallbacks in
    /// one call.
    ///
    /// Returns `Ok(None)` when the owner does not exist.
    async fn fetch_owner_with_images(
        &self,
        owner: OwnerRef,
    ) -> Result<Option<OwnerDisplayData>, CoreError>;
}
