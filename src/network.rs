/// Content-addressed network boundary
///
/// The distributed resolution protocol and transport live behind this trait;
/// the core only consumes their results.
use crate::error::ProfileResult;
use async_trait::async_trait;

/// Resolve-and-fetch primitives of the content-addressed network
#[async_trait]
pub trait ContentNetwork: Send + Sync {
    /// Resolve a peer identity to the content root of its current
    /// published tree
    async fn resolve_identity(&self, identity: &str) -> ProfileResult<String>;

    /// Fetch the raw bytes stored at a content path
    async fn fetch_content(&self, path: &str) -> ProfileResult<Vec<u8>>;
}
