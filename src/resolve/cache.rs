/// Pointer-record cache
///
/// Persistent identity -> PointerRecord mapping over the generic datastore.
/// Every call round-trips to the store; there is no in-process layer.
use crate::datastore::Datastore;
use crate::error::{ProfileError, ProfileResult};
use crate::resolve::PointerRecord;
use std::sync::Arc;

/// Key namespace for pointer records in the datastore
const CACHE_KEY_PREFIX: &str = "profile-pointer-cache/";

/// Staleness cache for pointer records
#[derive(Clone)]
pub struct PointerCache {
    store: Arc<dyn Datastore>,
}

impl PointerCache {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    fn key(identity: &str) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, identity)
    }

    /// Look up the last-known pointer record for a peer.
    ///
    /// A missing entry is `None`; an entry that no longer decodes is
    /// `MalformedRecord` (callers may treat that as a miss and fall back to
    /// fresh resolution).
    pub async fn get(&self, identity: &str) -> ProfileResult<Option<PointerRecord>> {
        let bytes = match self.store.get(&Self::key(identity)).await? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let record = serde_cbor::from_slice(&bytes).map_err(|e| {
            ProfileError::MalformedRecord(format!("pointer record for {}: {}", identity, e))
        })?;
        Ok(Some(record))
    }

    /// Store a pointer record, replacing any existing one whole
    pub async fn put(&self, identity: &str, record: &PointerRecord) -> ProfileResult<()> {
        let bytes = serde_cbor::to_vec(record)
            .map_err(|e| ProfileError::Internal(format!("Failed to encode pointer record: {}", e)))?;
        self.store.put(&Self::key(identity), &bytes).await
    }
}
