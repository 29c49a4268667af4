/// Partial profile updates
///
/// Applies an incomplete profile document over the stored one: the moderator
/// toggle fires its registration side effect first, then every stored key
/// missing from the patch is backfilled recursively, and the merged document
/// re-enters the normal write path (validation included).
use crate::error::{ProfileError, ProfileResult};
use crate::profile::store::LocalProfileStore;
use crate::profile::Profile;
use async_trait::async_trait;
use serde_json::map::Entry;
use serde_json::Value;
use std::sync::Arc;

/// Moderator-registration boundary
#[async_trait]
pub trait ModeratorRegistry: Send + Sync {
    /// Register this node as a moderator on the network
    async fn enable(&self) -> ProfileResult<()>;

    /// Deregister this node as a moderator
    async fn disable(&self) -> ProfileResult<()>;
}

/// Merges partial update documents into the stored profile
pub struct PatchMerger {
    store: Arc<LocalProfileStore>,
    registry: Arc<dyn ModeratorRegistry>,
}

impl PatchMerger {
    pub fn new(store: Arc<LocalProfileStore>, registry: Arc<dyn ModeratorRegistry>) -> Self {
        Self { store, registry }
    }

    /// Apply a partial profile document over the stored one.
    ///
    /// A moderator-toggle side-effect failure aborts the whole operation;
    /// nothing is merged or written in that case.
    pub async fn apply(&self, mut patch: Value) -> ProfileResult<()> {
        let stored = self.store.read_document().await?;

        self.toggle_moderator(&patch, &stored).await?;

        merge_missing(&mut patch, &stored);

        let profile: Profile = serde_json::from_value(patch)
            .map_err(|e| ProfileError::Parse(format!("Merged profile does not decode: {}", e)))?;
        self.store.write(profile).await
    }

    /// Register or deregister as moderator when the patch flips the boolean.
    async fn toggle_moderator(&self, patch: &Value, stored: &Value) -> ProfileResult<()> {
        let (patched, current) = match (patch.get("moderator"), stored.get("moderator")) {
            (Some(p), Some(s)) => (p, s),
            _ => return Ok(()),
        };

        let patched = patched
            .as_bool()
            .ok_or_else(|| ProfileError::Validation("moderator must be a boolean".to_string()))?;
        let current = current
            .as_bool()
            .ok_or_else(|| ProfileError::Validation("moderator must be a boolean".to_string()))?;

        if patched == current {
            return Ok(());
        }
        if patched {
            self.registry.enable().await
        } else {
            self.registry.disable().await
        }
    }
}

/// Copy keys present in `stored` but absent from `patch` into `patch`,
/// recursing through nested mappings. Patch values win on conflict.
fn merge_missing(patch: &mut Value, stored: &Value) {
    if let (Value::Object(patch_map), Value::Object(stored_map)) = (patch, stored) {
        for (key, stored_value) in stored_map {
            match patch_map.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(stored_value.clone());
                }
                Entry::Occupied(mut slot) => merge_missing(slot.get_mut(), stored_value),
            }
        }
    }
}
