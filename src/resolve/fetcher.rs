/// Raw profile retrieval from the content-addressed network
use crate::error::{ProfileError, ProfileResult};
use crate::network::ContentNetwork;
use crate::profile::Profile;
use std::sync::Arc;

/// A fetched profile together with the content root it was read from
#[derive(Debug, Clone)]
pub struct FetchedProfile {
    pub profile: Profile,
    pub root: String,
}

/// Fetches and parses profile documents; field constraints are the
/// validator's job, invoked by the resolution service.
#[derive(Clone)]
pub struct ProfileFetcher {
    network: Arc<dyn ContentNetwork>,
}

impl ProfileFetcher {
    pub fn new(network: Arc<dyn ContentNetwork>) -> Self {
        Self { network }
    }

    /// Fetch a peer's profile.
    ///
    /// With an empty `known_root` the identity is resolved first; otherwise
    /// the profile is read directly under the given root (the fast path for
    /// roots the transport has already seen).
    pub async fn fetch_at(&self, identity: &str, known_root: &str) -> ProfileResult<FetchedProfile> {
        let root = if known_root.is_empty() {
            self.network
                .resolve_identity(identity)
                .await
                .map_err(|e| ProfileError::Resolution(format!("{}: {}", identity, e)))?
        } else {
            known_root.to_string()
        };
        if root.is_empty() {
            return Err(ProfileError::Resolution(format!(
                "empty content root for {}",
                identity
            )));
        }

        let path = format!("{}/profile", root);
        let bytes = self
            .network
            .fetch_content(&path)
            .await
            .map_err(|e| ProfileError::Fetch(format!("{}: {}", path, e)))?;
        if bytes.is_empty() {
            return Err(ProfileError::Fetch(format!("no content at {}", path)));
        }

        let profile = serde_json::from_slice(&bytes)
            .map_err(|e| ProfileError::Parse(format!("profile at {}: {}", path, e)))?;

        Ok(FetchedProfile { profile, root })
    }
}
