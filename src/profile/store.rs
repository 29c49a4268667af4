/// Local profile store
///
/// Reads and writes the node's own canonical profile document at
/// `<repo>/root/profile`, stamping wallet- and identity-derived fields and
/// validating before anything is persisted.
use crate::error::{ProfileError, ProfileResult};
use crate::profile::validate::{field_errors_to_error, validate};
use crate::profile::{Profile, ProfileStats};
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Wallet key-derivation boundary
pub trait Wallet: Send + Sync {
    /// Hex-encoded compressed master public key
    fn public_key_hex(&self) -> String;

    /// Wallet currency code, e.g. "btc"
    fn currency_code(&self) -> String;
}

/// Local listing/follower/following counters
pub trait NodeCounters: Send + Sync {
    fn listing_count(&self) -> u32;
    fn follower_count(&self) -> u32;
    fn following_count(&self) -> u32;
}

/// Store for the node's own canonical profile
pub struct LocalProfileStore {
    repo_path: PathBuf,
    peer_id: String,
    wallet: Arc<dyn Wallet>,
    counters: Arc<dyn NodeCounters>,
}

impl LocalProfileStore {
    pub fn new(
        repo_path: PathBuf,
        peer_id: String,
        wallet: Arc<dyn Wallet>,
        counters: Arc<dyn NodeCounters>,
    ) -> Self {
        Self {
            repo_path,
            peer_id,
            wallet,
            counters,
        }
    }

    fn profile_path(&self) -> PathBuf {
        self.repo_path.join("root").join("profile")
    }

    /// Read the canonical local profile.
    ///
    /// Absence is `NotFound`, not a generic IO error; callers treat it as
    /// "no profile yet".
    pub async fn read(&self) -> ProfileResult<Profile> {
        let bytes = self.read_bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProfileError::Parse(format!("Invalid profile document: {}", e)))
    }

    /// Read the stored document as a generic keyed structure, numbers
    /// preserved. Used by the patch merger.
    pub async fn read_document(&self) -> ProfileResult<Value> {
        let bytes = self.read_bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProfileError::Parse(format!("Invalid profile document: {}", e)))
    }

    async fn read_bytes(&self) -> ProfileResult<Vec<u8>> {
        match fs::read(self.profile_path()).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ProfileError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Stamp derived fields, validate, and persist the profile atomically.
    pub async fn write(&self, mut profile: Profile) -> ProfileResult<()> {
        profile.bitcoin_pubkey = self.wallet.public_key_hex();
        profile.peer_id = self.peer_id.clone();
        if let Some(info) = profile.moderator_info.as_mut() {
            info.accepted_currency = self.wallet.currency_code().to_uppercase();
        }

        if let Err(errors) = validate(&profile) {
            return Err(field_errors_to_error(errors));
        }

        let out = serde_json::to_string_pretty(&profile)
            .map_err(|e| ProfileError::Internal(format!("Failed to serialize profile: {}", e)))?;

        let path = self.profile_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // temp file + rename so a crash never leaves a truncated document
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, out.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;

        debug!("Wrote profile for {}", self.peer_id);
        Ok(())
    }

    /// Recompute derived counters and stamp the modification time.
    ///
    /// No-op when no profile has been published yet.
    pub async fn refresh_derived_counts(&self) -> ProfileResult<()> {
        let mut profile = match self.read().await {
            Ok(profile) => profile,
            Err(ProfileError::NotFound) => return Ok(()),
            Err(e) => return Err(e),
        };

        let stats = profile.stats.get_or_insert_with(ProfileStats::default);
        stats.listing_count = self.counters.listing_count();
        stats.follower_count = self.counters.follower_count();
        stats.following_count = self.counters.following_count();
        profile.last_modified = Some(Utc::now());

        self.write(profile).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::profile::ModeratorInfo;
    use tempfile::TempDir;

    pub(crate) struct MockWallet;

    impl Wallet for MockWallet {
        fn public_key_hex(&self) -> String {
            "02a1633cafcc01ebfb6d78e39f687a1f0995c62fc95f51ead10a02ee0be551b5dc".to_string()
        }

        fn currency_code(&self) -> String {
            "btc".to_string()
        }
    }

    pub(crate) struct MockCounters {
        pub listings: u32,
        pub followers: u32,
        pub following: u32,
    }

    impl NodeCounters for MockCounters {
        fn listing_count(&self) -> u32 {
            self.listings
        }

        fn follower_count(&self) -> u32 {
            self.followers
        }

        fn following_count(&self) -> u32 {
            self.following
        }
    }

    pub(crate) fn create_test_store(dir: &TempDir) -> LocalProfileStore {
        LocalProfileStore::new(
            dir.path().to_path_buf(),
            "QmLocalPeer".to_string(),
            Arc::new(MockWallet),
            Arc::new(MockCounters {
                listings: 4,
                followers: 11,
                following: 2,
            }),
        )
    }

    #[tokio::test]
    async fn test_read_without_profile_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        assert!(matches!(store.read().await, Err(ProfileError::NotFound)));
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        let profile = Profile {
            name: "Brixton Village".to_string(),
            handle: "brixton".to_string(),
            location: "London".to_string(),
            vendor: true,
            ..Default::default()
        };
        store.write(profile.clone()).await.unwrap();

        let read_back = store.read().await.unwrap();
        assert_eq!(read_back.name, profile.name);
        assert_eq!(read_back.handle, profile.handle);
        assert_eq!(read_back.location, profile.location);
        assert_eq!(read_back.vendor, profile.vendor);

        // Stamped fields
        assert_eq!(read_back.peer_id, "QmLocalPeer");
        assert_eq!(read_back.bitcoin_pubkey, MockWallet.public_key_hex());
    }

    #[tokio::test]
    async fn test_write_stamps_moderator_currency_uppercased() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        let profile = Profile {
            name: "Mod".to_string(),
            moderator: true,
            moderator_info: Some(ModeratorInfo::default()),
            ..Default::default()
        };
        store.write(profile).await.unwrap();

        let read_back = store.read().await.unwrap();
        assert_eq!(
            read_back.moderator_info.unwrap().accepted_currency,
            "BTC"
        );
    }

    #[tokio::test]
    async fn test_write_invalid_profile_aborts() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        let profile = Profile {
            name: String::new(),
            ..Default::default()
        };
        let result = store.write(profile).await;
        assert!(matches!(result, Err(ProfileError::Validation(_))));

        // Nothing was persisted
        assert!(matches!(store.read().await, Err(ProfileError::NotFound)));
    }

    #[tokio::test]
    async fn test_refresh_counts_without_profile_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        store.refresh_derived_counts().await.unwrap();
        assert!(matches!(store.read().await, Err(ProfileError::NotFound)));
    }

    #[tokio::test]
    async fn test_refresh_counts_stamps_stats_and_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store(&dir);

        let profile = Profile {
            name: "Johari".to_string(),
            ..Default::default()
        };
        store.write(profile).await.unwrap();

        store.refresh_derived_counts().await.unwrap();

        let read_back = store.read().await.unwrap();
        let stats = read_back.stats.unwrap();
        assert_eq!(stats.listing_count, 4);
        assert_eq!(stats.follower_count, 11);
        assert_eq!(stats.following_count, 2);
        assert!(read_back.last_modified.is_some());
    }
}
