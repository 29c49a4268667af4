/// Profile resolution service
///
/// Answers "give me this peer's current profile" with a
/// stale-while-revalidate policy over cached pointer records:
///
/// - no record (or caching disabled): full fresh resolution, then store a
///   new pointer record in the background
/// - fresh record: direct fetch at the known root, plus a fire-and-forget
///   full re-resolution to pre-warm the pointer for the next call, plus a
///   background validity re-stamp (sliding expiration)
/// - stale record: same as no record
///
/// Concurrent requests for the same identity are not serialized; the
/// datastore's last writer wins, which at worst leaves a slightly less-fresh
/// expiry stamp.
use crate::error::ProfileResult;
use crate::profile::validate::{field_errors_to_error, validate};
use crate::profile::Profile;
use crate::resolve::{PointerCache, PointerRecord, ProfileFetcher};
use crate::tasks::TaskQueue;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::debug;

pub struct ProfileResolutionService {
    fetcher: ProfileFetcher,
    cache: PointerCache,
    tasks: Arc<TaskQueue>,
    record_lifetime: Duration,
}

impl ProfileResolutionService {
    pub fn new(fetcher: ProfileFetcher, cache: PointerCache, tasks: Arc<TaskQueue>) -> Self {
        Self {
            fetcher,
            cache,
            tasks,
            record_lifetime: Duration::days(7),
        }
    }

    /// Override the validity lifetime granted on every stamp
    pub fn with_record_lifetime(mut self, lifetime: Duration) -> Self {
        self.record_lifetime = lifetime;
        self
    }

    /// Resolve `identity` to its current profile.
    ///
    /// With `use_cache` set, a fresh pointer record serves the profile
    /// directly from its known root; a stale or missing record forces a full
    /// fresh resolution. Without it, no pointer record is read or written.
    ///
    /// The returned profile has passed validation; background side effects
    /// are already scheduled by the time a validation failure is surfaced.
    pub async fn fetch_profile(&self, identity: &str, use_cache: bool) -> ProfileResult<Profile> {
        let profile = if use_cache {
            self.fetch_with_cache(identity).await?
        } else {
            self.fetcher.fetch_at(identity, "").await?.profile
        };

        if let Err(errors) = validate(&profile) {
            return Err(field_errors_to_error(errors));
        }
        Ok(profile)
    }

    async fn fetch_with_cache(&self, identity: &str) -> ProfileResult<Profile> {
        let record = self.cache.get(identity).await?;

        match record {
            Some(record) if !record.is_stale(Utc::now()) => {
                debug!("Serving profile for {} from known root {}", identity, record.value);
                let fetched = self.fetcher.fetch_at(identity, &record.value).await?;

                // Pre-warm the pointer for the next call; the result is
                // discarded here.
                self.spawn_prewarm(identity);
                // Sliding expiration even on fast-path hits
                self.spawn_restamp(identity, record);

                Ok(fetched.profile)
            }
            record => {
                if record.is_some() {
                    debug!("Pointer record for {} is stale, re-resolving", identity);
                }
                let fetched = self.fetcher.fetch_at(identity, "").await?;
                self.spawn_stamp_new(identity, fetched.root.clone());
                Ok(fetched.profile)
            }
        }
    }

    /// Fire-and-forget full re-resolution so the next request finds the
    /// latest pointer already in the transport layer.
    fn spawn_prewarm(&self, identity: &str) {
        let fetcher = self.fetcher.clone();
        let identity = identity.to_string();
        self.tasks.spawn("pointer-prewarm", async move {
            fetcher.fetch_at(&identity, "").await?;
            Ok(())
        });
    }

    /// Extend the served record's validity by the fixed lifetime from now,
    /// preserving its content root.
    fn spawn_restamp(&self, identity: &str, mut record: PointerRecord) {
        let cache = self.cache.clone();
        let identity = identity.to_string();
        let lifetime = self.record_lifetime;
        self.tasks.spawn("pointer-restamp", async move {
            record.validity = (Utc::now() + lifetime).to_rfc3339();
            cache.put(&identity, &record).await
        });
    }

    /// Store a brand-new record pointing at a just-resolved root.
    fn spawn_stamp_new(&self, identity: &str, root: String) {
        let cache = self.cache.clone();
        let identity = identity.to_string();
        let lifetime = self.record_lifetime;
        self.tasks.spawn("pointer-stamp", async move {
            let record = PointerRecord::eol_bounded(root, Utc::now() + lifetime);
            cache.put(&identity, &record).await
        });
    }
}
