/// Peer profile resolution
///
/// Resolves a peer identity to its published profile through the
/// content-addressed network, with a persistent, staleness-managed pointer
/// cache in front of full identity resolution.
pub mod cache;
pub mod fetcher;
pub mod service;

pub use cache::PointerCache;
pub use fetcher::{FetchedProfile, ProfileFetcher};
pub use service::ProfileResolutionService;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the `validity` field of a pointer record is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidityType {
    /// `validity` is an RFC3339 end-of-life timestamp
    Eol,
    /// No expiry; the record is never time-stale
    Unbounded,
}

/// Last-known pointer to a peer's content root, with expiry metadata.
///
/// These records come from externally-signed resolution results; the core
/// only caches and re-stamps them, it never verifies signatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerRecord {
    /// Content root the peer's profile was last served from
    pub value: String,
    #[serde(rename = "validityType")]
    pub validity_type: ValidityType,
    /// RFC3339 end-of-life timestamp when `validity_type` is `Eol`
    pub validity: String,
}

impl PointerRecord {
    /// Build an EOL-bounded record expiring at `eol`
    pub fn eol_bounded(value: impl Into<String>, eol: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            validity_type: ValidityType::Eol,
            validity: eol.to_rfc3339(),
        }
    }

    /// End-of-life time, if the record carries a parseable one
    pub fn eol(&self) -> Option<DateTime<Utc>> {
        if self.validity_type != ValidityType::Eol {
            return None;
        }
        DateTime::parse_from_rfc3339(&self.validity)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// A record is stale iff it is EOL-bounded and its EOL has passed.
    /// Records without a (parseable) expiry are never time-stale.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.eol() {
            Some(eol) => eol < now,
            None => false,
        }
    }
}
