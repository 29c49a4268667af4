//! Agora Profile
//!
//! Peer-profile subsystem for a content-addressed marketplace node: resolves
//! and caches counterparty profiles with staleness-managed pointer records,
//! validates profile documents before they are trusted, and maintains the
//! node's own canonical profile (including partial-update merges).
//!
//! The distributed resolution protocol, wallet cryptography, and transport
//! layer are collaborators consumed through the traits in [`network`],
//! [`datastore`], [`profile::store`], and [`profile::patch`].

pub mod config;
pub mod datastore;
pub mod error;
pub mod network;
pub mod profile;
pub mod resolve;
pub mod tasks;

pub use config::ProfileConfig;
pub use error::{ProfileError, ProfileResult};
pub use profile::{LocalProfileStore, PatchMerger, Profile};
pub use resolve::{PointerCache, PointerRecord, ProfileResolutionService};
