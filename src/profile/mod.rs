/// Peer profile data model
///
/// The self-published document every node serves under `root/profile` in its
/// content tree. Serialized as JSON with camelCase field names, enumerations
/// as names, and every field emitted even at its default value, so two nodes
/// always produce the same bytes for the same document.
pub mod patch;
pub mod store;
pub mod validate;

pub use patch::{ModeratorRegistry, PatchMerger};
pub use store::{LocalProfileStore, NodeCounters, Wallet};
pub use validate::{validate, FieldError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum characters for short word-like fields (handle, name, location)
pub const WORD_MAX_CHARACTERS: usize = 70;
/// Maximum characters for one-line fields (email)
pub const SENTENCE_MAX_CHARACTERS: usize = 140;
/// Maximum characters for the about section and moderator description
pub const ABOUT_MAX_CHARACTERS: usize = 10_000;
/// Maximum characters for the short description
pub const SHORT_DESCRIPTION_LENGTH: usize = 160;
/// Maximum characters for URLs (website, social proofs)
pub const URL_MAX_CHARACTERS: usize = 2_000;
/// Maximum characters for terms and conditions
pub const POLICY_MAX_CHARACTERS: usize = 10_000;
/// Maximum entries in list fields (social accounts, moderator languages)
pub const MAX_LIST_ITEMS: usize = 30;
/// Hex length of a compressed secp256k1 public key
pub const PUBKEY_MAX_HEX_CHARACTERS: usize = 66;
/// Ratings run from 0 to 5 stars
pub const MAX_AVERAGE_RATING: f32 = 5.0;

/// A peer's self-published profile document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(rename = "peerID")]
    pub peer_id: String,
    pub handle: String,
    pub name: String,
    pub location: String,
    pub about: String,
    pub short_description: String,
    pub nsfw: bool,
    pub vendor: bool,
    pub moderator: bool,
    pub moderator_info: Option<ModeratorInfo>,
    pub contact_info: Option<ContactInfo>,
    pub colors: Option<Colors>,
    pub avatar_hashes: Option<ImageHashes>,
    pub header_hashes: Option<ImageHashes>,
    pub stats: Option<ProfileStats>,
    /// Hex-encoded compressed public key, stamped from the wallet on write
    pub bitcoin_pubkey: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Contact details and social-account proofs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub website: String,
    pub email: String,
    pub phone_number: String,
    pub social: Vec<SocialAccount>,
}

/// A social account claim with an ownership proof link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialAccount {
    #[serde(rename = "type")]
    pub account_type: String,
    pub username: String,
    pub proof: String,
}

/// Moderation service terms published by moderator nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeratorInfo {
    pub description: String,
    pub terms_and_conditions: String,
    pub languages: Vec<String>,
    /// Uppercased wallet currency, stamped on write
    pub accepted_currency: String,
    pub fee: Option<ModeratorFee>,
}

/// Moderator fee schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeratorFee {
    pub fee_type: FeeType,
    pub fixed_fee: Option<FixedFee>,
    pub percentage: f32,
}

/// Fee schedule shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    #[default]
    Fixed,
    Percentage,
    FixedPlusPercentage,
}

/// Fixed fee amount in a named currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedFee {
    pub currency_code: String,
    pub amount: u64,
}

/// Content addresses of the five size variants of an image.
///
/// Either entirely empty or entirely populated; a partially filled group is
/// invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageHashes {
    pub tiny: String,
    pub small: String,
    pub medium: String,
    pub large: String,
    pub original: String,
}

/// Derived marketplace counters, recomputed locally on refresh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileStats {
    pub listing_count: u32,
    pub follower_count: u32,
    pub following_count: u32,
    pub rating_count: u32,
    pub average_rating: f32,
}

/// Storefront theme colors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub highlight: String,
    pub highlight_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_round_trip() {
        let profile = Profile {
            peer_id: "QmPeer".to_string(),
            name: "Le Marché".to_string(),
            handle: "marche".to_string(),
            vendor: true,
            stats: Some(ProfileStats {
                listing_count: 3,
                average_rating: 4.5,
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = serde_json::to_string_pretty(&profile).unwrap();
        let decoded: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_field_names_on_the_wire() {
        let profile = Profile::default();
        let value = serde_json::to_value(&profile).unwrap();

        // Wire names stay stable; peers of all versions parse these
        assert!(value.get("peerID").is_some());
        assert!(value.get("shortDescription").is_some());
        assert!(value.get("bitcoinPubkey").is_some());
        assert!(value.get("lastModified").is_some());
    }

    #[test]
    fn test_fee_type_serializes_as_name() {
        let fee = ModeratorFee {
            fee_type: FeeType::FixedPlusPercentage,
            ..Default::default()
        };
        let value = serde_json::to_value(&fee).unwrap();
        assert_eq!(value["feeType"], "FIXED_PLUS_PERCENTAGE");
    }

    #[test]
    fn test_partial_document_parses_with_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert!(!profile.moderator);
        assert!(profile.stats.is_none());
    }
}
