/// Profile document validation
///
/// Pure shape/length/format checks a profile must pass before it is trusted,
/// re-published, or persisted. Collects every violation rather than stopping
/// at the first, so callers can surface a complete message.
use crate::error::ProfileError;
use crate::profile::{
    ImageHashes, Profile, ABOUT_MAX_CHARACTERS, MAX_AVERAGE_RATING, MAX_LIST_ITEMS,
    POLICY_MAX_CHARACTERS, PUBKEY_MAX_HEX_CHARACTERS, SENTENCE_MAX_CHARACTERS,
    SHORT_DESCRIPTION_LENGTH, URL_MAX_CHARACTERS, WORD_MAX_CHARACTERS,
};

/// A single constraint violation: which field, and what limit it broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collapse field errors into a single `ProfileError::Validation`
pub fn field_errors_to_error(errors: Vec<FieldError>) -> ProfileError {
    let messages: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect();
    ProfileError::Validation(messages.join("; "))
}

/// Validate a profile document against all field constraints
pub fn validate(profile: &Profile) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if profile.handle.contains('@') {
        errors.push(FieldError::new("handle", "must not contain @"));
    }
    check_length(&mut errors, "handle", &profile.handle, WORD_MAX_CHARACTERS);

    if profile.name.is_empty() {
        errors.push(FieldError::new("name", "is not set"));
    }
    check_length(&mut errors, "name", &profile.name, WORD_MAX_CHARACTERS);
    check_length(&mut errors, "location", &profile.location, WORD_MAX_CHARACTERS);
    check_length(&mut errors, "about", &profile.about, ABOUT_MAX_CHARACTERS);
    check_length(
        &mut errors,
        "shortDescription",
        &profile.short_description,
        SHORT_DESCRIPTION_LENGTH,
    );

    if let Some(contact) = &profile.contact_info {
        check_length(
            &mut errors,
            "contactInfo.website",
            &contact.website,
            URL_MAX_CHARACTERS,
        );
        check_length(
            &mut errors,
            "contactInfo.email",
            &contact.email,
            SENTENCE_MAX_CHARACTERS,
        );
        check_length(
            &mut errors,
            "contactInfo.phoneNumber",
            &contact.phone_number,
            WORD_MAX_CHARACTERS,
        );
        if contact.social.len() > MAX_LIST_ITEMS {
            errors.push(FieldError::new(
                "contactInfo.social",
                format!("has more than the maximum of {} entries", MAX_LIST_ITEMS),
            ));
        }
        for (i, account) in contact.social.iter().enumerate() {
            check_length(
                &mut errors,
                &format!("contactInfo.social[{}].username", i),
                &account.username,
                WORD_MAX_CHARACTERS,
            );
            check_length(
                &mut errors,
                &format!("contactInfo.social[{}].type", i),
                &account.account_type,
                WORD_MAX_CHARACTERS,
            );
            check_length(
                &mut errors,
                &format!("contactInfo.social[{}].proof", i),
                &account.proof,
                URL_MAX_CHARACTERS,
            );
        }
    }

    if let Some(info) = &profile.moderator_info {
        check_length(
            &mut errors,
            "moderatorInfo.description",
            &info.description,
            ABOUT_MAX_CHARACTERS,
        );
        check_length(
            &mut errors,
            "moderatorInfo.termsAndConditions",
            &info.terms_and_conditions,
            POLICY_MAX_CHARACTERS,
        );
        if info.languages.len() > MAX_LIST_ITEMS {
            errors.push(FieldError::new(
                "moderatorInfo.languages",
                format!("has more than the maximum of {} entries", MAX_LIST_ITEMS),
            ));
        }
        for (i, language) in info.languages.iter().enumerate() {
            check_length(
                &mut errors,
                &format!("moderatorInfo.languages[{}]", i),
                language,
                WORD_MAX_CHARACTERS,
            );
        }
        if let Some(fee) = &info.fee {
            if let Some(fixed) = &fee.fixed_fee {
                check_length(
                    &mut errors,
                    "moderatorInfo.fee.fixedFee.currencyCode",
                    &fixed.currency_code,
                    WORD_MAX_CHARACTERS,
                );
            }
        }
    }

    check_image_hashes(&mut errors, "avatarHashes", profile.avatar_hashes.as_ref());
    check_image_hashes(&mut errors, "headerHashes", profile.header_hashes.as_ref());

    if profile.bitcoin_pubkey.len() > PUBKEY_MAX_HEX_CHARACTERS {
        errors.push(FieldError::new(
            "bitcoinPubkey",
            format!(
                "character length is greater than the max of {}",
                PUBKEY_MAX_HEX_CHARACTERS
            ),
        ));
    }

    if let Some(stats) = &profile.stats {
        if stats.average_rating > MAX_AVERAGE_RATING {
            errors.push(FieldError::new(
                "stats.averageRating",
                format!("cannot be greater than {}", MAX_AVERAGE_RATING),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_length(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("character length is greater than the max of {}", max),
        ));
    }
}

/// A hash group is either entirely empty or entirely populated with valid
/// base58 multihashes.
fn check_image_hashes(errors: &mut Vec<FieldError>, field: &str, hashes: Option<&ImageHashes>) {
    let hashes = match hashes {
        Some(h) => h,
        None => return,
    };

    let variants = [
        ("tiny", &hashes.tiny),
        ("small", &hashes.small),
        ("medium", &hashes.medium),
        ("large", &hashes.large),
        ("original", &hashes.original),
    ];

    if variants.iter().all(|(_, value)| value.is_empty()) {
        return;
    }

    for (variant, value) in variants {
        if !is_multihash(value) {
            errors.push(FieldError::new(
                format!("{}.{}", field, variant),
                "image hashes must be base58 multihashes",
            ));
        }
    }
}

/// Base58 multihash shape check: hash code byte, digest length byte, then
/// exactly that many digest bytes.
fn is_multihash(value: &str) -> bool {
    match bs58::decode(value).into_vec() {
        Ok(bytes) => bytes.len() >= 2 && bytes.len() == 2 + bytes[1] as usize,
        Err(_) => false,
    }
}
