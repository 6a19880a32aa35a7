//! Contact form validation.
//!
//! Checks run in a fixed priority order (purpose, name, email, phone) and the
//! first failure wins. Nothing is dispatched unless every check passes.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{FormFields, Inquiry, Purpose, PurposeOptions};

/// Counted in UTF-16 code units, the way browsers measure input length.
const MIN_NAME_UNITS: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;

/// Whitespace as browsers define it for form patterns: Unicode spaces plus the
/// byte order mark, but not NEL (U+0085).
const WHITESPACE: &str =
    r"\t\n\x{0B}\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{WHITESPACE}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("valid email regex")
});

/// A form field failed validation. `Display` is the message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select whether you want to {}.", .options.choice_list())]
    MissingPurpose { options: PurposeOptions },
    #[error("Please enter your full name.")]
    MissingName,
    #[error("Full name must be at least 2 characters long.")]
    NameTooShort,
    #[error("Please enter your email address.")]
    MissingEmail,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter your phone number.")]
    MissingPhone,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

/// `local@domain.tld`: no whitespace, exactly one `@`, at least one dot after it.
#[must_use]
pub fn validate_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// At least ten digits once punctuation and spaces are ignored.
#[must_use]
pub fn validate_phone(s: &str) -> bool {
    s.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

#[must_use]
pub fn validate_name(s: &str) -> bool {
    !s.is_empty() && s.encode_utf16().count() >= MIN_NAME_UNITS
}

pub fn validate_purpose(
    selection: Option<&str>,
    options: &PurposeOptions,
) -> Result<Purpose, ValidationError> {
    selection
        .and_then(Purpose::parse)
        .filter(|purpose| options.contains(*purpose))
        .ok_or_else(|| ValidationError::MissingPurpose {
            options: options.clone(),
        })
}

/// Validate raw form input and build an [`Inquiry`] from the trimmed values.
pub fn validate_form(
    fields: &FormFields,
    options: &PurposeOptions,
) -> Result<Inquiry, ValidationError> {
    let full_name = fields.full_name.trim();
    let email = fields.email.trim();
    let phone = fields.phone.trim();

    let purpose = validate_purpose(fields.purpose.as_deref(), options)?;

    if full_name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !validate_name(full_name) {
        return Err(ValidationError::NameTooShort);
    }

    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if phone.is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if !validate_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(Inquiry {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        purpose,
    })
}
