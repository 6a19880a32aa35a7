//! Core domain types for Inquiry.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod validate;
pub use validate::{
    ValidationError, validate_email, validate_form, validate_name, validate_phone,
    validate_purpose,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Purpose
// ============================================================================

/// What the visitor wants to do with a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Invest,
    Rent,
    Design,
}

impl Purpose {
    /// Radio-button value as submitted by the form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Invest => "invest",
            Purpose::Rent => "rent",
            Purpose::Design => "design",
        }
    }

    /// Label sent to the email template (`purpose` and the subject line).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Invest => "Investment",
            Purpose::Rent => "Rental",
            Purpose::Design => "Design",
        }
    }

    /// Verb shown to the visitor when asking them to pick an option.
    #[must_use]
    pub fn choice(&self) -> &'static str {
        match self {
            Purpose::Invest => "Invest",
            Purpose::Rent => "Rent",
            Purpose::Design => "Design",
        }
    }

    /// Parse a radio value. Case-insensitive, surrounding whitespace ignored.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let value = s.trim().to_ascii_lowercase();
        Purpose::all()
            .iter()
            .copied()
            .find(|purpose| purpose.as_str() == value)
    }

    #[must_use]
    pub fn all() -> &'static [Purpose] {
        &[Purpose::Invest, Purpose::Rent, Purpose::Design]
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of purposes a form offers, in display order.
///
/// The default is the two-way `Invest`/`Rent` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Purpose>", into = "Vec<Purpose>")]
pub struct PurposeOptions(Vec<Purpose>);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("a form must offer at least one purpose")]
pub struct EmptyPurposeOptionsError;

impl PurposeOptions {
    /// Build from a list of purposes. Duplicates are dropped, order is kept.
    pub fn new(
        purposes: impl IntoIterator<Item = Purpose>,
    ) -> Result<Self, EmptyPurposeOptionsError> {
        let mut out: Vec<Purpose> = Vec::new();
        for purpose in purposes {
            if !out.contains(&purpose) {
                out.push(purpose);
            }
        }
        if out.is_empty() {
            Err(EmptyPurposeOptionsError)
        } else {
            Ok(Self(out))
        }
    }

    #[must_use]
    pub fn two_way() -> Self {
        Self(vec![Purpose::Invest, Purpose::Rent])
    }

    #[must_use]
    pub fn three_way() -> Self {
        Self(vec![Purpose::Invest, Purpose::Rent, Purpose::Design])
    }

    #[must_use]
    pub fn contains(&self, purpose: Purpose) -> bool {
        self.0.contains(&purpose)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Purpose] {
        &self.0
    }

    /// Human list of the offered choices: `Invest or Rent`,
    /// `Invest, Rent, or Design`.
    #[must_use]
    pub fn choice_list(&self) -> String {
        let choices: Vec<&str> = self.0.iter().map(Purpose::choice).collect();
        match choices.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [first, second] => format!("{first} or {second}"),
            [head @ .., last] => format!("{}, or {last}", head.join(", ")),
        }
    }
}

impl Default for PurposeOptions {
    fn default() -> Self {
        Self::two_way()
    }
}

impl TryFrom<Vec<Purpose>> for PurposeOptions {
    type Error = EmptyPurposeOptionsError;

    fn try_from(value: Vec<Purpose>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PurposeOptions> for Vec<Purpose> {
    fn from(value: PurposeOptions) -> Self {
        value.0
    }
}

// ============================================================================
// Form input & Inquiry
// ============================================================================

/// Raw values read from the contact form, before trimming or validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Value of the checked `purpose` radio, if any.
    pub purpose: Option<String>,
}

/// A validated contact request.
///
/// Only [`validate_form`] constructs this, so holding one proves every field
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    full_name: String,
    email: String,
    phone: String,
    purpose: Purpose,
}

impl Inquiry {
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn purpose(&self) -> Purpose {
        self.purpose
    }
}

// ============================================================================
// Template parameters
// ============================================================================

/// Values substituted into the EmailJS template.
///
/// Field names are the template's placeholder names (`{{name}}`, `{{title}}`,
/// `{{message}}`, `{{time}}`, ...) and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub name: String,
    /// Subject line, e.g. `Investment Inquiry from Jane Doe`.
    pub title: String,
    pub message: String,
    pub time: String,
    pub email: String,
    pub phone: String,
    /// Purpose label (`Investment`, `Rental`, `Design`).
    pub purpose: String,
}

// ============================================================================
// Dispatch configuration
// ============================================================================

pub const PLACEHOLDER_PUBLIC_KEY: &str = "YOUR_PUBLIC_KEY";
pub const PLACEHOLDER_SERVICE_ID: &str = "YOUR_SERVICE_ID";
pub const PLACEHOLDER_TEMPLATE_ID: &str = "YOUR_TEMPLATE_ID";

/// EmailJS public key.
///
/// Note: `Debug` is manually implemented to redact the key value, preventing accidental
/// credential disclosure in logs or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(String);

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey(<redacted>)")
    }
}

impl PublicKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        is_placeholder(&self.0, PLACEHOLDER_PUBLIC_KEY)
    }
}

fn is_placeholder(value: &str, placeholder: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == placeholder
}

/// Credentials and routing for the outbound email request.
///
/// Built once at startup and handed to the dispatcher; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    public_key: PublicKey,
    service_id: String,
    template_id: String,
}

impl DispatchConfig {
    #[must_use]
    pub fn new(
        public_key: PublicKey,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            public_key,
            service_id: service_id.into(),
            template_id: template_id.into(),
        }
    }

    /// A config still holding the `YOUR_*` placeholders.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(
            PublicKey::new(PLACEHOLDER_PUBLIC_KEY),
            PLACEHOLDER_SERVICE_ID,
            PLACEHOLDER_TEMPLATE_ID,
        )
    }

    #[must_use]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    #[must_use]
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    #[must_use]
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Names of the fields that are empty or still hold placeholders.
    #[must_use]
    pub fn unconfigured_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.public_key.is_placeholder() {
            missing.push("public_key");
        }
        if is_placeholder(&self.service_id, PLACEHOLDER_SERVICE_ID) {
            missing.push("service_id");
        }
        if is_placeholder(&self.template_id, PLACEHOLDER_TEMPLATE_ID) {
            missing.push("template_id");
        }
        missing
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.unconfigured_fields().is_empty()
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::placeholder()
    }
}
