//! Per-field registration rules.
//!
//! # Responsibility
//! - Map one field value (plus form context) to a user-facing message.
//!
//! # Invariants
//! - Rules run in declaration order and the first failure wins.
//! - An empty string means the value is valid.
//! - Validation never mutates the record it reads.

use crate::config::CountryCatalog;
use crate::model::form::{FormField, FormRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

const NAME_MAX_LEN: usize = 50;
const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 16;
const PASSWORD_MIN_LEN: usize = 12;
const PASSWORD_SPECIALS: &str = "!@#$%^&*";

static ALPHA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid alpha regex"));
static USERNAME_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username regex"));
static EMAIL_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~.-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("valid email regex")
});
static DOMAIN_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("valid domain label regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid phone regex"));
static PAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN regex"));
static AADHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[2-9][0-9]{11}$").expect("valid aadhar regex"));

/// Rule engine bound to one country catalog.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    catalog: Arc<CountryCatalog>,
}

impl FieldValidator {
    pub fn new(catalog: Arc<CountryCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    /// Validates `value` as the content of `field`.
    ///
    /// `form` supplies cross-field context; only `city` reads it today.
    pub fn validate(&self, field: FormField, value: &str, form: &FormRecord) -> String {
        let trimmed = value.trim();
        let message = match field {
            FormField::FirstName => check_name(&FIRST_NAME, value),
            FormField::LastName => check_name(&LAST_NAME, value),
            FormField::Username => check_username(trimmed),
            FormField::Email => check_email(trimmed),
            FormField::Password => check_password(value),
            FormField::PhoneCountryCode => None,
            FormField::PhoneNumber => check_phone(trimmed),
            FormField::Country => value.is_empty().then_some("Country is required."),
            FormField::City => self.check_city(value, form),
            FormField::PanNo => check_pan(&value.to_uppercase()),
            FormField::AadharNo => check_aadhar(trimmed),
        };
        message.map(str::to_string).unwrap_or_default()
    }

    /// Returns whether every field of `form` passes.
    pub fn is_valid(&self, form: &FormRecord) -> bool {
        FormField::ALL
            .into_iter()
            .all(|field| self.validate(field, form.get(field), form).is_empty())
    }

    fn check_city(&self, value: &str, form: &FormRecord) -> Option<&'static str> {
        if form.country.is_empty() {
            return Some("Select a country first.");
        }
        if value.is_empty() {
            return Some("City is required.");
        }
        match self.catalog.find(&form.country) {
            Some(country) if !country.has_city(value) => {
                Some("Select a valid city for the chosen country.")
            }
            _ => None,
        }
    }
}

struct NameMessages {
    required: &'static str,
    alphabetic: &'static str,
    too_long: &'static str,
}

const FIRST_NAME: NameMessages = NameMessages {
    required: "First Name is required.",
    alphabetic: "First Name must contain only alphabetic letters.",
    too_long: "First Name cannot exceed 50 characters.",
};

const LAST_NAME: NameMessages = NameMessages {
    required: "Last Name is required.",
    alphabetic: "Last Name must contain only alphabetic letters.",
    too_long: "Last Name cannot exceed 50 characters.",
};

fn check_name(messages: &NameMessages, value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(messages.required);
    }
    if trimmed != value {
        return Some("No leading/trailing spaces allowed.");
    }
    if !ALPHA_RE.is_match(value) {
        return Some(messages.alphabetic);
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Some(messages.too_long);
    }
    None
}

fn check_username(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Username is required.");
    }
    if !value.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Some("Username must start with a letter.");
    }
    if value.ends_with('_') {
        return Some("Username cannot end with an underscore.");
    }
    if !USERNAME_CHARSET_RE.is_match(value) {
        return Some("Username can only contain letters, numbers, and underscores.");
    }
    if value.contains("__") {
        return Some("Username cannot have consecutive underscores.");
    }
    // Charset check above guarantees ASCII, so byte length equals char count.
    if value.len() < USERNAME_MIN_LEN {
        return Some("Username must be at least 3 characters.");
    }
    if value.len() > USERNAME_MAX_LEN {
        return Some("Username cannot exceed 16 characters.");
    }
    None
}

fn check_email(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Email is required.");
    }
    // The shape regex already requires an alphabetic TLD of two or more.
    if !EMAIL_SHAPE_RE.is_match(value) {
        return Some("Invalid email format.");
    }
    let (local, domain) = value.split_once('@')?;
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Some("Invalid local part of email (dots).");
    }
    let bad_label = domain.split('.').any(|label| {
        label.starts_with('-') || label.ends_with('-') || !DOMAIN_LABEL_RE.is_match(label)
    });
    if bad_label {
        return Some("Invalid domain part of email.");
    }
    None
}

fn check_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Password is required.");
    }
    if value.chars().any(char::is_whitespace) {
        return Some("Password cannot contain spaces.");
    }
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Some("Password must be at least 12 characters.");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("Password needs a lowercase letter.");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password needs an uppercase letter.");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password needs a digit.");
    }
    if !value.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Some("Password needs a special character (!@#$%^&*).");
    }
    None
}

fn check_phone(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Phone Number is required.");
    }
    if !PHONE_RE.is_match(value) {
        return Some("Phone Number must be 10 digits and start with 6, 7, 8, or 9.");
    }
    None
}

fn check_pan(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("PAN Number is required.");
    }
    if !PAN_RE.is_match(value) {
        return Some("Invalid PAN format (e.g., ABCDE1234F).");
    }
    None
}

fn check_aadhar(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Aadhar Number is required.");
    }
    if !AADHAR_RE.is_match(value) {
        return Some("Aadhar must be 12 digits and not start with 0 or 1.");
    }
    None
}
