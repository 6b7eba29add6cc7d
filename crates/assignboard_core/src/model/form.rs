//! Registration form record and per-field bookkeeping.
//!
//! # Responsibility
//! - Name every registration field with a closed enum.
//! - Hold raw field values plus the error/touched maps derived from them.
//!
//! # Invariants
//! - `FormField::ALL` order is the canonical display and validation order.
//! - `ErrorMap` never stores an empty message; absence means valid.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of one registration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Username,
    Email,
    Password,
    PhoneCountryCode,
    PhoneNumber,
    Country,
    City,
    PanNo,
    AadharNo,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        Self::FirstName,
        Self::LastName,
        Self::Username,
        Self::Email,
        Self::Password,
        Self::PhoneCountryCode,
        Self::PhoneNumber,
        Self::Country,
        Self::City,
        Self::PanNo,
        Self::AadharNo,
    ];

    /// Stable camelCase name shared with the UI layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::PhoneCountryCode => "phoneCountryCode",
            Self::PhoneNumber => "phoneNumber",
            Self::Country => "country",
            Self::City => "city",
            Self::PanNo => "panNo",
            Self::AadharNo => "aadharNo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value.trim())
    }

    /// Human-readable label used on the success summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::PhoneCountryCode => "Phone Country Code",
            Self::PhoneNumber => "Phone Number",
            Self::Country => "Country",
            Self::City => "City",
            Self::PanNo => "Pan No",
            Self::AadharNo => "Aadhar No",
        }
    }
}

/// Complete set of registration field values.
///
/// `country` carries the catalog code (`IN`), `phone_country_code` the
/// matching dial prefix (`+91`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_country_code: String,
    pub phone_number: String,
    pub country: String,
    pub city: String,
    pub pan_no: String,
    pub aadhar_no: String,
}

impl FormRecord {
    /// Empty record whose dial prefix is pre-filled.
    pub fn with_dial_code(dial_code: impl Into<String>) -> Self {
        Self {
            phone_country_code: dial_code.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::PhoneCountryCode => &self.phone_country_code,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Country => &self.country,
            FormField::City => &self.city,
            FormField::PanNo => &self.pan_no,
            FormField::AadharNo => &self.aadhar_no,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::PhoneCountryCode => &mut self.phone_country_code,
            FormField::PhoneNumber => &mut self.phone_number,
            FormField::Country => &mut self.country,
            FormField::City => &mut self.city,
            FormField::PanNo => &mut self.pan_no,
            FormField::AadharNo => &mut self.aadhar_no,
        };
        *slot = value.into();
    }

    /// Field/value pairs in canonical order.
    pub fn entries(&self) -> Vec<(FormField, &str)> {
        FormField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .collect()
    }

    /// Copy with surrounding whitespace stripped and PAN uppercased.
    ///
    /// The password is kept verbatim.
    pub fn normalized(&self) -> Self {
        let mut record = self.clone();
        for field in FormField::ALL {
            if field == FormField::Password {
                continue;
            }
            let trimmed = record.get(field).trim().to_string();
            record.set(field, trimmed);
        }
        record.pan_no = record.pan_no.to_uppercase();
        record
    }
}

/// Per-field current error; a missing entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<FormField, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error for `field`, or an empty string when valid.
    pub fn get(&self, field: FormField) -> &str {
        self.entries.get(&field).map_or("", String::as_str)
    }

    /// Stores `message`; an empty message clears the entry.
    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.entries.remove(&field);
        } else {
            self.entries.insert(field, message);
        }
    }

    pub fn is_clear(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Fields the user has interacted with.
pub type TouchedSet = BTreeSet<FormField>;
