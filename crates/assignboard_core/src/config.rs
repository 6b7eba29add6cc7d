//! Immutable application configuration and the country lookup table.
//!
//! # Responsibility
//! - Provide defaults for every tunable used by the form and to-do pages.
//! - Own the country -> dial code -> city catalog injected into form state.
//!
//! # Invariants
//! - Country codes are unique and non-empty inside one catalog.
//! - Every country declares a non-empty dial code.
//! - A parsed configuration is never mutated after construction.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Country code selected by default for the phone dial prefix.
pub const DEFAULT_COUNTRY_CODE: &str = "IN";
/// Maximum task text length in Unicode scalar values.
pub const DEFAULT_TASK_MAX_LEN: usize = 100;
/// Delay before the autofill check re-validates untouched fields.
pub const DEFAULT_AUTOFILL_DELAY_MS: u64 = 500;
/// Namespace key under which the task collection is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "assignboard.tasks";

/// One selectable country with its dial code and city options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
    pub dial_code: String,
    pub cities: Vec<String>,
}

impl Country {
    fn new(name: &str, code: &str, dial_code: &str, cities: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            dial_code: dial_code.to_string(),
            cities: cities.iter().map(|city| (*city).to_string()).collect(),
        }
    }

    /// Returns whether `city` is one of this country's options.
    pub fn has_city(&self, city: &str) -> bool {
        self.cities.iter().any(|candidate| candidate == city)
    }
}

/// Read-only lookup table of countries, keyed by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCatalog {
    countries: Vec<Country>,
}

impl CountryCatalog {
    /// Builds a catalog after checking code uniqueness and dial codes.
    pub fn new(countries: Vec<Country>) -> Result<Self, ConfigError> {
        let catalog = Self { countries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// India, USA and United Kingdom with five cities each.
    pub fn builtin() -> Self {
        Self {
            countries: vec![
                Country::new(
                    "India",
                    "IN",
                    "+91",
                    &["Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai"],
                ),
                Country::new(
                    "USA",
                    "US",
                    "+1",
                    &["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"],
                ),
                Country::new(
                    "United Kingdom",
                    "GB",
                    "+44",
                    &["London", "Manchester", "Birmingham", "Liverpool", "Bristol"],
                ),
            ],
        }
    }

    pub fn find(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.code == code)
    }

    /// Dial code for `code`, or empty when the code is unknown.
    pub fn dial_code_for(&self, code: &str) -> &str {
        self.find(code).map_or("", |country| country.dial_code.as_str())
    }

    /// City options for `code`; empty when no country is selected.
    pub fn cities_for(&self, code: &str) -> &[String] {
        self.find(code).map_or(&[], |country| country.cities.as_slice())
    }

    /// Dial code used before the user picks a country.
    ///
    /// Falls back to the first entry when `preferred` is not in the catalog.
    pub fn initial_dial_code(&self, preferred: &str) -> &str {
        self.find(preferred)
            .or_else(|| self.countries.first())
            .map_or("", |country| country.dial_code.as_str())
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.countries.len());
        for country in &self.countries {
            let code = country.code.trim();
            if code.is_empty() {
                return Err(ConfigError::EmptyCountryCode(country.name.clone()));
            }
            if seen.contains(&code) {
                return Err(ConfigError::DuplicateCountryCode(code.to_string()));
            }
            if country.dial_code.trim().is_empty() {
                return Err(ConfigError::MissingDialCode(code.to_string()));
            }
            seen.push(code);
        }
        Ok(())
    }
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Top-level configuration for one client process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub countries: CountryCatalog,
    pub default_country_code: String,
    pub task_max_len: usize,
    pub autofill_delay_ms: u64,
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            countries: CountryCatalog::builtin(),
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            task_max_len: DEFAULT_TASK_MAX_LEN,
            autofill_delay_ms: DEFAULT_AUTOFILL_DELAY_MS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Parses a JSON document; missing keys fall back to defaults.
    ///
    /// # Errors
    /// - `Parse` when the document is not valid JSON for this shape.
    /// - Catalog errors when country entries are inconsistent.
    /// - `InvalidValue` when a scalar setting is out of range.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.countries.validate()?;
        if self.task_max_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "task_max_len",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage_key",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration parse/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    EmptyCountryCode(String),
    DuplicateCountryCode(String),
    MissingDialCode(String),
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config document: {message}"),
            Self::EmptyCountryCode(name) => write!(f, "country `{name}` has an empty code"),
            Self::DuplicateCountryCode(code) => write!(f, "duplicate country code: {code}"),
            Self::MissingDialCode(code) => write!(f, "country `{code}` has no dial code"),
            Self::InvalidValue { key, message } => write!(f, "config `{key}` {message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, Country, CountryCatalog};

    #[test]
    fn builtin_catalog_resolves_dial_codes() {
        let catalog = CountryCatalog::builtin();
        assert_eq!(catalog.dial_code_for("IN"), "+91");
        assert_eq!(catalog.dial_code_for("GB"), "+44");
        assert_eq!(catalog.dial_code_for("FR"), "");
        assert_eq!(catalog.cities_for("US").len(), 5);
        assert!(catalog.cities_for("").is_empty());
    }

    #[test]
    fn initial_dial_code_falls_back_to_first_entry() {
        let catalog = CountryCatalog::new(vec![Country {
            name: "USA".to_string(),
            code: "US".to_string(),
            dial_code: "+1".to_string(),
            cities: vec![],
        }])
        .expect("valid catalog");
        assert_eq!(catalog.initial_dial_code("IN"), "+1");
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = AppConfig::from_json_str("{}").expect("empty object is valid");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_duplicate_country_codes() {
        let raw = r#"{"countries":[
            {"name":"A","code":"XX","dial_code":"+1","cities":[]},
            {"name":"B","code":"XX","dial_code":"+2","cities":[]}
        ]}"#;
        let err = AppConfig::from_json_str(raw).expect_err("duplicate code must fail");
        assert_eq!(err, ConfigError::DuplicateCountryCode("XX".to_string()));
    }

    #[test]
    fn rejects_zero_task_length() {
        let err = AppConfig::from_json_str(r#"{"task_max_len":0}"#).expect_err("zero must fail");
        assert!(err.to_string().contains("task_max_len"));
    }
}
