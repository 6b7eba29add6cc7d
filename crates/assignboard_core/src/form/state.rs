//! Registration form state machine.
//!
//! # Responsibility
//! - Track field values, touched flags and current errors.
//! - Apply change/blur/submit transitions through `FieldValidator`.
//! - Run the one-shot autofill check scheduled at mount.
//!
//! # Invariants
//! - PAN values are stored uppercased.
//! - Changing `country` always clears `city` and recomputes the dial code.
//! - Errors are only shown for touched fields; submittability ignores
//!   touched state.
//! - A successful submit emits exactly one record and resets all state.

use crate::config::{AppConfig, CountryCatalog, DEFAULT_AUTOFILL_DELAY_MS, DEFAULT_COUNTRY_CODE};
use crate::form::deferred::{CancelHandle, OneShot};
use crate::model::form::{ErrorMap, FormField, FormRecord, TouchedSet};
use crate::validate::field::FieldValidator;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Receiver of an accepted registration.
pub trait SubmitSink {
    fn accept(&mut self, record: FormRecord);
}

impl SubmitSink for Vec<FormRecord> {
    fn accept(&mut self, record: FormRecord) {
        self.push(record);
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record was emitted to the sink and state was cleared; carries a copy
    /// of what the sink received.
    Accepted(FormRecord),
    /// At least one field failed; carries the full error map.
    Rejected(ErrorMap),
}

/// Live state of one registration form instance.
#[derive(Debug)]
pub struct FormState {
    validator: FieldValidator,
    initial: FormRecord,
    values: FormRecord,
    errors: ErrorMap,
    touched: TouchedSet,
    autofill_delay: Duration,
    autofill: Option<OneShot>,
}

impl FormState {
    /// Creates an empty form bound to `catalog` with default settings.
    pub fn new(catalog: Arc<CountryCatalog>) -> Self {
        Self::with_settings(
            catalog,
            DEFAULT_COUNTRY_CODE,
            Duration::from_millis(DEFAULT_AUTOFILL_DELAY_MS),
        )
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_settings(
            Arc::new(config.countries.clone()),
            &config.default_country_code,
            Duration::from_millis(config.autofill_delay_ms),
        )
    }

    fn with_settings(
        catalog: Arc<CountryCatalog>,
        default_country_code: &str,
        autofill_delay: Duration,
    ) -> Self {
        let initial = FormRecord::with_dial_code(catalog.initial_dial_code(default_country_code));
        Self {
            validator: FieldValidator::new(catalog),
            values: initial.clone(),
            initial,
            errors: ErrorMap::new(),
            touched: TouchedSet::new(),
            autofill_delay,
            autofill: None,
        }
    }

    pub fn values(&self) -> &FormRecord {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn touched(&self) -> &TouchedSet {
        &self.touched
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Error to render for `field`, gated by its touched flag.
    pub fn visible_error(&self, field: FormField) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        let message = self.errors.get(field);
        (!message.is_empty()).then_some(message)
    }

    /// Whether the whole form currently passes, regardless of touched flags.
    pub fn is_submittable(&self) -> bool {
        self.validator.is_valid(&self.values)
    }

    /// City options for the selected country.
    pub fn available_cities(&self) -> &[String] {
        self.validator.catalog().cities_for(&self.values.country)
    }

    /// Applies an input change; re-validates only already touched fields.
    pub fn on_change(&mut self, field: FormField, value: &str) {
        self.store_value(field, value);
        if self.is_touched(field) {
            self.revalidate(field);
        }
    }

    /// Marks `field` touched and always re-validates it.
    pub fn on_blur(&mut self, field: FormField, value: &str) {
        if self.values.get(field) != normalize_input(field, value) {
            self.store_value(field, value);
        }
        self.touched.insert(field);
        self.revalidate(field);
    }

    /// Validates every field and emits the normalized record when all pass.
    pub fn submit(&mut self, sink: &mut impl SubmitSink) -> SubmitOutcome {
        self.touched.extend(FormField::ALL);
        let mut errors = ErrorMap::new();
        for field in FormField::ALL {
            errors.set(
                field,
                self.validator
                    .validate(field, self.values.get(field), &self.values),
            );
        }
        self.errors = errors;

        if !self.errors.is_clear() {
            info!(
                "event=form_submit module=form status=rejected error_count={}",
                self.errors.len()
            );
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        let record = self.values.normalized();
        sink.accept(record.clone());
        info!("event=form_submit module=form status=ok");
        self.reset();
        SubmitOutcome::Accepted(record)
    }

    /// Restores initial values and clears errors and touched flags.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
    }

    /// Schedules the autofill check; replaces any check already pending.
    pub fn mount(&mut self, now: Instant) -> CancelHandle {
        self.unmount();
        let (timer, handle) = OneShot::schedule(now, self.autofill_delay);
        self.autofill = Some(timer);
        handle
    }

    /// Cancels a pending autofill check.
    pub fn unmount(&mut self) {
        if let Some(timer) = self.autofill.take() {
            timer.cancel();
        }
    }

    /// Runs the autofill check when due. Returns `true` when it ran.
    ///
    /// Untouched fields holding a non-initial value are marked touched and
    /// validated.
    pub fn poll_deferred(&mut self, now: Instant) -> bool {
        let Some(timer) = self.autofill.as_ref() else {
            return false;
        };
        if !timer.poll(now) {
            if !timer.is_pending() {
                self.autofill = None;
            }
            return false;
        }
        self.autofill = None;

        let mut detected = 0usize;
        for field in FormField::ALL {
            let current = self.values.get(field);
            let autofilled = !current.is_empty()
                && current != self.initial.get(field)
                && !self.touched.contains(&field);
            if autofilled {
                self.touched.insert(field);
                self.revalidate(field);
                detected += 1;
            }
        }
        debug!("event=autofill_check module=form status=ok detected={detected}");
        true
    }

    fn store_value(&mut self, field: FormField, value: &str) {
        let processed = normalize_input(field, value);
        if field == FormField::Country {
            self.values.phone_country_code = self
                .validator
                .catalog()
                .dial_code_for(&processed)
                .to_string();
            self.values.city.clear();
            self.values.country = processed;
            if self.is_touched(FormField::City) {
                self.revalidate(FormField::City);
            }
            return;
        }
        self.values.set(field, processed);
    }

    fn revalidate(&mut self, field: FormField) {
        let message = self
            .validator
            .validate(field, self.values.get(field), &self.values);
        self.errors.set(field, message);
    }
}

fn normalize_input(field: FormField, value: &str) -> String {
    match field {
        FormField::PanNo => value.to_uppercase(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::FormState;
    use crate::config::CountryCatalog;
    use crate::model::form::FormField;
    use std::sync::Arc;

    fn form() -> FormState {
        FormState::new(Arc::new(CountryCatalog::builtin()))
    }

    #[test]
    fn initial_dial_code_is_india() {
        assert_eq!(form().values().phone_country_code, "+91");
    }

    #[test]
    fn change_on_untouched_field_does_not_surface_error() {
        let mut state = form();
        state.on_change(FormField::Email, "nope");
        assert_eq!(state.errors().get(FormField::Email), "");
        assert_eq!(state.visible_error(FormField::Email), None);
    }

    #[test]
    fn blur_is_idempotent_and_revalidates() {
        let mut state = form();
        state.on_blur(FormField::Email, "nope");
        state.on_blur(FormField::Email, "nope");
        assert_eq!(state.touched().len(), 1);
        assert_eq!(
            state.visible_error(FormField::Email),
            Some("Invalid email format.")
        );

        state.on_change(FormField::Email, "name@example.com");
        assert_eq!(state.visible_error(FormField::Email), None);
    }

    #[test]
    fn available_cities_follow_country() {
        let mut state = form();
        assert!(state.available_cities().is_empty());
        state.on_change(FormField::Country, "GB");
        assert!(state.available_cities().iter().any(|city| city == "London"));
    }
}
