//! Generic form controller: masked values, per-field error slots, and the
//! rules deciding when a form may submit.
//!
//! Error slots hold the display message for their field, with the empty
//! string meaning "no error". Validators run on blur and on submit, never
//! while typing; typing only retracts a stale message.

use std::collections::BTreeMap;
use std::fmt;

/// Validator signature: returns the display message, or `""` when the value
/// passes.
pub type FieldValidator = fn(&str) -> String;

/// Masker signature: canonicalises raw input before it is stored.
pub type FieldMasker = fn(&str) -> String;

/// Static description of one form: its fields and their per-field rules.
///
/// Implementations match exhaustively on the field enum, so adding a field
/// without deciding its validator, masker, and required flag fails to
/// compile.
pub trait FormSchema {
    /// Field discriminant for this form.
    type Field: Copy + Ord + fmt::Debug + 'static;

    /// Every field, in display order. [`FormState`] seeds values and error
    /// slots from this list.
    const FIELDS: &'static [Self::Field];

    /// Blur-time validator for `field`, if it has one.
    fn validator(field: Self::Field) -> Option<FieldValidator>;

    /// Input masker for `field`, if it has one.
    fn masker(field: Self::Field) -> Option<FieldMasker>;

    /// Whether `field` must be non-empty before the form may submit.
    fn required(field: Self::Field) -> bool;
}

/// Error slots for one form: one per field plus the form-wide `general`
/// slot used for cross-field and service failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors<F: Copy + Ord> {
    fields: BTreeMap<F, String>,
    general: String,
}

impl<F: Copy + Ord> FormErrors<F> {
    fn new(fields: &[F]) -> Self {
        Self {
            fields: fields.iter().map(|field| (*field, String::new())).collect(),
            general: String::new(),
        }
    }

    /// Message in `field`'s slot; empty means no error.
    pub fn get(&self, field: F) -> &str {
        self.fields.get(&field).map_or("", String::as_str)
    }

    /// Put `message` in `field`'s slot, replacing whatever was there.
    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    /// Clear `field`'s slot.
    pub fn clear(&mut self, field: F) {
        self.fields.insert(field, String::new());
    }

    /// Message in the form-wide slot; empty means no error.
    pub fn general(&self) -> &str {
        self.general.as_str()
    }

    /// Put `message` in the form-wide slot.
    pub fn set_general(&mut self, message: impl Into<String>) {
        self.general = message.into();
    }

    /// Clear the form-wide slot.
    pub fn clear_general(&mut self) {
        self.general.clear();
    }

    /// `true` when any slot holds a message, the form-wide one included.
    pub fn any(&self) -> bool {
        !self.general.is_empty() || self.fields.values().any(|message| !message.is_empty())
    }
}

/// Controller state for one form instance.
#[derive(Debug, Clone)]
pub struct FormState<S: FormSchema> {
    initial: BTreeMap<S::Field, String>,
    values: BTreeMap<S::Field, String>,
    errors: FormErrors<S::Field>,
}

impl<S: FormSchema> Default for FormState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FormSchema> FormState<S> {
    /// Empty form: every field starts blank.
    pub fn new() -> Self {
        Self::with_initial(std::iter::empty::<(S::Field, String)>())
    }

    /// Form pre-populated with `values`; [`FormState::reset`] returns to
    /// them. Fields not mentioned start blank.
    pub fn with_initial(values: impl IntoIterator<Item = (S::Field, String)>) -> Self {
        let mut initial: BTreeMap<S::Field, String> = S::FIELDS
            .iter()
            .map(|field| (*field, String::new()))
            .collect();
        for (field, value) in values {
            initial.insert(field, value);
        }
        Self {
            values: initial.clone(),
            errors: FormErrors::new(S::FIELDS),
            initial,
        }
    }

    /// Current value of `field`.
    pub fn value(&self, field: S::Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Error slots, for display.
    pub fn errors(&self) -> &FormErrors<S::Field> {
        &self.errors
    }

    /// Route `input` through the field's masker, store the result, and clear
    /// the field's error slot. No validator runs here.
    pub fn update_field(&mut self, field: S::Field, input: &str) {
        let value = S::masker(field).map_or_else(|| input.to_owned(), |mask| mask(input));
        self.values.insert(field, value);
        self.errors.clear(field);
    }

    /// Run the field's validator against its current value, recording the
    /// outcome in its slot either way. A field without a validator has its
    /// slot cleared.
    pub fn handle_blur(&mut self, field: S::Field) {
        let message = S::validator(field)
            .map_or_else(String::new, |validate| validate(self.value(field)));
        self.errors.set(field, message);
    }

    /// Validate every field, replace all slots with the outcome, clear the
    /// form-wide slot, and return a snapshot of the new state.
    pub fn validate_all(&mut self) -> FormErrors<S::Field> {
        let mut errors = FormErrors::new(S::FIELDS);
        for field in S::FIELDS {
            if let Some(validate) = S::validator(*field) {
                errors.set(*field, validate(self.value(*field)));
            }
        }
        self.errors = errors.clone();
        errors
    }

    /// Restore the initial values and clear every error slot.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors = FormErrors::new(S::FIELDS);
    }

    /// `true` when every required field is non-empty and no field slot holds
    /// an error. The form-wide slot is ignored, matching the submit buttons
    /// this gates.
    pub fn is_valid(&self) -> bool {
        let required_filled = S::FIELDS
            .iter()
            .all(|field| !S::required(*field) || !self.value(*field).is_empty());
        let fields_clear = S::FIELDS
            .iter()
            .all(|field| self.errors.get(*field).is_empty());
        required_filled && fields_clear
    }

    /// Replace `field`'s value directly, without masking or touching error
    /// slots. Pre-population paths use this.
    pub fn set_value(&mut self, field: S::Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Put `message` in `field`'s error slot directly.
    pub fn set_error(&mut self, field: S::Field, message: impl Into<String>) {
        self.errors.set(field, message);
    }

    /// Replace the whole error map directly. Submission flows use this to
    /// publish a merged snapshot in one step.
    pub fn set_errors(&mut self, errors: FormErrors<S::Field>) {
        self.errors = errors;
    }

    /// Put `message` in the form-wide error slot.
    pub fn set_general_error(&mut self, message: impl Into<String>) {
        self.errors.set_general(message);
    }

    /// Clear the form-wide error slot.
    pub fn clear_general_error(&mut self) {
        self.errors.clear_general();
    }
}
