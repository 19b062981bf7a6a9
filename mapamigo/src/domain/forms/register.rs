//! Account registration form.
//!
//! Unlike the other screens this one validates on every keystroke, so the
//! form wraps the controller with its own change handler instead of the
//! deferred blur/submit cycle.

use crate::domain::AccountService;
use crate::domain::form::{FieldMasker, FieldValidator, FormSchema, FormState};
use crate::domain::ports::KeyValueStore;
use crate::domain::validation::{
    validate_confirm_password, validate_email, validate_name, validate_password,
};
use crate::domain::{DomainError, ErrorCode, User};

use super::SubmitOutcome;

/// Fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// Field table for [`RegisterForm`].
#[derive(Debug, Clone, Copy)]
pub struct RegisterSchema;

impl FormSchema for RegisterSchema {
    type Field = RegisterField;

    const FIELDS: &'static [RegisterField] = &[
        RegisterField::Name,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
    ];

    fn validator(field: RegisterField) -> Option<FieldValidator> {
        match field {
            RegisterField::Name => Some(validate_name),
            RegisterField::Email => Some(validate_email),
            RegisterField::Password => Some(validate_password),
            // Checked against the password field, which the static table
            // cannot reach.
            RegisterField::ConfirmPassword => None,
        }
    }

    fn masker(_field: RegisterField) -> Option<FieldMasker> {
        None
    }

    fn required(field: RegisterField) -> bool {
        match field {
            RegisterField::Name
            | RegisterField::Email
            | RegisterField::Password
            | RegisterField::ConfirmPassword => true,
        }
    }
}

/// Registration form and its submission flow.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    state: FormState<RegisterSchema>,
}

impl RegisterForm {
    /// Blank form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller state, for display.
    pub fn state(&self) -> &FormState<RegisterSchema> {
        &self.state
    }

    fn field_error(&self, field: RegisterField, value: &str) -> String {
        match field {
            RegisterField::Name => validate_name(value),
            RegisterField::Email => validate_email(value),
            RegisterField::Password => validate_password(value),
            RegisterField::ConfirmPassword => {
                validate_confirm_password(value, self.state.value(RegisterField::Password))
            }
        }
    }

    /// Store `input` and validate it immediately. Editing the password also
    /// re-checks a non-empty confirmation against the new value.
    pub fn change(&mut self, field: RegisterField, input: &str) {
        let message = self.field_error(field, input);
        self.state.set_value(field, input);
        self.state.set_error(field, message);

        if field == RegisterField::Password
            && !self.state.value(RegisterField::ConfirmPassword).is_empty()
        {
            let confirmation = self.field_error(
                RegisterField::ConfirmPassword,
                self.state.value(RegisterField::ConfirmPassword),
            );
            self.state.set_error(RegisterField::ConfirmPassword, confirmation);
        }
    }

    /// Re-validate `field` against its current value.
    pub fn blur(&mut self, field: RegisterField) {
        let message = self.field_error(field, self.state.value(field));
        self.state.set_error(field, message);
    }

    /// Validate everything and register the account. A taken e-mail address
    /// lands in the e-mail slot; success resets the form.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        accounts: &AccountService<S>,
    ) -> Result<SubmitOutcome<()>, DomainError> {
        let mut errors = self.state.validate_all();
        let confirmation = self.field_error(
            RegisterField::ConfirmPassword,
            self.state.value(RegisterField::ConfirmPassword),
        );
        errors.set(RegisterField::ConfirmPassword, confirmation.clone());
        self.state.set_error(RegisterField::ConfirmPassword, confirmation);
        if errors.any() {
            return Ok(SubmitOutcome::Blocked);
        }

        let user = User {
            name: self.state.value(RegisterField::Name).to_owned(),
            email: self.state.value(RegisterField::Email).to_owned(),
            password: self.state.value(RegisterField::Password).to_owned(),
        };
        match accounts.create_user(user) {
            Ok(()) => {
                self.state.reset();
                Ok(SubmitOutcome::Saved(()))
            }
            Err(error) => {
                if error.code() == ErrorCode::InternalError {
                    return Err(error);
                }
                self.state.set_error(RegisterField::Email, error.message());
                Ok(SubmitOutcome::Blocked)
            }
        }
    }
}
