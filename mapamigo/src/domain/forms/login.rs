//! Sign-in form.

use crate::domain::AccountService;
use crate::domain::form::{FieldMasker, FieldValidator, FormSchema, FormState};
use crate::domain::ports::KeyValueStore;
use crate::domain::validation::{validate_email, validate_login_password};
use crate::domain::{DomainError, User};

use super::{SubmitOutcome, route_service_error};

/// Fields of the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

/// Field table for [`LoginForm`].
#[derive(Debug, Clone, Copy)]
pub struct LoginSchema;

impl FormSchema for LoginSchema {
    type Field = LoginField;

    const FIELDS: &'static [LoginField] = &[LoginField::Email, LoginField::Password];

    fn validator(field: LoginField) -> Option<FieldValidator> {
        match field {
            LoginField::Email => Some(validate_email),
            LoginField::Password => Some(validate_login_password),
        }
    }

    fn masker(field: LoginField) -> Option<FieldMasker> {
        match field {
            LoginField::Email | LoginField::Password => Some(brdoc::text::trim),
        }
    }

    fn required(field: LoginField) -> bool {
        match field {
            LoginField::Email | LoginField::Password => true,
        }
    }
}

/// Sign-in form and its submission flow.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    state: FormState<LoginSchema>,
}

impl LoginForm {
    /// Blank form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller state, for typing and display.
    pub fn state(&self) -> &FormState<LoginSchema> {
        &self.state
    }

    /// Mutable controller state.
    pub fn state_mut(&mut self) -> &mut FormState<LoginSchema> {
        &mut self.state
    }

    /// Validate and attempt the login. A rejected credential pair lands in
    /// the general slot; success resets the form and yields the session user.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        accounts: &AccountService<S>,
    ) -> Result<SubmitOutcome<User>, DomainError> {
        if self.state.validate_all().any() {
            return Ok(SubmitOutcome::Blocked);
        }
        let email = self.state.value(LoginField::Email).to_owned();
        let password = self.state.value(LoginField::Password).to_owned();
        match accounts.login(&email, &password) {
            Ok(user) => {
                self.state.reset();
                Ok(SubmitOutcome::Saved(user))
            }
            Err(error) => {
                route_service_error(&mut self.state, error)?;
                Ok(SubmitOutcome::Blocked)
            }
        }
    }
}
