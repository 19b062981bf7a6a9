//! Account settings form: profile edits, password change, account deletion.

use crate::domain::AccountService;
use crate::domain::form::{FieldMasker, FieldValidator, FormSchema, FormState};
use crate::domain::ports::KeyValueStore;
use crate::domain::validation::{
    PasswordChangeError, validate_email_in_use, validate_name, validate_optional_password,
    validate_password_change,
};
use crate::domain::{DomainError, User, UserPatch};

use super::{SubmitOutcome, route_service_error};

/// Fields of the account settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccountField {
    Name,
    Email,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
}

/// Field table for [`AccountForm`].
#[derive(Debug, Clone, Copy)]
pub struct AccountSchema;

impl FormSchema for AccountSchema {
    type Field = AccountField;

    const FIELDS: &'static [AccountField] = &[
        AccountField::Name,
        AccountField::Email,
        AccountField::CurrentPassword,
        AccountField::NewPassword,
        AccountField::ConfirmPassword,
    ];

    fn validator(field: AccountField) -> Option<FieldValidator> {
        match field {
            AccountField::Name => Some(validate_name),
            AccountField::NewPassword => Some(validate_optional_password),
            // The e-mail check needs the user table and the confirmation
            // needs the sibling field; both run in the flow instead.
            AccountField::Email
            | AccountField::CurrentPassword
            | AccountField::ConfirmPassword => None,
        }
    }

    fn masker(field: AccountField) -> Option<FieldMasker> {
        match field {
            AccountField::Name => Some(brdoc::text::capitalize),
            AccountField::Email | AccountField::ConfirmPassword => Some(brdoc::text::trim),
            // The password inputs keep whitespace; what was typed is what
            // gets checked.
            AccountField::CurrentPassword | AccountField::NewPassword => None,
        }
    }

    fn required(field: AccountField) -> bool {
        match field {
            AccountField::Name | AccountField::Email => true,
            AccountField::CurrentPassword
            | AccountField::NewPassword
            | AccountField::ConfirmPassword => false,
        }
    }
}

/// Account settings form and its flows.
#[derive(Debug, Clone)]
pub struct AccountForm {
    state: FormState<AccountSchema>,
    original_email: String,
}

impl AccountForm {
    /// Form pre-populated from the signed-in user's record.
    pub fn for_user(user: &User) -> Self {
        Self {
            state: FormState::with_initial([
                (AccountField::Name, user.name.clone()),
                (AccountField::Email, user.email.clone()),
            ]),
            original_email: user.email.clone(),
        }
    }

    /// Controller state, for typing and display.
    pub fn state(&self) -> &FormState<AccountSchema> {
        &self.state
    }

    /// Mutable controller state.
    pub fn state_mut(&mut self) -> &mut FormState<AccountSchema> {
        &mut self.state
    }

    /// E-mail the loaded record was stored under; edits compare against it.
    pub fn original_email(&self) -> &str {
        &self.original_email
    }

    fn confirm_error(&self) -> String {
        let new = self.state.value(AccountField::NewPassword);
        let confirm = self.state.value(AccountField::ConfirmPassword);
        if !new.trim().is_empty() && confirm != new {
            "As senhas não coincidem.".to_owned()
        } else {
            String::new()
        }
    }

    fn password_change_attempted(&self) -> bool {
        !self.state.value(AccountField::CurrentPassword).is_empty()
            || !self.state.value(AccountField::NewPassword).is_empty()
            || !self.state.value(AccountField::ConfirmPassword).is_empty()
    }

    /// Blur handler for the e-mail field; needs the user table.
    pub fn blur_email(&mut self, users: &[User]) {
        let message = validate_email_in_use(
            users,
            self.state.value(AccountField::Email),
            &self.original_email,
        );
        self.state.set_error(AccountField::Email, message);
    }

    /// Blur handler for the confirmation field; checks the sibling password.
    pub fn blur_confirm_password(&mut self) {
        let message = self.confirm_error();
        self.state.set_error(AccountField::ConfirmPassword, message);
    }

    /// Validate and persist the edits. Touched password fields engage the
    /// password-change rules; untouched ones keep the stored password. An
    /// input identical to the stored record writes nothing.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        accounts: &AccountService<S>,
    ) -> Result<SubmitOutcome<User>, DomainError> {
        self.state.clear_general_error();

        let Some(user) = accounts.current_user()? else {
            self.state.set_general_error("Nenhum usuário logado.");
            return Ok(SubmitOutcome::Blocked);
        };

        let mut errors = self.state.validate_all();
        let users = accounts.list_users()?;
        let email_error = validate_email_in_use(
            &users,
            self.state.value(AccountField::Email),
            &self.original_email,
        );
        errors.set(AccountField::Email, email_error.clone());
        self.state.set_error(AccountField::Email, email_error);
        let confirm_error = self.confirm_error();
        errors.set(AccountField::ConfirmPassword, confirm_error.clone());
        self.state.set_error(AccountField::ConfirmPassword, confirm_error);

        let attempted = self.password_change_attempted();
        let name = self.state.value(AccountField::Name).to_owned();
        let email = self.state.value(AccountField::Email).to_owned();
        if name == user.name && email == self.original_email && !attempted {
            return Ok(SubmitOutcome::Unchanged);
        }

        if attempted {
            let failure = validate_password_change(
                &user.password,
                self.state.value(AccountField::CurrentPassword),
                self.state.value(AccountField::NewPassword),
                self.state.value(AccountField::ConfirmPassword),
            );
            if let Some(failure) = failure {
                let message = failure.to_string();
                match failure {
                    PasswordChangeError::CurrentPasswordIncorrect => {
                        errors.set(AccountField::CurrentPassword, message);
                    }
                    PasswordChangeError::NewPasswordTooShort => {
                        errors.set(AccountField::NewPassword, message);
                    }
                    PasswordChangeError::ConfirmPasswordMismatch => {
                        errors.set(AccountField::ConfirmPassword, message);
                    }
                    PasswordChangeError::FieldsMissing => {
                        errors.set_general(message);
                    }
                }
            }
        }

        if errors.any() {
            self.state.set_errors(errors);
            return Ok(SubmitOutcome::Blocked);
        }

        let password = if attempted {
            self.state.value(AccountField::NewPassword).to_owned()
        } else {
            user.password.clone()
        };
        let patch = UserPatch {
            name: Some(name),
            email: Some(email.clone()),
            password: Some(password),
        };
        match accounts.update_current_user(&patch) {
            Ok(updated) => {
                self.original_email = email;
                self.state.set_value(AccountField::CurrentPassword, "");
                self.state.set_value(AccountField::NewPassword, "");
                self.state.set_value(AccountField::ConfirmPassword, "");
                Ok(SubmitOutcome::Saved(updated))
            }
            Err(error) => {
                route_service_error(&mut self.state, error)?;
                Ok(SubmitOutcome::Blocked)
            }
        }
    }

    /// Delete the account behind the confirmation dialog.
    ///
    /// A non-empty `password_confirmation` must match the stored credentials;
    /// an empty one skips the check and deletes outright.
    pub fn confirm_delete<S: KeyValueStore>(
        &mut self,
        accounts: &AccountService<S>,
        password_confirmation: &str,
    ) -> Result<SubmitOutcome<()>, DomainError> {
        if !password_confirmation.is_empty()
            && !accounts.is_valid_credentials(&self.original_email, password_confirmation)?
        {
            self.state.set_general_error("A senha atual está incorreta.");
            return Ok(SubmitOutcome::Blocked);
        }
        match accounts.delete_account() {
            Ok(()) => Ok(SubmitOutcome::Saved(())),
            Err(error) => {
                route_service_error(&mut self.state, error)?;
                Ok(SubmitOutcome::Blocked)
            }
        }
    }
}
