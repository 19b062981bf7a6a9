//! Concrete form definitions and their submission flows.
//!
//! Each form pairs a compile-time field table (validators, maskers, required
//! flags) with the submission sequence the matching screen runs: bulk
//! validation, context checks the static table cannot express, and the store
//! call. Flows report domain rejections through the form's error slots and
//! only bubble internal faults to the caller.

mod account;
mod contact;
mod login;
mod register;

pub use account::{AccountField, AccountForm, AccountSchema};
pub use contact::{ContactField, ContactForm, ContactSchema};
pub use login::{LoginField, LoginForm, LoginSchema};
pub use register::{RegisterField, RegisterForm, RegisterSchema};

use crate::domain::form::{FormSchema, FormState};
use crate::domain::{DomainError, ErrorCode};

/// What a submission flow did with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// The store accepted the submission.
    Saved(T),
    /// Validation or a domain rule stopped it; the form holds the messages.
    Blocked,
    /// Nothing differed from the stored record, so no write happened.
    Unchanged,
}

/// Fold a service failure into the form's general slot. Internal faults are
/// not user-correctable and bubble instead.
fn route_service_error<S: FormSchema>(
    state: &mut FormState<S>,
    error: DomainError,
) -> Result<(), DomainError> {
    if error.code() == ErrorCode::InternalError {
        return Err(error);
    }
    state.set_general_error(error.message());
    Ok(())
}
