//! Field validators shared by the application's forms.
//!
//! Validators return the Portuguese message the form should display, or an
//! empty string when the value passes. Form state stores these strings
//! verbatim, so the empty string doubling as "no error" is part of the
//! contract.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::User;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: one @, a dot in the host part, a TLD of at
        // least two characters.
        Regex::new(r"^[^@]+@[^@]+\.[^@]{2,}$")
            .unwrap_or_else(|err| panic!("e-mail shape pattern must compile: {err}"))
    })
}

/// Requires a non-blank display name.
pub fn validate_name(value: &str) -> String {
    if value.trim().is_empty() {
        "Nome é obrigatório.".to_owned()
    } else {
        String::new()
    }
}

/// Requires a plausibly shaped e-mail address.
pub fn validate_email(value: &str) -> String {
    if email_regex().is_match(value) {
        String::new()
    } else {
        "E-mail inválido.".to_owned()
    }
}

/// Requires at least six characters for a new password.
pub fn validate_password(value: &str) -> String {
    if value.chars().count() < 6 {
        "A senha deve ter pelo menos 6 caracteres.".to_owned()
    } else {
        String::new()
    }
}

/// Login only checks that a password was typed; its shape is whatever the
/// account registered with.
pub fn validate_login_password(value: &str) -> String {
    if value.trim().is_empty() {
        "Senha é obrigatória.".to_owned()
    } else {
        String::new()
    }
}

/// Requires the confirmation to be present and to match the chosen password.
pub fn validate_confirm_password(value: &str, password: &str) -> String {
    if value.is_empty() {
        "Confirmação de senha é obrigatória.".to_owned()
    } else if value != password {
        "As senhas não coincidem.".to_owned()
    } else {
        String::new()
    }
}

/// Generic required-field check.
pub fn validate_not_empty(value: &str) -> String {
    if value.trim().is_empty() {
        "Campo obrigatório.".to_owned()
    } else {
        String::new()
    }
}

/// Requires eleven digits passing both CPF checksum passes.
pub fn validate_national_id(value: &str) -> String {
    if brdoc::cpf::validate(value).is_ok() {
        String::new()
    } else {
        "CPF inválido.".to_owned()
    }
}

/// Requires the full `(XX) XXXX-XXXX` or `(XX) XXXXX-XXXX` phone mask.
pub fn validate_phone(value: &str) -> String {
    if brdoc::phone::matches_shape(value) {
        String::new()
    } else {
        "Telefone inválido.".to_owned()
    }
}

/// Requires the full `XXXXX-XXX` CEP mask.
pub fn validate_postal_code(value: &str) -> String {
    if brdoc::cep::matches_shape(value) {
        String::new()
    } else {
        "CEP inválido.".to_owned()
    }
}

/// Requires a two-letter federative unit.
pub fn validate_state(value: &str) -> String {
    if brdoc::uf::matches_shape(value) {
        String::new()
    } else {
        "UF inválida.".to_owned()
    }
}

/// Password rules apply to the account form's new-password field only once
/// something was typed; leaving it blank means "keep the current password".
pub fn validate_optional_password(value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        validate_password(value)
    }
}

/// Reports whether `email` is malformed or already registered to another
/// account.
///
/// The record matching `exclude_email` is skipped so an account can keep its
/// own address while editing; pass an empty string when registering.
pub fn validate_email_in_use(users: &[User], email: &str, exclude_email: &str) -> String {
    let shape = validate_email(email);
    if !shape.is_empty() {
        return shape;
    }
    let taken = users
        .iter()
        .any(|user| user.email != exclude_email && user.email == email);
    if taken {
        "E-mail já cadastrado.".to_owned()
    } else {
        String::new()
    }
}

/// Outcomes of a rejected password change, one per form slot the account
/// form routes them to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeError {
    /// The typed current password does not match the stored one.
    CurrentPasswordIncorrect,
    /// At least one of the three password fields is blank.
    FieldsMissing,
    /// The replacement password is shorter than six characters.
    NewPasswordTooShort,
    /// The confirmation does not repeat the replacement password.
    ConfirmPasswordMismatch,
}

impl fmt::Display for PasswordChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::CurrentPasswordIncorrect => "A senha atual está incorreta.",
            Self::FieldsMissing => "Preencha todos os campos de senha.",
            Self::NewPasswordTooShort => "A nova senha deve ter pelo menos 6 caracteres.",
            Self::ConfirmPasswordMismatch => "As senhas não coincidem.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for PasswordChangeError {}

/// Validates a password change attempt against the stored password.
///
/// Checks run in the order the account form reports them: the current
/// password must match before anything else is considered.
pub fn validate_password_change(
    stored_password: &str,
    current: &str,
    new: &str,
    confirm: &str,
) -> Option<PasswordChangeError> {
    if current != stored_password {
        return Some(PasswordChangeError::CurrentPasswordIncorrect);
    }
    if current.trim().is_empty() || new.trim().is_empty() || confirm.trim().is_empty() {
        return Some(PasswordChangeError::FieldsMissing);
    }
    if new.chars().count() < 6 {
        return Some(PasswordChangeError::NewPasswordTooShort);
    }
    if confirm != new {
        return Some(PasswordChangeError::ConfirmPasswordMismatch);
    }
    None
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn user(email: &str) -> User {
        User {
            name: "Conta".to_owned(),
            email: email.to_owned(),
            password: "segredo1".to_owned(),
        }
    }

    #[rstest]
    #[case("ana@example.com", "")]
    #[case("a@b.co", "")]
    #[case("a@b.c", "E-mail inválido.")]
    #[case("ab.co", "E-mail inválido.")]
    #[case("a@b@c.co", "E-mail inválido.")]
    #[case("", "E-mail inválido.")]
    fn email_shape_matches_the_form_rule(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_email(value), expected);
    }

    #[rstest]
    #[case("abc123", "")]
    #[case("abcde", "A senha deve ter pelo menos 6 caracteres.")]
    #[case("", "A senha deve ter pelo menos 6 caracteres.")]
    fn password_requires_six_characters(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_password(value), expected);
    }

    #[rstest]
    #[case("qualquer", "")]
    #[case("   ", "Senha é obrigatória.")]
    #[case("", "Senha é obrigatória.")]
    fn login_password_only_requires_presence(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_login_password(value), expected);
    }

    #[rstest]
    #[case("abc123", "abc123", "")]
    #[case("", "abc123", "Confirmação de senha é obrigatória.")]
    #[case("abc124", "abc123", "As senhas não coincidem.")]
    fn confirmation_must_repeat_the_password(
        #[case] value: &str,
        #[case] password: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(validate_confirm_password(value, password), expected);
    }

    #[rstest]
    #[case("529.982.247-25", "")]
    #[case("529.982.247-26", "CPF inválido.")]
    #[case("529", "CPF inválido.")]
    fn national_id_runs_the_checksum(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_national_id(value), expected);
    }

    #[rstest]
    #[case("(11) 98765-4321", "")]
    #[case("(11) 3456-7890", "")]
    #[case("11987654321", "Telefone inválido.")]
    fn phone_requires_the_full_mask(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_phone(value), expected);
    }

    #[rstest]
    #[case("01310-100", "")]
    #[case("01310100", "CEP inválido.")]
    fn postal_code_requires_the_full_mask(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_postal_code(value), expected);
    }

    #[rstest]
    #[case("SP", "")]
    #[case("sp", "")]
    #[case("S1", "UF inválida.")]
    fn state_requires_two_letters(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_state(value), expected);
    }

    #[rstest]
    #[case("", "")]
    #[case("curta", "A senha deve ter pelo menos 6 caracteres.")]
    #[case("comprida1", "")]
    fn optional_password_skips_blank_input(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(validate_optional_password(value), expected);
    }

    #[rstest]
    fn email_in_use_skips_the_excluded_record() {
        let users = vec![user("ana@example.com"), user("bia@example.com")];
        assert_eq!(
            validate_email_in_use(&users, "bia@example.com", "ana@example.com"),
            "E-mail já cadastrado."
        );
        assert_eq!(
            validate_email_in_use(&users, "ana@example.com", "ana@example.com"),
            ""
        );
        assert_eq!(
            validate_email_in_use(&users, "novo@example.com", "ana@example.com"),
            ""
        );
        assert_eq!(
            validate_email_in_use(&users, "sem-arroba", "ana@example.com"),
            "E-mail inválido."
        );
    }

    #[rstest]
    #[case("errada", "nova123", "nova123", Some(PasswordChangeError::CurrentPasswordIncorrect))]
    #[case("", "nova123", "nova123", Some(PasswordChangeError::CurrentPasswordIncorrect))]
    #[case("segredo1", "", "", Some(PasswordChangeError::FieldsMissing))]
    #[case("segredo1", "nova123", "", Some(PasswordChangeError::FieldsMissing))]
    #[case("segredo1", "corta", "corta", Some(PasswordChangeError::NewPasswordTooShort))]
    #[case("segredo1", "nova123", "nova124", Some(PasswordChangeError::ConfirmPasswordMismatch))]
    #[case("segredo1", "nova123", "nova123", None)]
    fn password_change_reports_the_first_failure(
        #[case] current: &str,
        #[case] new: &str,
        #[case] confirm: &str,
        #[case] expected: Option<PasswordChangeError>,
    ) {
        assert_eq!(
            validate_password_change("segredo1", current, new, confirm),
            expected
        );
    }

    #[rstest]
    fn password_change_errors_render_their_messages() {
        assert_eq!(
            PasswordChangeError::CurrentPasswordIncorrect.to_string(),
            "A senha atual está incorreta."
        );
        assert_eq!(
            PasswordChangeError::NewPasswordTooShort.to_string(),
            "A nova senha deve ter pelo menos 6 caracteres."
        );
    }
}
