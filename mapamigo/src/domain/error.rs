//! Domain-level error types.
//!
//! These errors are transport agnostic. Drivers map them to terminal output,
//! form error slots, or any other presentation-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// The request collides with existing state, such as a duplicated
    /// e-mail address or national ID.
    Conflict,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use mapamigo::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "DomainErrorDto", into = "DomainErrorDto")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for DomainErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for DomainErrorValidationError {}

impl DomainError {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to the person using the application.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for drivers.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use mapamigo::domain::{DomainError, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = DomainError::new(ErrorCode::InvalidRequest, "bad")
    ///     .with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DomainError> for DomainErrorDto {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<DomainErrorDto> for DomainError {
    type Error = DomainErrorValidationError;

    fn try_from(value: DomainErrorDto) -> Result<Self, Self::Error> {
        let DomainErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = DomainError::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "invalid_request")]
    #[case(ErrorCode::Unauthorized, "unauthorized")]
    #[case(ErrorCode::NotFound, "not_found")]
    #[case(ErrorCode::Conflict, "conflict")]
    #[case(ErrorCode::InternalError, "internal_error")]
    fn error_codes_serialise_as_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
        assert_eq!(json!(code), json!(expected));
    }

    #[rstest]
    fn try_new_rejects_blank_messages() {
        assert_eq!(
            DomainError::try_new(ErrorCode::InternalError, "   "),
            Err(DomainErrorValidationError::EmptyMessage)
        );
    }

    #[rstest]
    fn details_survive_a_serde_round_trip() {
        let error = DomainError::conflict("Outro contato já possui este CPF")
            .with_details(json!({ "field": "nationalId" }));
        let encoded = serde_json::to_string(&error).unwrap();
        let decoded: DomainError = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, error);
        assert_eq!(decoded.details(), Some(&json!({ "field": "nationalId" })));
    }

    #[rstest]
    fn display_renders_the_message() {
        let error = DomainError::unauthorized("E-mail ou senha inválidos.");
        assert_eq!(error.to_string(), "E-mail ou senha inválidos.");
    }
}
