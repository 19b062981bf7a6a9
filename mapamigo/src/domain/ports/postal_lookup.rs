//! Port for postal-code address lookups and the complete-CEP gate.

use async_trait::async_trait;

use super::define_port_error;

/// A complete eight-digit CEP, stripped of formatting.
///
/// Construction is the lookup gate: input that does not strip to exactly
/// eight digits is rejected, so adapters never see a partial code.
///
/// # Examples
/// ```
/// use mapamigo::domain::ports::CepDigits;
///
/// assert!(CepDigits::new("01310-100").is_some());
/// assert!(CepDigits::new("01310-10").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CepDigits(String);

impl CepDigits {
    /// Parse user input into a complete CEP, returning `None` while the code
    /// is still partial.
    pub fn new(input: &str) -> Option<Self> {
        brdoc::cep::digits(input).map(Self)
    }

    /// Bare digits, such as `01310100`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CepDigits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Street-level address data returned for a CEP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    /// Street name (logradouro).
    pub street: String,
    /// Neighbourhood (bairro).
    pub neighborhood: String,
    /// City (localidade).
    pub city: String,
    /// Two-letter federative unit (UF).
    pub state: String,
}

define_port_error! {
    /// Errors raised by postal lookup adapters.
    pub enum PostalLookupError {
        /// The provider does not know the code.
        NotFound => "CEP não encontrado",
        /// The provider could not be reached or answered with a failure
        /// status.
        Request { message: String } => "postal lookup request failed: {message}",
        /// The provider answered with a payload that could not be decoded.
        Decode { message: String } => "postal lookup response was invalid: {message}",
    }
}

/// Port for resolving a complete CEP to street-level address data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Resolve `cep` to an address.
    async fn fetch(&self, cep: &CepDigits) -> Result<PostalAddress, PostalLookupError>;
}

/// Fixture implementation that answers every lookup with a miss, for tests
/// that do not exercise address resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostalLookup;

#[async_trait]
impl PostalLookup for FixturePostalLookup {
    async fn fetch(&self, _cep: &CepDigits) -> Result<PostalAddress, PostalLookupError> {
        Err(PostalLookupError::not_found())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("01310-100", Some("01310100"))]
    #[case("01310100", Some("01310100"))]
    #[case("01310", None)]
    #[case("013101009", None)]
    #[case("", None)]
    fn cep_digits_require_exactly_eight(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            CepDigits::new(input).as_ref().map(CepDigits::as_str),
            expected
        );
    }

    #[rstest]
    fn cep_digits_display_bare_digits() {
        let cep = CepDigits::new("01310-100").expect("complete CEP parses");
        assert_eq!(cep.to_string(), "01310100");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_lookup_misses() {
        let lookup = FixturePostalLookup;
        let cep = CepDigits::new("01310100").expect("complete CEP parses");
        assert_eq!(
            lookup.fetch(&cep).await,
            Err(PostalLookupError::not_found())
        );
    }

    #[rstest]
    fn not_found_renders_the_user_facing_message() {
        assert_eq!(
            PostalLookupError::not_found().to_string(),
            "CEP não encontrado"
        );
    }
}
