//! Port for resolving a formatted address to map coordinates.

use async_trait::async_trait;

use crate::domain::Coordinates;

use super::define_port_error;

define_port_error! {
    /// Errors raised by geocoder adapters.
    pub enum GeocoderError {
        /// The provider could not be reached or answered with a failure
        /// status.
        Unavailable { message: String } => "geocoder unavailable: {message}",
    }
}

/// Port for resolving a formatted address to coordinates.
///
/// `Ok(None)` means the provider answered but could not place the address.
/// Callers treat that as "no pin", not as a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `address` to coordinates, if the provider can place it.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocoderError>;
}

/// Fixture implementation that places nothing, for tests that do not
/// exercise geocoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGeocoder;

#[async_trait]
impl Geocoder for FixtureGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>, GeocoderError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_places_nothing() {
        let geocoder = FixtureGeocoder;
        let placed = geocoder
            .geocode("Avenida Paulista, 1578, São Paulo - SP")
            .await
            .expect("fixture geocode succeeds");
        assert!(placed.is_none());
    }

    #[rstest]
    fn unavailable_error_formats_message() {
        let err = GeocoderError::unavailable("timed out");
        assert!(err.to_string().contains("timed out"));
    }
}
