//! Map coordinates and the single-line address format.

use serde::{Deserialize, Serialize};

/// Geographic coordinates for a contact's map pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Formats the single-line address handed to the geocoder and shown on the
/// map: `street, number, city - state`.
///
/// Returns `None` unless all four parts are non-blank, so partially filled
/// forms never reach the geocoder.
pub fn full_address(street: &str, number: &str, city: &str, state: &str) -> Option<String> {
    let complete = [street, number, city, state]
        .iter()
        .all(|part| !part.trim().is_empty());
    complete.then(|| format!("{street}, {number}, {city} - {state}"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn formats_all_four_parts() {
        assert_eq!(
            full_address("Avenida Paulista", "1578", "São Paulo", "SP").as_deref(),
            Some("Avenida Paulista, 1578, São Paulo - SP")
        );
    }

    #[rstest]
    #[case("", "1578", "São Paulo", "SP")]
    #[case("Avenida Paulista", "   ", "São Paulo", "SP")]
    #[case("Avenida Paulista", "1578", "", "SP")]
    #[case("Avenida Paulista", "1578", "São Paulo", "")]
    fn blank_parts_yield_no_address(
        #[case] street: &str,
        #[case] number: &str,
        #[case] city: &str,
        #[case] state: &str,
    ) {
        assert_eq!(full_address(street, number, city, state), None);
    }

    #[rstest]
    fn untrimmed_parts_keep_their_spacing() {
        assert_eq!(
            full_address("Rua A ", "10", "Niterói", "RJ").as_deref(),
            Some("Rua A , 10, Niterói - RJ")
        );
    }
}
