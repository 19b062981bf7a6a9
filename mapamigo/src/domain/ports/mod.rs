//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geocoder;
mod key_value_store;
mod postal_lookup;

#[cfg(test)]
pub use geocoder::MockGeocoder;
pub use geocoder::{FixtureGeocoder, Geocoder, GeocoderError};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{FixtureKeyValueStore, KeyValueStore, StorageError};
#[cfg(test)]
pub use postal_lookup::MockPostalLookup;
pub use postal_lookup::{
    CepDigits, FixturePostalLookup, PostalAddress, PostalLookup, PostalLookupError,
};
