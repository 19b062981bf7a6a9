//! Contact data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`ContactId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactIdError {
    InvalidId,
}

impl fmt::Display for ContactIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "contact id must be a valid UUID"),
        }
    }
}

impl std::error::Error for ContactIdError {}

/// Stable contact identifier stored as a UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(Uuid);

impl ContactId {
    /// Generate a new random [`ContactId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validate and construct a [`ContactId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ContactIdError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ContactIdError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ContactId> for String {
    fn from(value: ContactId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ContactId {
    type Error = ContactIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Address-book entry owned by a single account.
///
/// Serialises with the camelCase field names the stored JSON uses, so
/// partitions written by earlier versions of the application load unchanged.
/// Text fields keep their display masks; `national_id` in particular is
/// compared masked when duplicates are checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stable identifier assigned at creation.
    pub id: ContactId,
    /// Display name, capitalised by the contact form.
    pub name: String,
    /// Masked CPF, unique within the owner's partition.
    pub national_id: String,
    /// Masked phone number.
    pub phone: String,
    /// Masked CEP.
    pub postal_code: String,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Free-form complement; empty when the form left it blank.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub complement: String,
    /// Neighbourhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter federative unit.
    pub state: String,
    /// Latitude of the map pin.
    pub latitude: f64,
    /// Longitude of the map pin.
    pub longitude: f64,
}

impl Contact {
    /// Copy with the populated patch fields replacing the current values.
    pub fn merged(&self, patch: &ContactPatch) -> Self {
        let field = |patched: &Option<String>, current: &str| {
            patched.clone().unwrap_or_else(|| current.to_owned())
        };
        Self {
            id: self.id,
            name: field(&patch.name, &self.name),
            national_id: field(&patch.national_id, &self.national_id),
            phone: field(&patch.phone, &self.phone),
            postal_code: field(&patch.postal_code, &self.postal_code),
            street: field(&patch.street, &self.street),
            number: field(&patch.number, &self.number),
            complement: field(&patch.complement, &self.complement),
            neighborhood: field(&patch.neighborhood, &self.neighborhood),
            city: field(&patch.city, &self.city),
            state: field(&patch.state, &self.state),
            latitude: patch.latitude.unwrap_or(self.latitude),
            longitude: patch.longitude.unwrap_or(self.longitude),
        }
    }
}

/// Partial update applied to an existing contact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    /// Replacement display name, when present.
    pub name: Option<String>,
    /// Replacement masked CPF, when present.
    pub national_id: Option<String>,
    /// Replacement masked phone number, when present.
    pub phone: Option<String>,
    /// Replacement masked CEP, when present.
    pub postal_code: Option<String>,
    /// Replacement street name, when present.
    pub street: Option<String>,
    /// Replacement street number, when present.
    pub number: Option<String>,
    /// Replacement complement, when present.
    pub complement: Option<String>,
    /// Replacement neighbourhood, when present.
    pub neighborhood: Option<String>,
    /// Replacement city, when present.
    pub city: Option<String>,
    /// Replacement federative unit, when present.
    pub state: Option<String>,
    /// Replacement latitude, when present.
    pub latitude: Option<f64>,
    /// Replacement longitude, when present.
    pub longitude: Option<f64>,
}
