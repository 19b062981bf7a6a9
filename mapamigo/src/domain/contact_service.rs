//! Contact store partitioned per account owner.
//!
//! Each owner's contacts live as one JSON array under a key derived from the
//! owner's e-mail address. Records keep their insertion order; national IDs
//! are stored masked and compared masked.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::ports::{KeyValueStore, StorageError};
use crate::domain::{Contact, ContactId, ContactPatch, DomainError, OwnerId};

/// Prefix of every contact partition key; the owner's e-mail completes it.
pub const CONTACTS_KEY_PREFIX: &str = "contacts_";

fn partition_key(owner: &OwnerId) -> String {
    format!("{CONTACTS_KEY_PREFIX}{owner}")
}

/// Contact store over a key-value store, one partition per owner.
#[derive(Clone)]
pub struct ContactService<S> {
    store: Arc<S>,
}

impl<S> ContactService<S> {
    /// Create a new service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> ContactService<S> {
    fn map_storage_error(error: StorageError) -> DomainError {
        DomainError::internal(format!("contact storage failed: {error}"))
    }

    /// Every contact in `owner`'s partition, in insertion order.
    pub fn list_contacts(&self, owner: &OwnerId) -> Result<Vec<Contact>, DomainError> {
        match self
            .store
            .get(&partition_key(owner))
            .map_err(Self::map_storage_error)?
        {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                DomainError::internal(format!("stored contact list is invalid: {err}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_contacts(&self, owner: &OwnerId, contacts: &[Contact]) -> Result<(), DomainError> {
        let raw = serde_json::to_string(contacts).map_err(|err| {
            DomainError::internal(format!("contact list failed to serialize: {err}"))
        })?;
        self.store
            .set(&partition_key(owner), &raw)
            .map_err(Self::map_storage_error)
    }

    /// Contact with `id`, if present.
    pub fn get_contact_by_id(
        &self,
        owner: &OwnerId,
        id: ContactId,
    ) -> Result<Option<Contact>, DomainError> {
        Ok(self
            .list_contacts(owner)?
            .into_iter()
            .find(|contact| contact.id == id))
    }

    /// Contact whose masked national ID equals `national_id`, if present.
    pub fn get_contact_by_national_id(
        &self,
        owner: &OwnerId,
        national_id: &str,
    ) -> Result<Option<Contact>, DomainError> {
        Ok(self
            .list_contacts(owner)?
            .into_iter()
            .find(|contact| contact.national_id == national_id))
    }

    /// Append `contact` to the partition.
    ///
    /// A contact sharing a national ID with an existing one leaves the
    /// partition untouched. Callers wanting feedback on the collision check
    /// [`ContactService::get_contact_by_national_id`] first.
    pub fn create_contact(&self, owner: &OwnerId, contact: Contact) -> Result<(), DomainError> {
        let mut contacts = self.list_contacts(owner)?;
        if contacts
            .iter()
            .any(|existing| existing.national_id == contact.national_id)
        {
            debug!(owner = %owner, "duplicate national ID, partition left unchanged");
            return Ok(());
        }
        contacts.push(contact);
        self.save_contacts(owner, &contacts)
    }

    /// Apply `patch` to the contact with `id`, returning the updated record.
    ///
    /// Moving the national ID onto a value another contact already holds is a
    /// conflict; the offending field travels in the error details.
    pub fn update_contact(
        &self,
        owner: &OwnerId,
        id: ContactId,
        patch: &ContactPatch,
    ) -> Result<Contact, DomainError> {
        let mut contacts = self.list_contacts(owner)?;
        let Some(index) = contacts.iter().position(|contact| contact.id == id) else {
            return Err(DomainError::not_found("Contato não encontrado"));
        };
        if let Some(national_id) = patch.national_id.as_deref() {
            let taken = contacts
                .iter()
                .any(|contact| contact.id != id && contact.national_id == national_id);
            if taken {
                return Err(DomainError::conflict("Outro contato já possui este CPF")
                    .with_details(json!({ "field": "nationalId" })));
            }
        }
        let updated = contacts[index].merged(patch);
        contacts[index] = updated.clone();
        self.save_contacts(owner, &contacts)?;
        Ok(updated)
    }

    /// Remove the contact with `id`. Removing an absent contact is a no-op.
    pub fn delete_contact(&self, owner: &OwnerId, id: ContactId) -> Result<(), DomainError> {
        let mut contacts = self.list_contacts(owner)?;
        contacts.retain(|contact| contact.id != id);
        self.save_contacts(owner, &contacts)
    }

    /// Drop the owner's whole partition.
    pub fn delete_all_contacts(&self, owner: &OwnerId) -> Result<(), DomainError> {
        self.store
            .remove(&partition_key(owner))
            .map_err(Self::map_storage_error)
    }
}
