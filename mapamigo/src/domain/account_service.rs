//! Account registry and session service.
//!
//! Accounts live in a single JSON array under one storage key; the session is
//! a full copy of the logged-in user's record under a second key, mirroring
//! the storage layout the original browser application established. The
//! session copy is refreshed on every account update so the two never drift.

use std::sync::Arc;

use crate::domain::ports::{KeyValueStore, StorageError};
use crate::domain::{ContactService, DomainError, OwnerId, User, UserPatch};

/// Storage key holding the JSON array of registered users.
pub const USERS_KEY: &str = "mapamigo_users";
/// Storage key holding the JSON copy of the logged-in user.
pub const CURRENT_USER_KEY: &str = "mapamigo_current_user";

/// Account registry and session service over a key-value store.
///
/// Deleting an account cascades into the owner's contact partition, so the
/// service owns a [`ContactService`] sharing the same store.
#[derive(Clone)]
pub struct AccountService<S> {
    store: Arc<S>,
    contacts: ContactService<S>,
}

impl<S> AccountService<S> {
    /// Create a new service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            contacts: ContactService::new(Arc::clone(&store)),
            store,
        }
    }

    /// The contact service sharing this store.
    pub fn contacts(&self) -> &ContactService<S> {
        &self.contacts
    }
}

impl<S: KeyValueStore> AccountService<S> {
    fn map_storage_error(error: StorageError) -> DomainError {
        DomainError::internal(format!("account storage failed: {error}"))
    }

    /// Every registered user, in registration order.
    pub fn list_users(&self) -> Result<Vec<User>, DomainError> {
        match self
            .store
            .get(USERS_KEY)
            .map_err(Self::map_storage_error)?
        {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                DomainError::internal(format!("stored user list is invalid: {err}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_users(&self, users: &[User]) -> Result<(), DomainError> {
        let raw = serde_json::to_string(users).map_err(|err| {
            DomainError::internal(format!("user list failed to serialize: {err}"))
        })?;
        self.store
            .set(USERS_KEY, &raw)
            .map_err(Self::map_storage_error)
    }

    /// Register `user`, rejecting an e-mail address that is already taken.
    pub fn create_user(&self, user: User) -> Result<(), DomainError> {
        let mut users = self.list_users()?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(DomainError::conflict("E-mail já cadastrado."));
        }
        users.push(user);
        self.save_users(&users)
    }

    /// The logged-in user, if a session exists.
    pub fn current_user(&self) -> Result<Option<User>, DomainError> {
        match self
            .store
            .get(CURRENT_USER_KEY)
            .map_err(Self::map_storage_error)?
        {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|err| {
                DomainError::internal(format!("stored session is invalid: {err}"))
            }),
            None => Ok(None),
        }
    }

    fn save_current_user(&self, user: &User) -> Result<(), DomainError> {
        let raw = serde_json::to_string(user)
            .map_err(|err| DomainError::internal(format!("session failed to serialize: {err}")))?;
        self.store
            .set(CURRENT_USER_KEY, &raw)
            .map_err(Self::map_storage_error)
    }

    /// Apply `patch` to the logged-in user, updating the registry row and
    /// refreshing the session copy. Returns the updated record.
    ///
    /// The registry row is located by the session's e-mail address, so a row
    /// removed behind the session's back surfaces as not-found.
    pub fn update_current_user(&self, patch: &UserPatch) -> Result<User, DomainError> {
        let Some(current) = self.current_user()? else {
            return Err(DomainError::unauthorized("Nenhum usuário logado."));
        };
        let mut users = self.list_users()?;
        let Some(row) = users.iter_mut().find(|user| user.email == current.email) else {
            return Err(DomainError::not_found("Usuário não encontrado."));
        };
        let updated = current.merged(patch);
        *row = updated.clone();
        self.save_users(&users)?;
        self.save_current_user(&updated)?;
        Ok(updated)
    }

    /// Delete the logged-in account: registry row, contact partition, and
    /// session, in that order.
    pub fn delete_account(&self) -> Result<(), DomainError> {
        let Some(current) = self.current_user()? else {
            return Err(DomainError::unauthorized("Nenhum usuário logado."));
        };
        let mut users = self.list_users()?;
        users.retain(|user| user.email != current.email);
        self.save_users(&users)?;
        self.contacts.delete_all_contacts(&OwnerId::from(&current))?;
        self.logout()
    }

    /// Exact-match login. On success the session copy is written and the
    /// matched record returned; the failure message never says which of the
    /// two credentials was wrong.
    pub fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let users = self.list_users()?;
        let Some(user) = users
            .iter()
            .find(|user| user.email == email && user.password == password)
        else {
            return Err(DomainError::unauthorized("E-mail ou senha inválidos."));
        };
        self.save_current_user(user)?;
        Ok(user.clone())
    }

    /// Drop the session, if any.
    pub fn logout(&self) -> Result<(), DomainError> {
        self.store
            .remove(CURRENT_USER_KEY)
            .map_err(Self::map_storage_error)
    }

    /// `true` when `email` and `password` exactly match a registered user.
    pub fn is_valid_credentials(&self, email: &str, password: &str) -> Result<bool, DomainError> {
        let users = self.list_users()?;
        Ok(users
            .iter()
            .any(|user| user.email == email && user.password == password))
    }
}
