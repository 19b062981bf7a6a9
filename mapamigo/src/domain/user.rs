//! Account data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registered account holder.
///
/// Fields hold exactly what the registration form captured. Shape rules live
/// in the form validators so that records stored by earlier versions of the
/// application always load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name, capitalised by the registration form.
    pub name: String,
    /// E-mail address, doubling as the account identifier.
    pub email: String,
    /// Password as captured; login compares it byte for byte.
    pub password: String,
}

impl User {
    /// Copy with the populated patch fields replacing the current values.
    pub fn merged(&self, patch: &UserPatch) -> Self {
        Self {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            password: patch
                .password
                .clone()
                .unwrap_or_else(|| self.password.clone()),
        }
    }
}

/// Partial update applied to the logged-in account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement display name, when present.
    pub name: Option<String>,
    /// Replacement e-mail address, when present.
    pub email: Option<String>,
    /// Replacement password, when present.
    pub password: Option<String>,
}

/// Identifies whose contact partition a storage key belongs to.
///
/// Owners are identified by e-mail address, so changing an account's e-mail
/// moves it to a fresh, empty partition while the old one stays behind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wrap an owner e-mail address.
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// The owner's e-mail address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&User> for OwnerId {
    fn from(user: &User) -> Self {
        Self(user.email.clone())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn sample_user() -> User {
        User {
            name: "Ana Souza".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "segredo1".to_owned(),
        }
    }

    #[rstest]
    fn stored_records_round_trip() {
        let stored = json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "password": "segredo1",
        });
        let user: User = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(user, sample_user());
        assert_eq!(serde_json::to_value(&user).unwrap(), stored);
    }

    #[rstest]
    fn merged_replaces_only_populated_fields() {
        let patch = UserPatch {
            email: Some("ana.souza@example.com".to_owned()),
            ..UserPatch::default()
        };
        let merged = sample_user().merged(&patch);
        assert_eq!(merged.email, "ana.souza@example.com");
        assert_eq!(merged.name, "Ana Souza");
        assert_eq!(merged.password, "segredo1");
    }

    #[rstest]
    fn owner_id_tracks_the_user_email() {
        let owner = OwnerId::from(&sample_user());
        assert_eq!(owner.as_str(), "ana@example.com");
        assert_eq!(owner.to_string(), "ana@example.com");
    }
}
