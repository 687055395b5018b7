//! Session Store
//!
//! Holds the simulated logged-in user. There is no server: login and signup
//! always succeed once the required fields are present, and the resulting
//! [`User`] is persisted under [`USER_KEY`] so it survives a reload.
//!
//! Frontends wait [`DEFAULT_AUTH_LATENCY`] (or the configured latency) before
//! calling [`SessionStore::login`] / [`SessionStore::signup`] to mimic a
//! network round trip.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError, USER_KEY};

/// Simulated sign-in round trip
pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(500);

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Build a user with a fresh id and a generated avatar
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            avatar: Some(avatar_url(&email)),
            name: name.into(),
            email,
        }
    }

    /// Avatar URL, or the placeholder image when none was generated
    pub fn avatar_or_placeholder(&self) -> &str {
        self.avatar.as_deref().unwrap_or("/placeholder.svg")
    }
}

/// Avatar image URL seeded by the email address
pub fn avatar_url(email: &str) -> String {
    format!("{}{}", AVATAR_BASE, urlencoding::encode(email))
}

/// Display name derived from an email address: its local part
pub fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Required form fields were left empty
    #[error("{0}")]
    MissingFields(&'static str),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Check the login form: email and password are required
pub fn validate_login(email: &str, password: &str) -> SessionResult<()> {
    if is_blank(email) || is_blank(password) {
        return Err(SessionError::MissingFields("Email and password are required"));
    }
    Ok(())
}

/// Check the signup form: every field is required
pub fn validate_signup(email: &str, name: &str, password: &str) -> SessionResult<()> {
    if is_blank(name) || is_blank(email) || is_blank(password) {
        return Err(SessionError::MissingFields("All fields are required"));
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Simulated authentication state over a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    user: Option<User>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Restore the session from storage
    ///
    /// A stored record that does not parse is logged and ignored.
    pub fn restore(storage: S) -> Self {
        let user = match storage.get_json::<User>(USER_KEY) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse saved user");
                None
            }
        };

        if let Some(user) = &user {
            tracing::debug!(user_id = %user.id, "Restored session");
        }

        Self { storage, user }
    }

    /// Currently signed-in user
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in; any non-empty email and password are accepted
    ///
    /// The display name is the local part of the email.
    pub fn login(&mut self, email: &str, password: &str) -> SessionResult<&User> {
        validate_login(email, password)?;
        let email = email.trim();
        let user = User::new(email, name_from_email(email));
        self.commit(user)
    }

    /// Create an account; any non-empty fields are accepted
    pub fn signup(&mut self, email: &str, name: &str, password: &str) -> SessionResult<&User> {
        validate_signup(email, name, password)?;
        let user = User::new(email.trim(), name.trim());
        self.commit(user)
    }

    /// Sign out and forget the stored record
    ///
    /// A failed removal leaves the session signed in.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.storage.remove(USER_KEY)?;
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "Logged out");
        }
        Ok(())
    }

    fn commit(&mut self, user: User) -> SessionResult<&User> {
        self.storage.set_json(USER_KEY, &user)?;
        tracing::info!(user_id = %user.id, email = %user.email, "Signed in");
        let user: &User = self.user.insert(user);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FlakyStore;
    use crate::storage::MemoryStore;

    #[test]
    fn test_login_derives_name_and_avatar() {
        let mut session = SessionStore::restore(MemoryStore::new());
        let user = session.login("jane.doe@example.com", "hunter2").unwrap();

        assert_eq!(user.name, "jane.doe");
        assert_eq!(user.email, "jane.doe@example.com");
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=jane.doe%40example.com")
        );
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_signup_keeps_name_and_unique_ids() {
        let mut session = SessionStore::restore(MemoryStore::new());

        let first = session
            .signup("ana@example.com", "Ana", "pw")
            .unwrap()
            .clone();
        let second = session
            .signup("ana@example.com", "Ana", "pw")
            .unwrap()
            .clone();

        assert_eq!(first.name, "Ana");
        assert_eq!(second.name, "Ana");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_login_requires_fields() {
        let mut session = SessionStore::restore(MemoryStore::new());

        let err = session.login("", "pw").unwrap_err();
        assert_eq!(err.to_string(), "Email and password are required");

        let err = session.login("a@b.c", "   ").unwrap_err();
        assert!(matches!(err, SessionError::MissingFields(_)));

        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_signup_requires_all_fields() {
        let mut session = SessionStore::restore(MemoryStore::new());

        let err = session.signup("a@b.c", "", "pw").unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
        assert!(session.user().is_none());
    }

    #[test]
    fn test_session_survives_restore() {
        let storage = MemoryStore::new();

        let user_id = {
            let mut session = SessionStore::restore(storage.clone());
            session.login("kim@example.com", "pw").unwrap().id.clone()
        };

        let session = SessionStore::restore(storage);
        assert_eq!(session.user().map(|u| u.id.as_str()), Some(user_id.as_str()));
    }

    #[test]
    fn test_logout_clears_storage() {
        let storage = MemoryStore::new();
        let mut session = SessionStore::restore(storage.clone());
        session.login("kim@example.com", "pw").unwrap();

        session.logout().unwrap();

        assert!(session.user().is_none());
        assert!(storage.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_failed_logout_keeps_user() {
        let storage = FlakyStore::new();
        let mut session = SessionStore::restore(storage.clone());
        session.login("kim@example.com", "pw").unwrap();
        storage.reject_writes(true);

        assert!(matches!(
            session.logout(),
            Err(SessionError::Storage(StorageError::Unavailable(_)))
        ));
        assert!(session.is_authenticated());
        assert!(SessionStore::restore(storage.clone()).is_authenticated());

        storage.reject_writes(false);
        session.logout().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_failed_login_stays_signed_out() {
        let storage = FlakyStore::new();
        storage.reject_writes(true);
        let mut session = SessionStore::restore(storage);

        assert!(session.login("kim@example.com", "pw").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_restore_ignores_corrupt_record() {
        let storage = MemoryStore::new();
        storage.set(USER_KEY, "{\"id\": 42").unwrap();

        let session = SessionStore::restore(storage);
        assert!(session.user().is_none());
    }

    #[test]
    fn test_avatar_field_optional_in_storage() {
        let storage = MemoryStore::new();
        storage
            .set(USER_KEY, r#"{"id":"0.42","email":"a@b.c","name":"a"}"#)
            .unwrap();

        let session = SessionStore::restore(storage);
        let user = session.user().unwrap();
        assert!(user.avatar.is_none());
        assert_eq!(user.avatar_or_placeholder(), "/placeholder.svg");
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("solo"), "solo");
        assert_eq!(name_from_email("x@y@z"), "x");
        assert_eq!(name_from_email(""), "");
    }
}
