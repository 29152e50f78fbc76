//! Persisted auth session for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login/register is the single writer ([`SessionStore`]); every controller
//! that authorizes requests holds a [`SessionReader`]. The three stored keys
//! (`token`, `user`, `userType`) are written and cleared together, and a
//! partially present set reads as no session.
//!
//! A token is trusted until the server rejects it; there is no expiry or
//! refresh logic on the client.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use super::storage::KeyValueStorage;
use crate::error::ClientError;
use crate::net::types::{AuthResponse, User, UserType};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const USER_TYPE_KEY: &str = "userType";

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub user_type: UserType,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        let user_type = response.user.user_type;
        Self { token: response.token, user: response.user, user_type }
    }
}

/// Single writer of the persisted session.
pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the user cannot be serialized or the
    /// write fails.
    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        let user = serde_json::to_string(&session.user).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set_all(&[
            (TOKEN_KEY, session.token.clone()),
            (USER_KEY, user),
            (USER_TYPE_KEY, session.user_type.as_str().to_owned()),
        ])?;
        tracing::info!(user_type = session.user_type.as_str(), "session saved");
        Ok(())
    }

    pub fn read(&self) -> Option<Session> {
        read_session(self.storage.as_ref())
    }

    /// Remove the persisted session (logout).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the write fails.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.storage.remove_all(&[TOKEN_KEY, USER_KEY, USER_TYPE_KEY])?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader { storage: Rc::clone(&self.storage) }
    }
}

/// Read-only view of the session handed to every authorized component.
#[derive(Clone)]
pub struct SessionReader {
    storage: Rc<dyn KeyValueStorage>,
}

impl SessionReader {
    pub fn read(&self) -> Option<Session> {
        read_session(self.storage.as_ref())
    }

    /// Bearer token of the current session, if any.
    pub fn token(&self) -> Option<String> {
        self.read().map(|session| session.token)
    }
}

fn read_session(storage: &dyn KeyValueStorage) -> Option<Session> {
    match load_session(storage) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "session unreadable; treating as logged out");
            None
        }
    }
}

fn load_session(storage: &dyn KeyValueStorage) -> Result<Option<Session>, ClientError> {
    let token = storage.get(TOKEN_KEY)?;
    let user = storage.get(USER_KEY)?;
    let user_type = storage.get(USER_TYPE_KEY)?;

    let (Some(token), Some(user), Some(user_type)) = (token, user, user_type) else {
        return Ok(None);
    };
    if token.is_empty() {
        return Ok(None);
    }
    let Some(user_type) = UserType::parse(&user_type) else {
        tracing::warn!(%user_type, "unknown stored user type");
        return Ok(None);
    };
    let user: User = serde_json::from_str(&user).map_err(|e| ClientError::Storage(e.to_string()))?;
    Ok(Some(Session { token, user, user_type }))
}
