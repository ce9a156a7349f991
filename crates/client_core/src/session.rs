//! Process-wide authentication state, modeled as an explicit injectable
//! context rather than ambient globals. Written on successful login,
//! attached to every API call, cleared on logout. Expiry handling is owned
//! by the backend.

use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Default)]
pub struct SessionContext {
    inner: RwLock<Option<SessionToken>>,
}

impl SessionContext {
    /// An unauthenticated session (app start without a persisted token).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a previously persisted token at app start.
    pub fn restore(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(SessionToken {
                token: token.into(),
                username: username.into(),
            })),
        }
    }

    pub fn begin(&self, token: impl Into<String>, username: impl Into<String>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(SessionToken {
            token: token.into(),
            username: username.into(),
        });
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read().map(|s| s.token)
    }

    pub fn username(&self) -> Option<String> {
        self.read().map(|s| s.username)
    }

    fn read(&self) -> Option<SessionToken> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
