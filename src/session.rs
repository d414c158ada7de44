//! Session holder
//!
//! Holds the identity of the authenticated user. A fresh [`SessionStore`]
//! starts with no session; the process-wide instance is reached through
//! [`ClientContext::global`](crate::ClientContext::global).

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

static GLOBAL_SESSION: LazyLock<Arc<SessionStore>> = LazyLock::new(|| Arc::new(SessionStore::new()));

/// Opaque authenticated-user record, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(serde_json::Value);

impl Identity {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// The `email` field, if the backend sent one.
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(|v| v.as_str())
    }
}

impl From<serde_json::Value> for Identity {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    user: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub const fn new() -> Self {
        Self {
            user: RwLock::new(None),
        }
    }

    /// Replaces the held identity unconditionally.
    pub fn set_user(&self, identity: Identity) {
        let mut guard = self.user.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(identity);

        #[cfg(feature = "tracing")]
        tracing::debug!("Session started");
    }

    /// Returns the current identity, or `None` when there is no session.
    pub fn get_user(&self) -> Option<Identity> {
        let guard = self.user.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let guard = self.user.read().unwrap_or_else(PoisonError::into_inner);
        guard.is_some()
    }

    /// Ends the session. Idempotent.
    pub fn clear(&self) {
        let mut guard = self.user.write().unwrap_or_else(PoisonError::into_inner);
        let _had_session = guard.take().is_some();

        #[cfg(feature = "tracing")]
        {
            if _had_session {
                tracing::debug!("Session cleared");
            }
        }
    }
}

/// Returns the process-wide session store.
pub(crate) fn global() -> Arc<SessionStore> {
    Arc::clone(&GLOBAL_SESSION)
}
