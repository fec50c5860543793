//! # Session State
//!
//! The authentication context shared by the API client and the app, and the session
//! phases the app moves through.
//!
//! ```text
//! Unauthenticated ──login──▶ Authenticating ──ok──▶ Syncing ──bootstrap──▶ Ready
//!        ▲                        │ err                                      │
//!        └────────────────────────┴──────── logout / SessionExpired ─────────┘
//! ```

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::UserInfo;
use tracing::{info, warn};

use crate::app::events::AppEvent;
use crate::cache::{CacheKey, LocalCache, Mirror};

/// Where the app is in its login/bootstrap lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Authenticating,
    /// Authenticated, stores are being fetched
    Syncing,
    Ready,
}

impl SessionPhase {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Syncing | SessionPhase::Ready)
    }
}

/// Token and user persisted under [`CacheKey::Auth`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

/// Bearer token holder, injected into the API client.
///
/// Lives as long as the [`crate::app::App`] that created it.
pub struct AuthContext {
    session: RwLock<Option<StoredSession>>,
    mirror: Mirror<StoredSession>,
    events: Sender<AppEvent>,
}

impl AuthContext {
    /// Create a context, resuming any session persisted in `cache`.
    pub fn new(cache: Arc<dyn LocalCache>, events: Sender<AppEvent>) -> Self {
        let mirror = Mirror::new(cache, CacheKey::Auth);
        let session = mirror.load();
        Self {
            session: RwLock::new(session),
            mirror,
            events,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.session.read().as_ref().and_then(|s| s.user.clone())
    }

    pub fn has_token(&self) -> bool {
        self.session.read().is_some()
    }

    /// Store a fresh session and persist it.
    pub fn set_session(&self, token: String, user: Option<UserInfo>) {
        let session = StoredSession { token, user };
        if let Err(e) = self.mirror.replace(&session) {
            warn!(error = %e, "Failed to persist session");
        }
        *self.session.write() = Some(session);
    }

    /// Attach the user profile to the current session.
    pub fn set_user(&self, user: UserInfo) {
        let mut guard = self.session.write();
        if let Some(session) = guard.as_mut() {
            session.user = Some(user);
            if let Err(e) = self.mirror.replace(session) {
                warn!(error = %e, "Failed to persist session");
            }
        }
    }

    /// Forget the session in memory and on disk.
    pub fn clear(&self) {
        *self.session.write() = None;
        if let Err(e) = self.mirror.clear() {
            warn!(error = %e, "Failed to remove persisted session");
        }
    }

    /// Clear the session after the server rejected it and notify the app.
    pub fn expire(&self) {
        let had_session = self.session.read().is_some();
        self.clear();
        if had_session {
            info!("Session expired, auth state cleared");
            let _ = self.events.try_send(AppEvent::SessionExpired);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            username: "farmer".to_string(),
            email: "farmer@example.com".to_string(),
        }
    }

    #[test]
    fn test_session_persists_across_contexts() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        let (tx, _rx) = async_channel::unbounded();

        let first = AuthContext::new(cache.clone(), tx.clone());
        assert!(!first.has_token());
        first.set_session("tok".to_string(), Some(user()));

        let second = AuthContext::new(cache, tx);
        assert_eq!(second.token().as_deref(), Some("tok"));
        assert_eq!(second.user(), Some(user()));
    }

    #[test]
    fn test_expire_clears_and_notifies_once() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        let (tx, rx) = async_channel::unbounded();
        let auth = AuthContext::new(cache.clone(), tx);
        auth.set_session("tok".to_string(), None);

        auth.expire();
        auth.expire();

        assert!(!auth.has_token());
        assert_eq!(cache.read(CacheKey::Auth).unwrap(), None);
        assert_eq!(rx.try_recv(), Ok(AppEvent::SessionExpired));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_phase_authentication() {
        assert!(!SessionPhase::Authenticating.is_authenticated());
        assert!(SessionPhase::Syncing.is_authenticated());
        assert!(SessionPhase::Ready.is_authenticated());
    }
}
