//! Session-bound CSRF tokens for the contact form.
//!
//! `GET /contact/token` opens a session: the server sets an HttpOnly
//! [`SESSION_COOKIE`] and answers the token the form must echo back in its
//! `_token` field. A submission passes only when the cookie and the token
//! belong together and the token has not expired. The token survives
//! rejected attempts so a user can fix validation errors, and is consumed
//! once a contact has been saved.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "contact_session";

/// A session id and the token bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfGrant {
    pub session_id: String,
    pub token: String,
}

#[derive(Debug, Clone)]
struct IssuedToken {
    token: String,
    issued_at: Instant,
}

/// Issued tokens, keyed by session id.
#[derive(Clone)]
pub struct CsrfTokens {
    sessions: Arc<RwLock<HashMap<String, IssuedToken>>>,
    ttl: Duration,
}

fn random_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl CsrfTokens {
    /// Create a token registry whose tokens expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Token for the caller's session.
    ///
    /// A known, unexpired session keeps its token, so several open forms
    /// share it. Any other session id, including one the caller made up, is
    /// replaced by a fresh session. Expired sessions are dropped on the way.
    pub fn issue(&self, session_id: Option<&str>) -> CsrfGrant {
        let now = Instant::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, issued| now.duration_since(issued.issued_at) < self.ttl);

        if let Some((id, issued)) = session_id.and_then(|id| sessions.get_key_value(id)) {
            return CsrfGrant {
                session_id: id.clone(),
                token: issued.token.clone(),
            };
        }

        let grant = CsrfGrant {
            session_id: random_id(),
            token: random_id(),
        };
        sessions.insert(
            grant.session_id.clone(),
            IssuedToken {
                token: grant.token.clone(),
                issued_at: now,
            },
        );
        grant
    }

    /// Whether `token` was issued to `session_id` and has not expired.
    pub fn is_valid(&self, session_id: Option<&str>, token: &str) -> bool {
        let session_id = match session_id {
            Some(id) if !id.is_empty() => id,
            _ => return false,
        };
        if token.is_empty() {
            return false;
        }

        let now = Instant::now();
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(session_id)
            .map(|issued| {
                issued.token == token && now.duration_since(issued.issued_at) < self.ttl
            })
            .unwrap_or(false)
    }

    /// Consume the token of a session.
    pub fn revoke(&self, session_id: &str) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
    }

    /// Number of sessions currently held (including expired ones not yet purged).
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CsrfTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfTokens")
            .field("ttl", &self.ttl)
            .field("sessions", &self.len())
            .finish()
    }
}
