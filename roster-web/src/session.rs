//! Signed-in sessions, keyed by an opaque cookie token.
//!
//! Each browser that signs in gets a random token in an HttpOnly cookie. The
//! token maps to a [`SessionContext`]: the identity-provider session plus that
//! user's [`StudentsScreen`], whose record store is authorized as the session.
//! The screen sits behind an async mutex so one user's actions apply in order.
//!
//! Contexts idle for longer than the registry's idle TTL are swept on the next
//! sign-in, as are sessions whose identity-provider token has expired.

use crate::screens::StudentsScreen;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use roster_gateway::{Backend, Session};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "roster_session";

/// How long a session may go without a request before it is released.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the session cookie from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
            .map(|(_, value)| Self(value.to_string()))
    }

    /// `Set-Cookie` value that stores this token.
    pub fn set_cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.0)
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

pub struct SessionContext {
    pub session: Session,
    pub screen: Mutex<StudentsScreen>,
    last_seen: Mutex<Instant>,
}

impl SessionContext {
    async fn is_stale(&self, idle_ttl: Duration) -> bool {
        self.session.is_expired() || self.last_seen.lock().await.elapsed() > idle_ttl
    }
}

pub struct SessionRegistry {
    backend: Arc<dyn Backend>,
    contexts: RwLock<HashMap<SessionToken, Arc<SessionContext>>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            contexts: RwLock::new(HashMap::new()),
            idle_ttl: SESSION_IDLE_TTL,
        }
    }

    #[must_use]
    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Registers a fresh session and returns its cookie token. Stale
    /// sessions are swept first.
    pub async fn acquire(&self, session: Session) -> SessionToken {
        self.sweep().await;
        let token = SessionToken::generate();
        let screen = StudentsScreen::new(self.backend.records(&session));
        debug!("Registering session for {}", session.email);
        let context = Arc::new(SessionContext {
            session,
            screen: Mutex::new(screen),
            last_seen: Mutex::new(Instant::now()),
        });
        self.contexts.write().await.insert(token.clone(), context);
        token
    }

    /// The live context for `token`. An expired or idle session is released
    /// and treated as absent.
    pub async fn get(&self, token: &SessionToken) -> Option<Arc<SessionContext>> {
        let context = self.contexts.read().await.get(token).cloned()?;
        if context.is_stale(self.idle_ttl).await {
            info!("Session for {} expired", context.session.email);
            self.release(token).await;
            return None;
        }
        *context.last_seen.lock().await = Instant::now();
        Some(context)
    }

    /// Releases every expired or idle session. Returns how many were dropped.
    pub async fn sweep(&self) -> usize {
        let mut stale = Vec::new();
        for (token, context) in self.contexts.read().await.iter() {
            if context.is_stale(self.idle_ttl).await {
                stale.push(token.clone());
            }
        }

        let mut released = 0;
        for token in &stale {
            if self.release(token).await {
                released += 1;
            }
        }
        if released > 0 {
            info!("Released {} stale sessions", released);
        }
        released
    }

    /// Removes the session and signs it out of the identity provider.
    /// Returns `false` when the token was unknown.
    pub async fn release(&self, token: &SessionToken) -> bool {
        let removed = self.contexts.write().await.remove(token);
        match removed {
            Some(context) => {
                self.backend.sessions().sign_out(&context.session).await;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
