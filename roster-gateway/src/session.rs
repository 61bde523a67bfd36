//! Identity-provider abstraction.

use crate::error::AuthResult;
use async_trait::async_trait;
use std::fmt;
use std::time::SystemTime;

/// A signed-in user, as returned by the identity provider.
///
/// The id token authorizes document-store calls made on the user's behalf.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Provider-assigned user id.
    pub user_id: String,
    /// Address the user signed in with.
    pub email: String,
    id_token: String,
    refresh_token: Option<String>,
    /// When the id token stops being accepted, if the provider said.
    pub expires_at: Option<SystemTime>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            id_token: id_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expires_at: SystemTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Bearer credential for the document store.
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns `true` once `expires_at` has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| SystemTime::now() > exp)
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("id_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Abstract identity provider.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Returns the name of the identity provider.
    fn provider_name(&self) -> &'static str;

    /// Signs in with email and password.
    ///
    /// Any rejection, whatever its cause, is reported as [`AuthError`].
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Ends the session. Failures are logged, never returned.
    async fn sign_out(&self, session: &Session);
}
