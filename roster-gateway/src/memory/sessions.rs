use crate::error::{AuthError, AuthResult};
use crate::session::{Session, SessionGateway};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Identity provider backed by a fixed set of accounts.
#[derive(Default)]
pub struct MemorySessionGateway {
    accounts: HashMap<String, String>,
    /// Id tokens of sessions that have signed in and not yet signed out.
    active: RwLock<HashSet<String>>,
}

impl MemorySessionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account that can sign in.
    #[must_use]
    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts.insert(email.into(), password.into());
        self
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Number of sessions currently signed in.
    pub async fn active_sessions(&self) -> usize {
        self.active.read().await.len()
    }
}

#[async_trait]
impl SessionGateway for MemorySessionGateway {
    fn provider_name(&self) -> &'static str {
        "In-memory accounts"
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        match self.accounts.get(email) {
            Some(expected) if expected == password => {}
            Some(_) => {
                warn!("Sign-in rejected: wrong password");
                return Err(AuthError);
            }
            None => {
                warn!("Sign-in rejected: unknown account");
                return Err(AuthError);
            }
        }

        let token = Uuid::new_v4().to_string();
        self.active.write().await.insert(token.clone());

        let session = Session::new(format!("memory:{email}"), email, token);
        info!("Signed in user {}", session.user_id);
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) {
        if self.active.write().await.remove(session.id_token()) {
            info!("Signed out user {}", session.user_id);
        } else {
            warn!("Sign-out for unknown session of user {}", session.user_id);
        }
    }
}
