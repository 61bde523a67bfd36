//! Firebase Auth email/password sign-in.

use super::FirebaseConfig;
use crate::error::{AuthError, AuthResult};
use crate::session::{Session, SessionGateway};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    local_id: String,
    email: Option<String>,
    refresh_token: Option<String>,
    /// Seconds, sent as a string.
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase Auth identity provider.
pub struct FirebaseAuth {
    config: FirebaseConfig,
    client: Client,
}

impl FirebaseAuth {
    pub fn new(config: FirebaseConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn sign_in_url(&self) -> String {
        format!(
            "{}/v1/accounts:signInWithPassword",
            self.config.auth_base_url
        )
    }
}

#[async_trait]
impl SessionGateway for FirebaseAuth {
    fn provider_name(&self) -> &'static str {
        "Firebase Auth"
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        debug!("Requesting password sign-in");

        let response = self
            .client
            .post(self.sign_in_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Sign-in request failed: {e}");
                AuthError
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let reason = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| "unreadable error body".to_string());
            warn!("Sign-in rejected ({status}): {reason}");
            return Err(AuthError);
        }

        let body: SignInResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse sign-in response: {e}");
            AuthError
        })?;

        let mut session = Session::new(
            body.local_id,
            body.email.unwrap_or_else(|| email.to_string()),
            body.id_token,
        );
        if let Some(refresh_token) = body.refresh_token {
            session = session.with_refresh_token(refresh_token);
        }
        if let Some(secs) = body.expires_in.and_then(|s| s.parse::<u64>().ok()) {
            session = session.with_expiry(SystemTime::now() + Duration::from_secs(secs));
        }

        info!("Signed in user {}", session.user_id);
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) {
        // Password sessions have no server-side revocation over REST; dropping
        // the tokens is the sign-out.
        info!("Signed out user {}", session.user_id);
    }
}
