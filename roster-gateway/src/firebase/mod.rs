//! Firebase adapters.
//!
//! Uses the Firebase Auth (Identity Toolkit) and Cloud Firestore REST APIs, so
//! no SDK is involved: every call is a plain JSON request through `reqwest`.

mod auth;
mod firestore;

pub use auth::FirebaseAuth;
pub use firestore::FirestoreStore;

use crate::backend::Backend;
use crate::error::{StoreError, StoreResult};
use crate::session::{Session, SessionGateway};
use crate::store::RecordStore;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Firebase project configuration.
///
/// Field names match the web `firebaseConfig` object, so the JSON snippet from
/// the Firebase console can be used as-is (unknown keys are ignored).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirebaseConfig {
    /// Web API key of the project.
    pub api_key: String,
    /// Project id, e.g. `student-management-1234`.
    pub project_id: String,
    /// Firestore database id.
    pub database: String,
    /// Base URL for the Identity Toolkit API.
    pub auth_base_url: String,
    /// Base URL for the Firestore API.
    pub firestore_base_url: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            database: "(default)".to_string(),
            auth_base_url: "https://identitytoolkit.googleapis.com".to_string(),
            firestore_base_url: "https://firestore.googleapis.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl FirebaseConfig {
    /// Builds the shared HTTP client.
    pub fn http_client(&self) -> StoreResult<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(|e| StoreError::Network(format!("failed to create HTTP client: {e}")))
    }
}

/// Firebase Auth plus one Firestore store per signed-in session.
pub struct FirebaseBackend {
    config: FirebaseConfig,
    client: Client,
    auth: Arc<FirebaseAuth>,
}

impl FirebaseBackend {
    pub fn new(config: FirebaseConfig) -> StoreResult<Self> {
        let client = config.http_client()?;
        let auth = Arc::new(FirebaseAuth::new(config.clone(), client.clone()));
        Ok(Self {
            config,
            client,
            auth,
        })
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }
}

impl Backend for FirebaseBackend {
    fn sessions(&self) -> Arc<dyn SessionGateway> {
        self.auth.clone()
    }

    fn records(&self, session: &Session) -> Arc<dyn RecordStore> {
        Arc::new(
            FirestoreStore::new(self.config.clone(), self.client.clone())
                .with_id_token(session.id_token()),
        )
    }
}
