//! Command-line configuration.

use clap::Parser;
use roster_gateway::{
    Backend, FirebaseBackend, FirebaseConfig, MemoryBackend, MemoryRecordStore,
    MemorySessionGateway, StoreError,
};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid Firebase config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Firebase config is missing {0}")]
    MissingField(&'static str),

    #[error("demo account must be EMAIL:PASSWORD, got {0:?}")]
    DemoAccount(String),

    #[error("no backend selected: pass --firebase-config <PATH> or --in-memory")]
    NoBackend,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A sign-in accepted by the in-memory identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
}

impl FromStr for DemoAccount {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((email, password)) if !email.is_empty() && !password.is_empty() => Ok(Self {
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ConfigError::DemoAccount(s.to_string())),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Student roster administration server")]
pub struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Path to the Firebase web-app config (JSON)
    #[arg(long, value_name = "PATH", conflicts_with = "in_memory")]
    pub firebase_config: Option<PathBuf>,

    /// Use the process-local identity provider and store
    #[arg(long)]
    pub in_memory: bool,

    /// Account for --in-memory, as EMAIL:PASSWORD (repeatable)
    #[arg(long = "demo-account", value_name = "EMAIL:PASSWORD", requires = "in_memory")]
    pub demo_accounts: Vec<DemoAccount>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which provider pair to run against.
#[derive(Debug, Clone)]
pub enum BackendChoice {
    Firebase(FirebaseConfig),
    InMemory(Vec<DemoAccount>),
}

impl Args {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn backend_choice(&self) -> Result<BackendChoice, ConfigError> {
        if self.in_memory {
            return Ok(BackendChoice::InMemory(self.demo_accounts.clone()));
        }
        match &self.firebase_config {
            Some(path) => Ok(BackendChoice::Firebase(load_firebase_config(path)?)),
            None => Err(ConfigError::NoBackend),
        }
    }
}

impl BackendChoice {
    pub fn into_backend(self) -> Result<Arc<dyn Backend>, ConfigError> {
        match self {
            BackendChoice::Firebase(config) => {
                info!("Using Firebase project {}", config.project_id);
                Ok(Arc::new(FirebaseBackend::new(config)?))
            }
            BackendChoice::InMemory(accounts) => {
                if accounts.is_empty() {
                    warn!("In-memory backend has no accounts; nobody can sign in");
                }
                let gateway = accounts
                    .into_iter()
                    .fold(MemorySessionGateway::new(), |gateway, account| {
                        gateway.with_account(account.email, account.password)
                    });
                info!("Using in-memory backend with {} account(s)", gateway.account_count());
                Ok(Arc::new(MemoryBackend::new(gateway, MemoryRecordStore::new())))
            }
        }
    }
}

/// Reads a Firebase web-app config and checks the keys Roster needs.
pub fn load_firebase_config(path: &Path) -> Result<FirebaseConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: FirebaseConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.api_key.trim().is_empty() {
        return Err(ConfigError::MissingField("apiKey"));
    }
    if config.project_id.trim().is_empty() {
        return Err(ConfigError::MissingField("projectId"));
    }
    Ok(config)
}
