//! Process-local gateways.
//!
//! Used as test doubles and for the `--in-memory` demo mode. Nothing is
//! persisted; all state is lost when the process exits.

mod sessions;
mod store;

pub use sessions::MemorySessionGateway;
pub use store::{MemoryRecordStore, StoreCall};

use crate::backend::Backend;
use crate::session::{Session, SessionGateway};
use crate::store::RecordStore;
use std::sync::Arc;

/// In-memory identity provider and a single shared in-memory store.
#[derive(Clone)]
pub struct MemoryBackend {
    sessions: Arc<MemorySessionGateway>,
    store: Arc<MemoryRecordStore>,
}

impl MemoryBackend {
    pub fn new(sessions: MemorySessionGateway, store: MemoryRecordStore) -> Self {
        Self {
            sessions: Arc::new(sessions),
            store: Arc::new(store),
        }
    }

    /// The concrete session gateway, for inspection in tests.
    pub fn session_gateway(&self) -> &Arc<MemorySessionGateway> {
        &self.sessions
    }

    /// The concrete store, for inspection in tests.
    pub fn store(&self) -> &Arc<MemoryRecordStore> {
        &self.store
    }
}

impl Backend for MemoryBackend {
    fn sessions(&self) -> Arc<dyn SessionGateway> {
        self.sessions.clone()
    }

    fn records(&self, _session: &Session) -> Arc<dyn RecordStore> {
        self.store.clone()
    }
}
