use crate::error::{StoreError, StoreResult};
use crate::store::{Document, Fields, RecordStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// A call received by [`MemoryRecordStore`], recorded for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List { collection: String },
    Create { collection: String },
    Update { collection: String, id: String },
    Delete { collection: String, id: String },
}

impl StoreCall {
    /// `true` for create, update and delete.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreCall::List { .. })
    }
}

/// Insertion-ordered in-memory document store.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    calls: RwLock<Vec<StoreCall>>,
    offline: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document directly, bypassing the call log.
    pub async fn seed(&self, collection: &str, id: impl Into<String>, fields: Fields) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.into(),
                fields,
            });
    }

    /// When offline every call fails with [`StoreError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.read().await.clone()
    }

    /// Number of documents currently in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    async fn record(&self, call: StoreCall) -> StoreResult<()> {
        debug!("Memory store call: {:?}", call);
        self.calls.write().await.push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Network("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn provider_name(&self) -> &'static str {
        "In-memory store"
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.record(StoreCall::List {
            collection: collection.to_string(),
        })
        .await?;

        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, fields: &Fields) -> StoreResult<String> {
        self.record(StoreCall::Create {
            collection: collection.to_string(),
        })
        .await?;

        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields: fields.clone(),
            });

        info!("Created document {}/{}", collection, id);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: &Fields) -> StoreResult<()> {
        self.record(StoreCall::Update {
            collection: collection.to_string(),
            id: id.to_string(),
        })
        .await?;

        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound(format!("{collection}/{id}")))?;

        for (key, value) in fields {
            document.fields.insert(key.clone(), value.clone());
        }

        info!("Updated document {}/{}", collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.record(StoreCall::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        })
        .await?;

        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }

        info!("Deleted document {}/{}", collection, id);
        Ok(())
    }
}
