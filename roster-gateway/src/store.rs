//! Document-store abstraction.

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untyped string-keyed field map.
pub type Fields = BTreeMap<String, String>;

/// A stored document: its store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Abstract document store.
///
/// Collections are addressed by name. Ordering of [`list`](Self::list) is
/// whatever the store returns.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the name of the store provider.
    fn provider_name(&self) -> &'static str;

    /// Lists every document in the collection.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Creates a document and returns its new id.
    async fn create(&self, collection: &str, fields: &Fields) -> StoreResult<String>;

    /// Replaces the named fields of an existing document.
    async fn update(&self, collection: &str, id: &str, fields: &Fields) -> StoreResult<()>;

    /// Deletes a document. Deleting a missing id succeeds.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}
