//! Cloud Firestore document store.
//!
//! Uses the Firestore REST API v1. Fields are written as `stringValue`s;
//! scalar values of other types written by other clients are read back as
//! strings, and composite values are skipped.

use super::FirebaseConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{Document, Fields, RecordStore};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use tracing::{debug, info};

const PAGE_SIZE: &str = "300";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    /// Full resource name, `projects/…/documents/<collection>/<id>`.
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, Value>,
}

/// Firestore-backed record store.
pub struct FirestoreStore {
    config: FirebaseConfig,
    client: Client,
    id_token: Option<String>,
}

impl FirestoreStore {
    /// Creates an unauthenticated store. Only works against databases whose
    /// security rules allow public access.
    pub fn new(config: FirebaseConfig, client: Client) -> Self {
        Self {
            config,
            client,
            id_token: None,
        }
    }

    /// Authorizes every request with a Firebase Auth id token.
    #[must_use]
    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            self.config.firestore_base_url, self.config.project_id, self.config.database
        )
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_root(), collection)
    }

    /// The id always lands as one percent-encoded segment under `collection`.
    /// Ids that could never name a document there are `NotFound`.
    fn document_url(&self, collection: &str, id: &str) -> StoreResult<Url> {
        if id.is_empty() || id == "." || id == ".." || id.contains('/') {
            return Err(StoreError::NotFound(format!("invalid document id {id:?}")));
        }
        let mut url = Url::parse(&self.collection_url(collection))
            .map_err(|e| StoreError::Protocol(format!("bad collection url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Protocol("collection url cannot be a base".to_string()))?
            .push(id);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.id_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Maps a non-success response onto a [`StoreError`].
async fn check_status(response: Response, operation: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        401 | 403 => StoreError::PermissionDenied(format!("{operation}: {body}")),
        404 => StoreError::NotFound(format!("{operation}: {body}")),
        _ => StoreError::Network(format!("{operation} failed ({status}): {body}")),
    })
}

fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), json!({ "stringValue": value })))
        .collect();
    json!({ "fields": encoded })
}

fn decode_value(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if let Some(s) = object.get("stringValue").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    // integerValue is a decimal string on the wire
    if let Some(s) = object.get("integerValue").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    if let Some(n) = object.get("doubleValue").and_then(Value::as_f64) {
        return Some(n.to_string());
    }
    if let Some(b) = object.get("booleanValue").and_then(Value::as_bool) {
        return Some(b.to_string());
    }
    if object.contains_key("nullValue") {
        return Some(String::new());
    }
    None
}

fn document_id(name: &str) -> StoreResult<String> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::Protocol(format!("document name without id: {name}")))
}

fn decode_document(document: FirestoreDocument) -> StoreResult<Document> {
    let id = document_id(&document.name)?;
    let fields = document
        .fields
        .iter()
        .filter_map(|(key, value)| decode_value(value).map(|v| (key.clone(), v)))
        .collect();
    Ok(Document { id, fields })
}

#[async_trait]
impl RecordStore for FirestoreStore {
    fn provider_name(&self) -> &'static str {
        "Cloud Firestore"
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let mut all_documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .authorized(self.client.get(self.collection_url(collection)))
                .query(&[("pageSize", PAGE_SIZE)]);

            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Network(format!("list failed: {e}")))?;
            let response = check_status(response, "list").await?;

            let page: ListDocumentsResponse = response
                .json()
                .await
                .map_err(|e| StoreError::Protocol(format!("failed to parse document list: {e}")))?;

            for document in page.documents {
                all_documents.push(decode_document(document)?);
            }

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        debug!("Listed {} documents from {}", all_documents.len(), collection);
        Ok(all_documents)
    }

    async fn create(&self, collection: &str, fields: &Fields) -> StoreResult<String> {
        let response = self
            .authorized(self.client.post(self.collection_url(collection)))
            .json(&encode_fields(fields))
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("create failed: {e}")))?;
        let response = check_status(response, "create").await?;

        let created: FirestoreDocument = response
            .json()
            .await
            .map_err(|e| StoreError::Protocol(format!("failed to parse created document: {e}")))?;

        let id = document_id(&created.name)?;
        info!("Created document {}/{}", collection, id);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: &Fields) -> StoreResult<()> {
        let mut query: Vec<(&str, &str)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", key.as_str()))
            .collect();
        query.push(("currentDocument.exists", "true"));

        let url = self.document_url(collection, id)?;
        let response = self
            .authorized(self.client.patch(url))
            .query(&query)
            .json(&encode_fields(fields))
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("update failed: {e}")))?;
        check_status(response, "update").await?;

        info!("Updated document {}/{}", collection, id);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let url = match self.document_url(collection, id) {
            Ok(url) => url,
            Err(StoreError::NotFound(reason)) => {
                debug!("Skipping delete in {}: {}", collection, reason);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let response = self
            .authorized(self.client.delete(url))
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("delete failed: {e}")))?;

        match check_status(response, "delete").await {
            Ok(_) | Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        info!("Deleted document {}/{}", collection, id);
        Ok(())
    }
}
