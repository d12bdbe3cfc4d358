use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use super::{DocumentStore, Operation, WriteReceipt};
use crate::documents::NewDocument;
use crate::error::StoreError;

/// In-process dataset. Clones share the same documents.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    docs: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.lock().await.is_empty()
    }

    pub async fn ids(&self) -> Vec<String> {
        self.docs.lock().await.keys().cloned().collect()
    }
}

impl DocumentStore for MemoryStore {
    async fn create(&self, doc: &NewDocument) -> Result<WriteReceipt, StoreError> {
        let mut docs = self.docs.lock().await;
        if docs.contains_key(&doc.id) {
            return Err(StoreError::Conflict { id: doc.id.clone() });
        }
        docs.insert(doc.id.clone(), doc.body.clone());
        Ok(WriteReceipt {
            id: doc.id.clone(),
            operation: Operation::Created,
        })
    }

    async fn create_or_replace(&self, doc: &NewDocument) -> Result<WriteReceipt, StoreError> {
        let previous = self
            .docs
            .lock()
            .await
            .insert(doc.id.clone(), doc.body.clone());
        Ok(WriteReceipt {
            id: doc.id.clone(),
            operation: if previous.is_some() {
                Operation::Replaced
            } else {
                Operation::Created
            },
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.docs.lock().await.get(id).cloned())
    }

    fn describe(&self) -> String {
        "in-memory dataset".to_string()
    }
}
