//! Document store seam.
//!
//! `HttpStore` talks to the CMS mutate API; `MemoryStore` keeps an
//! in-process dataset with the same create / upsert semantics and backs
//! dry runs and tests.

mod http;
mod memory;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::documents::{NewDocument, WriteMode};
use crate::error::StoreError;

pub use http::HttpStore;
pub use memory::MemoryStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Created,
    Replaced,
}

/// What the store did with one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WriteReceipt {
    pub id: String,
    pub operation: Operation,
}

pub trait DocumentStore: Send + Sync {
    /// Insert; `StoreError::Conflict` if the id already exists.
    fn create(
        &self,
        doc: &NewDocument,
    ) -> impl Future<Output = Result<WriteReceipt, StoreError>> + Send;

    /// Insert or fully replace.
    fn create_or_replace(
        &self,
        doc: &NewDocument,
    ) -> impl Future<Output = Result<WriteReceipt, StoreError>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    fn write(
        &self,
        doc: &NewDocument,
        mode: WriteMode,
    ) -> impl Future<Output = Result<WriteReceipt, StoreError>> + Send {
        async move {
            match mode {
                WriteMode::Create => self.create(doc).await,
                WriteMode::Upsert => self.create_or_replace(doc).await,
            }
        }
    }

    /// Short name for logs.
    fn describe(&self) -> String;
}
