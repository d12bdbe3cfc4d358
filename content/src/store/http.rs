use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{DocumentStore, Operation, WriteReceipt};
use crate::config::CmsConfig;
use crate::documents::NewDocument;
use crate::error::{ConfigError, StoreError};

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    id: String,
    operation: String,
}

#[derive(Debug, Deserialize)]
struct DocResponse {
    #[serde(default)]
    documents: Vec<Value>,
}

/// CMS HTTP API client (mutate + doc endpoints).
#[derive(Clone, Debug)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    api_version: String,
    dataset: String,
    token: String,
}

impl HttpStore {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        dataset: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            dataset: dataset.into(),
            token: token.into(),
        }
    }

    /// Requires a project id (or explicit host) and a write token.
    pub fn from_config(cfg: &CmsConfig) -> Result<Self, ConfigError> {
        let base_url = cfg.base_url()?;
        let token = cfg.require_token()?;
        Ok(Self::new(
            Client::new(),
            base_url,
            &cfg.api_version,
            &cfg.dataset,
            token,
        ))
    }

    fn mutate_url(&self) -> String {
        format!(
            "{}/v{}/data/mutate/{}?returnIds=true",
            self.base_url, self.api_version, self.dataset
        )
    }

    fn doc_url(&self, id: &str) -> String {
        format!(
            "{}/v{}/data/doc/{}/{}",
            self.base_url, self.api_version, self.dataset, id
        )
    }

    async fn mutate(&self, kind: &str, doc: &NewDocument) -> Result<WriteReceipt, StoreError> {
        let mut mutation = Map::new();
        mutation.insert(kind.to_string(), doc.body.clone());
        let body = json!({ "mutations": [mutation] });
        tracing::debug!(id = %doc.id, kind, "POST mutate");

        let response = self
            .client
            .post(self.mutate_url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text, &doc.id));
        }

        let parsed: MutateResponse = response.json().await?;
        let result = parsed.results.into_iter().next();
        let operation = match result.as_ref().map(|r| r.operation.as_str()) {
            Some("create") => Operation::Created,
            Some(_) => Operation::Replaced,
            // Older API versions omit results without returnIds.
            None if kind == "create" => Operation::Created,
            None => Operation::Replaced,
        };
        Ok(WriteReceipt {
            id: result.map(|r| r.id).unwrap_or_else(|| doc.id.clone()),
            operation,
        })
    }
}

fn status_error(status: StatusCode, body: String, id: &str) -> StoreError {
    match status {
        StatusCode::CONFLICT => StoreError::Conflict { id: id.to_string() },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized {
            status: status.as_u16(),
        },
        _ => StoreError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        },
    }
}

/// Pull `error.description` out of a CMS error payload, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/description")
                .or_else(|| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl DocumentStore for HttpStore {
    async fn create(&self, doc: &NewDocument) -> Result<WriteReceipt, StoreError> {
        self.mutate("create", doc).await
    }

    async fn create_or_replace(&self, doc: &NewDocument) -> Result<WriteReceipt, StoreError> {
        self.mutate("createOrReplace", doc).await
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.doc_url(id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text, id));
        }
        let parsed: DocResponse = response.json().await?;
        Ok(parsed.documents.into_iter().next())
    }

    fn describe(&self) -> String {
        format!("{} (dataset {})", self.base_url, self.dataset)
    }
}
