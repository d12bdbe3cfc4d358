//! Error types for the content library.
//!
//! The `agency` binary wraps these in `anyhow` with context; library callers
//! can match on them (a seed run, for example, treats `Conflict` as an
//! expected outcome of `create`).

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the CMS document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `create` hit an id that already exists. The stored document is untouched.
    #[error("document `{id}` already exists")]
    Conflict { id: String },

    #[error("CMS rejected the API token (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("CMS returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("CMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed CMS payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Problems with seed input documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("seed file is not valid {collection} JSON: {source}")]
    Parse {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection} entry #{index} has an empty slug")]
    EmptySlug {
        collection: &'static str,
        index: usize,
    },

    #[error("duplicate document id `{0}` in seed file")]
    DuplicateId(String),

    #[error("could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Outbound email failures.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid submission: {0}")]
    Invalid(&'static str),

    #[error("MAIL_API_KEY is not set")]
    MissingApiKey,

    #[error("email provider returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Configuration loading / validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("CMS project id not configured (set CMS_PROJECT_ID or cms.project_id)")]
    MissingProjectId,

    #[error("CMS write token not configured (set CMS_API_TOKEN)")]
    MissingToken,
}
