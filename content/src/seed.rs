//! Seed runner: write a batch of documents one at a time.
//!
//! A failing document is logged and skipped; the batch keeps going. There is
//! no rollback and no retry. Callers decide what a non-empty
//! [`SeedReport::failed`] means (the CLI exits non-zero).

use serde::Serialize;

use crate::documents::{NewDocument, WriteMode};
use crate::error::StoreError;
use crate::store::{DocumentStore, Operation, WriteReceipt};

#[derive(Debug, Serialize)]
pub struct SeedFailure {
    pub id: String,
    pub error: String,
    pub conflict: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct SeedReport {
    pub written: Vec<WriteReceipt>,
    pub failed: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn created(&self) -> usize {
        self.count(Operation::Created)
    }

    pub fn replaced(&self) -> usize {
        self.count(Operation::Replaced)
    }

    fn count(&self, op: Operation) -> usize {
        self.written.iter().filter(|r| r.operation == op).count()
    }
}

pub struct Seeder<S> {
    store: S,
}

impl<S: DocumentStore> Seeder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn run(&self, docs: &[NewDocument], mode: WriteMode) -> SeedReport {
        if mode == WriteMode::Create {
            tracing::warn!(
                "writing with `create`: documents that already exist will conflict on re-run \
                 (use --mode upsert for an idempotent seed)"
            );
        }
        tracing::info!(
            count = docs.len(),
            %mode,
            target = %self.store.describe(),
            "seeding documents"
        );

        let mut report = SeedReport::default();
        for doc in docs {
            match self.store.write(doc, mode).await {
                Ok(receipt) => {
                    tracing::info!(id = %receipt.id, operation = ?receipt.operation, "written");
                    report.written.push(receipt);
                }
                Err(err) => {
                    log_failure(doc, &err);
                    report.failed.push(SeedFailure {
                        id: doc.id.clone(),
                        conflict: err.is_conflict(),
                        error: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "seed finished"
        );
        report
    }
}

fn log_failure(doc: &NewDocument, err: &StoreError) {
    match err {
        StoreError::Conflict { .. } => {
            tracing::error!(id = %doc.id, doc_type = %doc.doc_type, "already exists, left unchanged")
        }
        other => tracing::error!(id = %doc.id, doc_type = %doc.doc_type, "write failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Collection;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    const STUDIES: &str = r#"[
        {"title": "Harbor Rebrand", "slug": "harbor-rebrand", "client": "Harbor Co",
         "summary": "original"}
    ]"#;

    const STUDIES_EDITED: &str = r#"[
        {"title": "Harbor Rebrand", "slug": "harbor-rebrand", "client": "Harbor Co",
         "summary": "edited"}
    ]"#;

    #[tokio::test]
    async fn upsert_twice_leaves_one_document() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(store.clone());
        let docs = Collection::CaseStudies.parse_seed(STUDIES).expect("parse");

        let first = seeder.run(&docs, WriteMode::Upsert).await;
        let second = seeder.run(&docs, WriteMode::Upsert).await;

        assert!(first.is_success() && second.is_success());
        assert_eq!(first.created(), 1);
        assert_eq!(second.replaced(), 1);
        assert_eq!(store.ids().await, vec!["caseStudy-harbor-rebrand".to_string()]);
    }

    #[tokio::test]
    async fn create_on_existing_id_fails_and_keeps_original() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(store.clone());
        let original = Collection::CaseStudies.parse_seed(STUDIES).expect("parse");
        let edited = Collection::CaseStudies
            .parse_seed(STUDIES_EDITED)
            .expect("parse");

        assert!(seeder.run(&original, WriteMode::Create).await.is_success());
        let report = seeder.run(&edited, WriteMode::Create).await;

        assert_eq!(report.written.len(), 0);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].conflict);
        let stored = store
            .get("caseStudy-harbor-rebrand")
            .await
            .expect("get")
            .expect("present");
        assert_eq!(stored["summary"], "original");
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(store.clone());
        let jobs = Collection::Jobs
            .parse_seed(
                r#"[
                    {"title": "Designer", "slug": "designer"},
                    {"title": "Engineer", "slug": "engineer"},
                    {"title": "Producer", "slug": "producer"}
                ]"#,
            )
            .expect("parse");

        seeder.run(&jobs[1..2], WriteMode::Create).await;
        let report = seeder.run(&jobs, WriteMode::Create).await;

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "job-engineer");
        assert_eq!(store.len().await, 3);
    }
}
