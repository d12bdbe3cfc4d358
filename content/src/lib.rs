//! # agency-content
//!
//! Native tooling behind the agency site: the CMS document model, the seed
//! runner that pushes JSON fixtures into the CMS, and the transactional
//! email sent by the contact form and the careers page.
//!
//! ```rust,no_run
//! use agency_content::{Collection, MemoryStore, Seeder};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let docs = Collection::Jobs.parse_seed(r#"[{"title": "Designer", "slug": "designer"}]"#)?;
//! let report = Seeder::new(MemoryStore::new())
//!     .run(&docs, Collection::Jobs.default_mode())
//!     .await;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod documents;
pub mod error;
pub mod mail;
pub mod seed;
pub mod store;

pub use config::{AgencyConfig, CmsConfig, MailConfig};
pub use documents::{Collection, NewDocument, WriteMode};
pub use error::{ConfigError, DocumentError, MailError, StoreError};
pub use mail::{ContactSubmission, HttpMailer, JobApplication, Mailer, send_application, send_contact};
pub use seed::{SeedReport, Seeder};
pub use store::{DocumentStore, HttpStore, MemoryStore, WriteReceipt};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
