//! CMS document model.
//!
//! Records mirror the remote schema: `_id` / `_type`, slug objects,
//! references by id, portable-text arrays. The CMS is the system of record;
//! these types exist to produce seed documents, not to read them back.

mod case_study;
mod job;
mod post;
mod team;
pub mod portable_text;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DocumentError;

pub use case_study::{CaseStudy, ResultMetric};
pub use job::{EmploymentType, Job};
pub use portable_text::{Block, PortableText, Span};
pub use post::Post;
pub use team::TeamMember;

/// Lowercase, ASCII alphanumerics, single dashes.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            dash = false;
        } else if !out.is_empty() && !dash {
            out.push('-');
            dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// `{"_type": "slug", "current": "..."}`. Seed files may use a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "_type", rename = "slug")]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(raw: &str) -> Self {
        Self {
            current: slugify(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Object { current: String },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Plain(s) | Raw::Object { current: s } => Slug::new(&s),
        })
    }
}

/// Cross-document reference by id. Seed files may use a bare id string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "_type", rename = "reference")]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
    /// Required by the CMS when the reference sits in an array.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Reference {
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: None,
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Object {
                #[serde(rename = "_ref")]
                id: String,
                #[serde(rename = "_key", default)]
                key: Option<String>,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Plain(id) => Reference::to(id),
            Raw::Object { id, key } => Reference { id, key },
        })
    }
}

/// Give every reference in an array a stable `_key` (`r0`, `r1`, ...).
pub(crate) fn key_references(refs: &mut [Reference]) {
    for (i, r) in refs.iter_mut().enumerate() {
        if r.key.is_none() {
            r.key = Some(format!("r{i}"));
        }
    }
}

/// Behaviour shared by every seedable document type.
pub trait CmsDocument: Serialize + DeserializeOwned {
    /// Value of `_type`.
    const TYPE: &'static str;

    fn slug(&self) -> &Slug;
    fn explicit_id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);

    /// Fill in anything the CMS requires that seed files may omit.
    fn normalize(&mut self) {}

    /// Stable id: explicit `_id` or `<type>-<slug>`.
    fn document_id(&self) -> String {
        match self.explicit_id() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{}-{}", Self::TYPE, self.slug().as_str()),
        }
    }
}

/// A fully prepared document ready for the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewDocument {
    pub id: String,
    pub doc_type: String,
    /// Complete JSON body including `_id` and `_type`.
    pub body: Value,
}

impl NewDocument {
    pub fn from_typed<D: CmsDocument>(mut doc: D) -> Result<Self, DocumentError> {
        doc.normalize();
        let id = doc.document_id();
        doc.set_id(id.clone());
        let body = serde_json::to_value(&doc)?;
        Ok(Self {
            id,
            doc_type: D::TYPE.to_string(),
            body,
        })
    }
}

/// The four seedable collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Jobs,
    Team,
    CaseStudies,
    Posts,
}

/// How documents are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// `create`: fails on an existing id. Not safe to re-run.
    Create,
    /// `createOrReplace`: idempotent.
    Upsert,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMode::Create => "create",
            WriteMode::Upsert => "createOrReplace",
        })
    }
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Jobs,
        Collection::Team,
        Collection::CaseStudies,
        Collection::Posts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Team => "team",
            Collection::CaseStudies => "case-studies",
            Collection::Posts => "posts",
        }
    }

    pub fn document_type(self) -> &'static str {
        match self {
            Collection::Jobs => Job::TYPE,
            Collection::Team => TeamMember::TYPE,
            Collection::CaseStudies => CaseStudy::TYPE,
            Collection::Posts => Post::TYPE,
        }
    }

    /// Historical write mode per collection. Case studies were always
    /// inserted with plain `create`; everything else upserts.
    pub fn default_mode(self) -> WriteMode {
        match self {
            Collection::CaseStudies => WriteMode::Create,
            _ => WriteMode::Upsert,
        }
    }

    /// Parse a JSON array of this collection's records into store-ready documents.
    pub fn parse_seed(self, json: &str) -> Result<Vec<NewDocument>, DocumentError> {
        match self {
            Collection::Jobs => parse_typed::<Job>(self, json),
            Collection::Team => parse_typed::<TeamMember>(self, json),
            Collection::CaseStudies => parse_typed::<CaseStudy>(self, json),
            Collection::Posts => parse_typed::<Post>(self, json),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jobs" | "job" => Ok(Collection::Jobs),
            "team" | "team-members" => Ok(Collection::Team),
            "case-studies" | "case-study" | "work" => Ok(Collection::CaseStudies),
            "posts" | "post" | "blog" => Ok(Collection::Posts),
            other => Err(format!(
                "unknown collection '{other}' (expected jobs, team, case-studies or posts)"
            )),
        }
    }
}

fn parse_typed<D: CmsDocument>(
    collection: Collection,
    json: &str,
) -> Result<Vec<NewDocument>, DocumentError> {
    let records: Vec<D> = serde_json::from_str(json).map_err(|source| DocumentError::Parse {
        collection: collection.name(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut docs = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if record.slug().as_str().is_empty() {
            return Err(DocumentError::EmptySlug {
                collection: collection.name(),
                index,
            });
        }
        let doc = NewDocument::from_typed(record)?;
        if !seen.insert(doc.id.clone()) {
            return Err(DocumentError::DuplicateId(doc.id));
        }
        docs.push(doc);
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn slugify_normalizes() {
        assert_eq!(slugify("Acme Rebrand: Phase 2!"), "acme-rebrand-phase-2");
        assert_eq!(slugify("  --Hello--World-- "), "hello-world");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn slug_and_reference_accept_shorthand() {
        let slug: Slug = serde_json::from_value(json!("Brand Strategy")).expect("slug");
        assert_eq!(slug.as_str(), "brand-strategy");
        let slug: Slug =
            serde_json::from_value(json!({"_type": "slug", "current": "x"})).expect("slug obj");
        assert_eq!(slug.as_str(), "x");

        let r: Reference = serde_json::from_value(json!("teamMember-ana")).expect("ref");
        assert_eq!(
            serde_json::to_value(&r).expect("ser"),
            json!({"_type": "reference", "_ref": "teamMember-ana"})
        );
    }

    #[test]
    fn collection_names_round_trip_through_from_str() {
        for c in Collection::ALL {
            assert_eq!(c.name().parse::<Collection>(), Ok(c));
        }
        assert!("clients".parse::<Collection>().is_err());
    }

    #[test]
    fn default_modes_preserve_historical_behaviour() {
        assert_eq!(Collection::CaseStudies.default_mode(), WriteMode::Create);
        assert_eq!(Collection::Jobs.default_mode(), WriteMode::Upsert);
        assert_eq!(Collection::Team.default_mode(), WriteMode::Upsert);
        assert_eq!(Collection::Posts.default_mode(), WriteMode::Upsert);
    }

    #[test]
    fn seed_rejects_duplicate_ids_and_empty_slugs() {
        let dup = r#"[
            {"name": "Ana", "slug": "ana", "role": "Design Lead"},
            {"name": "Ana B", "slug": "Ana", "role": "Engineer"}
        ]"#;
        let err = Collection::Team.parse_seed(dup).expect_err("duplicate");
        assert!(matches!(err, DocumentError::DuplicateId(id) if id == "teamMember-ana"));

        let empty = r#"[{"name": "X", "slug": "!!!", "role": "PM"}]"#;
        let err = Collection::Team.parse_seed(empty).expect_err("empty slug");
        assert!(matches!(err, DocumentError::EmptySlug { index: 0, .. }));

        let err = Collection::Team.parse_seed("{}").expect_err("not an array");
        assert!(matches!(err, DocumentError::Parse { collection: "team", .. }));
    }
}
