use serde::{Deserialize, Serialize};

use super::{CmsDocument, PortableText, Reference, Slug, key_references};

/// Headline number on a case study ("Conversion", "+38%").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetric {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "caseStudy")]
pub struct CaseStudy {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: Slug,
    pub client: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub challenge: PortableText,
    #[serde(default)]
    pub solution: PortableText,
    #[serde(default)]
    pub results: Vec<ResultMetric>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team: Vec<Reference>,
}

impl CmsDocument for CaseStudy {
    const TYPE: &'static str = "caseStudy";

    fn slug(&self) -> &Slug {
        &self.slug
    }

    fn explicit_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn normalize(&mut self) {
        for (i, metric) in self.results.iter_mut().enumerate() {
            if metric.key.is_none() {
                metric.key = Some(format!("m{i}"));
            }
        }
        key_references(&mut self.team);
    }
}
