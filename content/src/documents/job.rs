use serde::{Deserialize, Serialize};

use super::{CmsDocument, PortableText, Slug};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// Open position on the careers page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "job")]
pub struct Job {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub department: String,
    #[serde(default = "remote")]
    pub location: String,
    #[serde(rename = "employmentType", default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: PortableText,
    #[serde(default = "yes")]
    pub published: bool,
}

fn remote() -> String {
    "Remote".to_string()
}

fn yes() -> bool {
    true
}

impl CmsDocument for Job {
    const TYPE: &'static str = "job";

    fn slug(&self) -> &Slug {
        &self.slug
    }

    fn explicit_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
