use serde::{Deserialize, Serialize};

use super::{CmsDocument, PortableText, Slug};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "teamMember")]
pub struct TeamMember {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub slug: Slug,
    pub role: String,
    /// Sort position on the team page (ascending).
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub bio: PortableText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CmsDocument for TeamMember {
    const TYPE: &'static str = "teamMember";

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
