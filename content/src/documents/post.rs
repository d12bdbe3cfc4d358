use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CmsDocument, PortableText, Reference, Slug};

/// Blog post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "post")]
pub struct Post {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: PortableText,
}

impl CmsDocument for Post {
    const TYPE: &'static str = "post";

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
        if self.excerpt.is_empty() {
            self.excerpt = excerpt_of(&self.body, 160);
        }
    }
}

/// First paragraph, cut at a word boundary.
fn excerpt_of(body: &PortableText, max_chars: usize) -> String {
    let Some(first) = body.blocks().iter().find(|b| b.style == "normal") else {
        return String::new();
    };
    let text = first.plain_text();
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    if let Some(space) = cut.rfind(' ') {
        cut.truncate(space);
    }
    cut.push('…');
    cut
}
