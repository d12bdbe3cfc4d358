//! Portable text: the CMS's block-structured rich text.
//!
//! Seed files may give rich text either as real block arrays or as a plain
//! string. Plain strings are split on blank lines; `## ` / `### ` prefixes
//! become headings and `- ` lines become bullet items.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "span")]
pub struct Span {
    #[serde(rename = "_key")]
    pub key: String,
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename = "block")]
pub struct Block {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(default = "normal_style")]
    pub style: String,
    #[serde(rename = "markDefs", default)]
    pub mark_defs: Vec<serde_json::Value>,
    pub children: Vec<Span>,
    #[serde(rename = "listItem", default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

fn normal_style() -> String {
    "normal".to_string()
}

impl Block {
    fn text(key: String, style: &str, text: &str, list_item: Option<&str>) -> Self {
        Self {
            children: vec![Span {
                key: format!("{key}s0"),
                text: text.to_string(),
                marks: Vec::new(),
            }],
            key,
            style: style.to_string(),
            mark_defs: Vec::new(),
            list_item: list_item.map(str::to_string),
            level: list_item.map(|_| 1),
        }
    }

    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A block array. Serializes transparently as the array.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PortableText(pub Vec<Block>);

impl PortableText {
    /// Convert plain text into blocks with deterministic keys (`b0`, `b1`, ...).
    pub fn from_plain(text: &str) -> Self {
        let mut blocks = Vec::new();
        for para in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            let bullets: Vec<&str> = para.lines().map(str::trim).collect();
            if bullets.iter().all(|l| l.starts_with("- ")) {
                for line in bullets {
                    let key = format!("b{}", blocks.len());
                    blocks.push(Block::text(key, "normal", &line[2..], Some("bullet")));
                }
                continue;
            }

            let key = format!("b{}", blocks.len());
            let block = if let Some(rest) = para.strip_prefix("### ") {
                Block::text(key, "h3", rest, None)
            } else if let Some(rest) = para.strip_prefix("## ") {
                Block::text(key, "h2", rest, None)
            } else {
                // Single newlines inside a paragraph are soft wraps.
                let joined = para.lines().map(str::trim).collect::<Vec<_>>().join(" ");
                Block::text(key, "normal", &joined, None)
            };
            blocks.push(block);
        }
        Self(blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paragraph text joined by blank lines (excerpts, plain-text email).
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'de> Deserialize<'de> for PortableText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Blocks(Vec<Block>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Plain(text) => PortableText::from_plain(&text),
            Raw::Blocks(blocks) => PortableText(blocks),
        })
    }
}
